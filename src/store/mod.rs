//! Animal Store Module
//!
//! Persistence for animals behind the `AnimalStore` trait, with a SQLite
//! implementation and a process-local one for lightweight testing.

mod memory;
mod seed;
mod sql;


use async_trait::async_trait;

use crate::error::{FarmError, Result};
use crate::models::{Animal, AnimalChanges, AnimalFilter, NewAnimal};

// Re-export public types
pub use memory::MemoryAnimalStore;
pub use seed::seed_animals;
pub use sql::SqlAnimalStore;

// == Animal Store Trait ==
/// Operations over the set of animals.
///
/// Each operation is a single atomic read or write. Implementations enforce
/// name uniqueness and report missing ids as `FarmError::NotFound`.
#[async_trait]
pub trait AnimalStore: Send + Sync {
    /// Lists animals matching `filter`, ordered by id.
    async fn list(&self, filter: &AnimalFilter) -> Result<Vec<Animal>>;

    /// Fetches one animal.
    async fn get(&self, id: i64) -> Result<Animal>;

    /// Stores a new animal and returns it with its assigned id.
    async fn create(&self, animal: NewAnimal) -> Result<Animal>;

    /// Applies a partial update and returns the updated animal.
    async fn update(&self, id: i64, changes: AnimalChanges) -> Result<Animal>;

    /// Removes an animal permanently.
    async fn delete(&self, id: i64) -> Result<()>;

    /// Replaces all stored animals with `animals`, returning how many were inserted.
    async fn replace_all(&self, animals: Vec<NewAnimal>) -> Result<usize>;

    /// Checks that the backing storage is reachable.
    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

// == Shared Error Builders ==

fn duplicate_name(name: &str, existing_id: i64) -> FarmError {
    FarmError::Validation(format!(
        "An animal named '{}' already exists (id: {})",
        name, existing_id
    ))
}

fn name_exists(name: &str) -> FarmError {
    FarmError::Validation(format!("An animal named '{}' already exists", name))
}

fn name_taken(name: &str) -> FarmError {
    FarmError::Validation(format!("Another animal already uses the name '{}'", name))
}
