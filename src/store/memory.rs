//! In-memory animal store
//!
//! Keeps animals in a `Vec` behind an `Arc<RwLock<>>`. Lookups are linear
//! scans, which is fine for the handful of records it is meant for.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{duplicate_name, name_taken, AnimalStore};
use crate::error::{FarmError, Result};
use crate::models::{Animal, AnimalChanges, AnimalFilter, NewAnimal};

#[derive(Debug, Default)]
struct Inner {
    animals: Vec<Animal>,
    last_id: i64,
}

/// Rejects a batch in which two animals share a name.
fn check_unique_names(animals: &[NewAnimal]) -> Result<()> {
    let mut seen = HashSet::new();
    for animal in animals {
        if !seen.insert(animal.name.as_str()) {
            return Err(name_taken(&animal.name));
        }
    }
    Ok(())
}

impl Inner {
    fn insert(&mut self, animal: NewAnimal) -> Animal {
        self.last_id += 1;
        let animal = animal.with_id(self.last_id);
        self.animals.push(animal.clone());
        animal
    }
}

// == Memory Animal Store ==
/// Process-local store. Clones share the same list.
#[derive(Debug, Clone, Default)]
pub struct MemoryAnimalStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryAnimalStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `animals`, with ids assigned from 1.
    ///
    /// Fails if two of the animals share a name.
    pub fn with_animals(animals: Vec<NewAnimal>) -> Result<Self> {
        check_unique_names(&animals)?;
        let mut inner = Inner::default();
        for animal in animals {
            inner.insert(animal);
        }
        Ok(Self {
            inner: Arc::new(RwLock::new(inner)),
        })
    }

    /// Returns the number of stored animals.
    pub async fn len(&self) -> usize {
        self.inner.read().await.animals.len()
    }

    /// Returns true if no animal is stored.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.animals.is_empty()
    }
}

#[async_trait]
impl AnimalStore for MemoryAnimalStore {
    async fn list(&self, filter: &AnimalFilter) -> Result<Vec<Animal>> {
        let inner = self.inner.read().await;
        Ok(inner
            .animals
            .iter()
            .filter(|animal| filter.matches(animal))
            .cloned()
            .collect())
    }

    async fn get(&self, id: i64) -> Result<Animal> {
        let inner = self.inner.read().await;
        inner
            .animals
            .iter()
            .find(|animal| animal.id == id)
            .cloned()
            .ok_or_else(|| FarmError::animal_not_found(id))
    }

    async fn create(&self, animal: NewAnimal) -> Result<Animal> {
        let mut inner = self.inner.write().await;
        if let Some(existing) = inner.animals.iter().find(|a| a.name == animal.name) {
            return Err(duplicate_name(&animal.name, existing.id));
        }
        Ok(inner.insert(animal))
    }

    async fn update(&self, id: i64, changes: AnimalChanges) -> Result<Animal> {
        let mut inner = self.inner.write().await;

        let position = inner
            .animals
            .iter()
            .position(|animal| animal.id == id)
            .ok_or_else(|| FarmError::animal_not_found(id))?;

        if let Some(name) = &changes.name {
            if inner.animals.iter().any(|a| &a.name == name && a.id != id) {
                return Err(name_taken(name));
            }
        }

        let animal = &mut inner.animals[position];
        changes.apply_to(animal);
        Ok(animal.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut inner = self.inner.write().await;
        let before = inner.animals.len();
        inner.animals.retain(|animal| animal.id != id);
        if inner.animals.len() == before {
            return Err(FarmError::animal_not_found(id));
        }
        Ok(())
    }

    async fn replace_all(&self, animals: Vec<NewAnimal>) -> Result<usize> {
        check_unique_names(&animals)?;

        let mut inner = self.inner.write().await;
        inner.animals.clear();
        inner.last_id = 0;
        for animal in animals {
            inner.insert(animal);
        }
        Ok(inner.animals.len())
    }
}
