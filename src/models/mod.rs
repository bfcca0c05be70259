//! Domain types and request/response models for the farm API
//!
//! `animal` holds the entity and its enums; `requests` and `responses` are
//! the DTOs used for serializing/deserializing HTTP bodies.

pub mod animal;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use animal::{Animal, AnimalChanges, AnimalFilter, NewAnimal, Race, Status};
pub use requests::{CreateAnimalRequest, ListAnimalsQuery, UpdateAnimalRequest};
pub use responses::{HealthResponse, RootResponse};
