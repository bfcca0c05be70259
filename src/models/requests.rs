//! Request DTOs for the farm API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.
//! Enum fields arrive as raw strings/integers so that unknown values surface
//! as validation errors rather than body rejections.

use chrono::{Datelike, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::{FarmError, Result};
use crate::models::{AnimalChanges, AnimalFilter, NewAnimal, Race, Status};

// == Field Limits ==
/// Maximum animal name length in characters
pub const MAX_NAME_LENGTH: usize = 200;

/// Earliest accepted birth year
pub const MIN_BIRTH_YEAR: i64 = 1000;

/// Request body for POST /animals
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnimalRequest {
    pub name: String,
    pub race: String,
    pub status: i64,
    pub birth_date: i64,
}

impl CreateAnimalRequest {
    /// Validates every field and builds the animal to store.
    pub fn into_new_animal(self, created_at: NaiveDateTime) -> Result<NewAnimal> {
        validate_name(&self.name)?;
        let race = parse_race(&self.race)?;
        let status = parse_status(self.status)?;
        let birth_date = validate_birth_date(self.birth_date)?;

        Ok(NewAnimal {
            name: self.name,
            race,
            status,
            birth_date,
            created_at,
        })
    }
}

/// Request body for PUT /animals/:id
///
/// Every field is optional; absent and `null` both mean "leave unchanged".
/// Unknown fields such as `id` or `created_at` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAnimalRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub birth_date: Option<i64>,
}

impl UpdateAnimalRequest {
    /// Validates the supplied fields.
    pub fn into_changes(self) -> Result<AnimalChanges> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }

        Ok(AnimalChanges {
            race: self.race.as_deref().map(parse_race).transpose()?,
            status: self.status.map(parse_status).transpose()?,
            birth_date: self.birth_date.map(validate_birth_date).transpose()?,
            name: self.name,
        })
    }
}

/// Query string for GET /animals
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListAnimalsQuery {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub race: Option<String>,
}

impl ListAnimalsQuery {
    /// Resolves the raw filters. An empty race is treated as absent.
    pub fn into_filter(self) -> Result<AnimalFilter> {
        let race = match self.race.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(race) => Some(parse_race(race)?),
        };

        Ok(AnimalFilter {
            status: self.status.map(parse_status).transpose()?,
            race,
        })
    }
}

// == Field Validation ==

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(FarmError::Validation("Name cannot be empty".to_string()));
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(FarmError::Validation(format!(
            "Name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

fn parse_race(race: &str) -> Result<Race> {
    Race::parse(race).ok_or_else(|| FarmError::unknown_race(race))
}

fn parse_status(status: i64) -> Result<Status> {
    Status::try_from(status).map_err(FarmError::Validation)
}

fn validate_birth_date(year: i64) -> Result<i32> {
    let current_year = i64::from(Utc::now().year());
    if !(MIN_BIRTH_YEAR..=current_year).contains(&year) {
        return Err(FarmError::Validation(format!(
            "Birth year must be between {} and {}",
            MIN_BIRTH_YEAR, current_year
        )));
    }
    // Bounded by the range check above.
    Ok(year as i32)
}
