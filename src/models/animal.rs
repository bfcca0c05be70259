//! Animal entity and its enumerations
//!
//! `Race` is a closed set of species, `Status` the alive/dead state.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// == Race ==
/// Species of a farm animal.
///
/// Serialized as its display value (`"Poule"`, `"Vache"`, ...), which is also
/// what the database stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    #[serde(rename = "Poule")]
    Chicken,
    #[serde(rename = "Vache")]
    Cow,
    #[serde(rename = "Chat")]
    Cat,
    #[serde(rename = "Chien")]
    Dog,
    #[serde(rename = "Cochon")]
    Pig,
    #[serde(rename = "Mouton")]
    Sheep,
    #[serde(rename = "Chèvre")]
    Goat,
    #[serde(rename = "Cheval")]
    Horse,
    #[serde(rename = "Canard")]
    Duck,
    #[serde(rename = "Lapin")]
    Rabbit,
}

impl Race {
    /// Every race, in declaration order.
    pub const ALL: [Race; 10] = [
        Race::Chicken,
        Race::Cow,
        Race::Cat,
        Race::Dog,
        Race::Pig,
        Race::Sheep,
        Race::Goat,
        Race::Horse,
        Race::Duck,
        Race::Rabbit,
    ];

    /// Upper-case identifier, e.g. `CHICKEN`.
    pub fn name(self) -> &'static str {
        match self {
            Race::Chicken => "CHICKEN",
            Race::Cow => "COW",
            Race::Cat => "CAT",
            Race::Dog => "DOG",
            Race::Pig => "PIG",
            Race::Sheep => "SHEEP",
            Race::Goat => "GOAT",
            Race::Horse => "HORSE",
            Race::Duck => "DUCK",
            Race::Rabbit => "RABBIT",
        }
    }

    /// Display value, stored in the database and used in JSON.
    pub fn value(self) -> &'static str {
        match self {
            Race::Chicken => "Poule",
            Race::Cow => "Vache",
            Race::Cat => "Chat",
            Race::Dog => "Chien",
            Race::Pig => "Cochon",
            Race::Sheep => "Mouton",
            Race::Goat => "Chèvre",
            Race::Horse => "Cheval",
            Race::Duck => "Canard",
            Race::Rabbit => "Lapin",
        }
    }

    /// English label.
    pub fn label(self) -> &'static str {
        match self {
            Race::Chicken => "Chicken",
            Race::Cow => "Cow",
            Race::Cat => "Cat",
            Race::Dog => "Dog",
            Race::Pig => "Pig",
            Race::Sheep => "Sheep",
            Race::Goat => "Goat",
            Race::Horse => "Horse",
            Race::Duck => "Duck",
            Race::Rabbit => "Rabbit",
        }
    }

    /// Looks up a race by value, name or label, ignoring case.
    ///
    /// Returns `None` when the input matches no race.
    pub fn parse(input: &str) -> Option<Race> {
        let wanted = input.trim().to_lowercase();
        Race::ALL.into_iter().find(|race| {
            race.value().to_lowercase() == wanted
                || race.name().to_lowercase() == wanted
                || race.label().to_lowercase() == wanted
        })
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// == Status ==
/// Alive/dead state, serialized as `1`/`0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Status {
    Alive,
    Dead,
}

impl Status {
    /// Integer code stored in the database.
    pub fn code(self) -> i64 {
        match self {
            Status::Alive => 1,
            Status::Dead => 0,
        }
    }

    /// French label.
    pub fn label(self) -> &'static str {
        match self {
            Status::Alive => "vivant",
            Status::Dead => "mort",
        }
    }
}

impl TryFrom<i64> for Status {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Status::Alive),
            0 => Ok(Status::Dead),
            other => Err(format!("Status '{}' does not exist (expected 0 or 1)", other)),
        }
    }
}

impl From<Status> for i64 {
    fn from(status: Status) -> Self {
        status.code()
    }
}

// == Animal ==
/// A farm animal as stored and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: i64,
    pub name: String,
    pub race: Race,
    pub status: Status,
    pub birth_date: i32,
    pub created_at: NaiveDateTime,
}

// == New Animal ==
/// A validated animal not yet stored; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnimal {
    pub name: String,
    pub race: Race,
    pub status: Status,
    pub birth_date: i32,
    pub created_at: NaiveDateTime,
}

impl NewAnimal {
    /// Builds the stored animal once an id is known.
    pub fn with_id(self, id: i64) -> Animal {
        Animal {
            id,
            name: self.name,
            race: self.race,
            status: self.status,
            birth_date: self.birth_date,
            created_at: self.created_at,
        }
    }
}

// == Animal Changes ==
/// Validated partial update. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnimalChanges {
    pub name: Option<String>,
    pub race: Option<Race>,
    pub status: Option<Status>,
    pub birth_date: Option<i32>,
}

impl AnimalChanges {
    /// Applies the supplied fields to `animal`; id and created_at are untouched.
    pub fn apply_to(&self, animal: &mut Animal) {
        if let Some(name) = &self.name {
            animal.name = name.clone();
        }
        if let Some(race) = self.race {
            animal.race = race;
        }
        if let Some(status) = self.status {
            animal.status = status;
        }
        if let Some(birth_date) = self.birth_date {
            animal.birth_date = birth_date;
        }
    }
}

// == Animal Filter ==
/// Equality filters for listing animals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimalFilter {
    pub status: Option<Status>,
    pub race: Option<Race>,
}

impl AnimalFilter {
    /// Returns true if the animal passes every set filter.
    pub fn matches(&self, animal: &Animal) -> bool {
        self.status.map_or(true, |status| animal.status == status)
            && self.race.map_or(true, |race| animal.race == race)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Animal {
        Animal {
            id: 1,
            name: "Obi-Wan Henobi".to_string(),
            race: Race::Chicken,
            status: Status::Alive,
            birth_date: 2003,
            created_at: NaiveDate::from_ymd_opt(2003, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_race_parse_by_value_name_and_label() {
        assert_eq!(Race::parse("Poule"), Some(Race::Chicken));
        assert_eq!(Race::parse("poule"), Some(Race::Chicken));
        assert_eq!(Race::parse("CHICKEN"), Some(Race::Chicken));
        assert_eq!(Race::parse("chicken"), Some(Race::Chicken));
        assert_eq!(Race::parse("vache"), Some(Race::Cow));
        assert_eq!(Race::parse("CHÈVRE"), Some(Race::Goat));
    }

    #[test]
    fn test_race_parse_unknown() {
        assert_eq!(Race::parse("Dragon"), None);
        assert_eq!(Race::parse(""), None);
        assert_eq!(Race::parse("Poul"), None);
    }

    #[test]
    fn test_race_serializes_as_value() {
        let json = serde_json::to_string(&Race::Cow).unwrap();
        assert_eq!(json, r#""Vache""#);
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&Status::Alive).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Status::Dead).unwrap(), "0");
        let status: Status = serde_json::from_str("0").unwrap();
        assert_eq!(status, Status::Dead);
        assert!(serde_json::from_str::<Status>("2").is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::Alive.label(), "vivant");
        assert_eq!(Status::Dead.label(), "mort");
    }

    #[test]
    fn test_animal_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Obi-Wan Henobi");
        assert_eq!(json["race"], "Poule");
        assert_eq!(json["status"], 1);
        assert_eq!(json["birth_date"], 2003);
        assert_eq!(json["created_at"], "2003-01-01T10:00:00");
    }

    #[test]
    fn test_changes_apply_only_supplied_fields() {
        let mut animal = sample();
        let changes = AnimalChanges {
            status: Some(Status::Dead),
            ..Default::default()
        };
        changes.apply_to(&mut animal);

        assert_eq!(animal.status, Status::Dead);
        assert_eq!(animal.name, "Obi-Wan Henobi");
        assert_eq!(animal.race, Race::Chicken);
        assert_eq!(animal.id, 1);
    }

    #[test]
    fn test_filter_matches() {
        let animal = sample();
        assert!(AnimalFilter::default().matches(&animal));
        assert!(AnimalFilter {
            status: Some(Status::Alive),
            race: Some(Race::Chicken),
        }
        .matches(&animal));
        assert!(!AnimalFilter {
            status: None,
            race: Some(Race::Cow),
        }
        .matches(&animal));
        assert!(!AnimalFilter {
            status: Some(Status::Dead),
            race: None,
        }
        .matches(&animal));
    }
}
