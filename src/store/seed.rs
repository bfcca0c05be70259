//! Seed data loaded at startup

use chrono::{NaiveDate, NaiveDateTime};

use crate::models::{NewAnimal, Race, Status};

/// The animals every fresh farm starts with.
pub fn seed_animals() -> Vec<NewAnimal> {
    [
        ("Obi-Wan Henobi", Race::Chicken, Status::Alive, 2003),
        ("Hen-credible Ladies", Race::Chicken, Status::Alive, 2004),
        ("Hen-kerchief", Race::Chicken, Status::Dead, 1998),
        ("Moo-gnificent", Race::Cow, Status::Alive, 1975),
        ("Moo-tiful", Race::Cow, Status::Alive, 1975),
        ("Cat-a-tonic", Race::Cat, Status::Alive, 2012),
    ]
    .into_iter()
    .map(|(name, race, status, birth_date)| NewAnimal {
        name: name.to_string(),
        race,
        status,
        birth_date,
        created_at: new_year_morning(birth_date),
    })
    .collect()
}

/// January 1st of `year`, 10:00.
fn new_year_morning(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|date| date.and_hms_opt(10, 0, 0))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_contents() {
        let animals = seed_animals();
        assert_eq!(animals.len(), 6);
        assert_eq!(
            animals.iter().filter(|a| a.race == Race::Chicken).count(),
            3
        );
        assert_eq!(animals.iter().filter(|a| a.status == Status::Dead).count(), 1);
    }

    #[test]
    fn test_seed_names_unique() {
        let animals = seed_animals();
        let names: HashSet<_> = animals.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names.len(), animals.len());
    }

    #[test]
    fn test_seed_created_at() {
        let animals = seed_animals();
        assert_eq!(
            animals[0].created_at.to_string(),
            "2003-01-01 10:00:00"
        );
    }
}
