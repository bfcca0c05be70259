//! SQLite animal store
//!
//! Every mutating operation runs inside one transaction. Returning early with
//! an error drops the transaction, which rolls it back.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::{Sqlite, SqliteConnection, SqlitePool};
use sqlx::{FromRow, QueryBuilder};

use super::{duplicate_name, name_exists, name_taken, AnimalStore};
use crate::db;
use crate::error::{FarmError, Result};
use crate::models::{Animal, AnimalChanges, AnimalFilter, NewAnimal, Race, Status};

const SELECT_ANIMALS: &str =
    "SELECT id, name, race, status, birth_date, created_at FROM animals";

#[derive(Debug, FromRow)]
struct AnimalRow {
    id: i64,
    name: String,
    race: String,
    status: i64,
    birth_date: i64,
    created_at: NaiveDateTime,
}

impl TryFrom<AnimalRow> for Animal {
    type Error = FarmError;

    fn try_from(row: AnimalRow) -> Result<Self> {
        let race = Race::parse(&row.race).ok_or_else(|| {
            FarmError::Internal(format!("Animal {} has unknown race '{}'", row.id, row.race))
        })?;
        let status = Status::try_from(row.status).map_err(|e| {
            FarmError::Internal(format!("Animal {} has invalid status: {}", row.id, e))
        })?;
        let birth_date = i32::try_from(row.birth_date).map_err(|_| {
            FarmError::Internal(format!(
                "Animal {} has invalid birth year {}",
                row.id, row.birth_date
            ))
        })?;

        Ok(Animal {
            id: row.id,
            name: row.name,
            race,
            status,
            birth_date,
            created_at: row.created_at,
        })
    }
}

// == SQL Animal Store ==
/// Store backed by the `animals` table.
#[derive(Debug, Clone)]
pub struct SqlAnimalStore {
    pool: SqlitePool,
}

impl SqlAnimalStore {
    /// Wraps an already migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

async fn fetch_by_id(conn: &mut SqliteConnection, id: i64) -> Result<Option<Animal>> {
    let row = sqlx::query_as::<_, AnimalRow>(
        "SELECT id, name, race, status, birth_date, created_at FROM animals WHERE id = ?1",
    )
    .bind(id)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(Animal::try_from).transpose()
}

async fn id_for_name(conn: &mut SqliteConnection, name: &str) -> Result<Option<i64>> {
    let id = sqlx::query_scalar::<_, i64>("SELECT id FROM animals WHERE name = ?1")
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(id)
}

/// Inserts `animal`, mapping a name collision through `on_conflict`.
async fn insert(
    conn: &mut SqliteConnection,
    animal: NewAnimal,
    on_conflict: fn(&str) -> FarmError,
) -> Result<Animal> {
    let result = sqlx::query(
        r#"
        INSERT INTO animals (name, race, status, birth_date, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&animal.name)
    .bind(animal.race.value())
    .bind(animal.status.code())
    .bind(animal.birth_date)
    .bind(animal.created_at)
    .execute(&mut *conn)
    .await
    .map_err(|e| unique_name_violation(e, &animal.name, on_conflict))?;

    Ok(animal.with_id(result.last_insert_rowid()))
}

/// Inserts a freshly created animal.
///
/// A concurrent create can win the name between the lookup and the insert;
/// the constraint failure then reads like any other duplicate create.
async fn insert_created(conn: &mut SqliteConnection, animal: NewAnimal) -> Result<Animal> {
    insert(conn, animal, name_exists).await
}

/// Maps a UNIQUE constraint failure on `name` to a validation error.
fn unique_name_violation(
    err: sqlx::Error,
    name: &str,
    on_conflict: fn(&str) -> FarmError,
) -> FarmError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => on_conflict(name),
        _ => FarmError::Database(err),
    }
}

#[async_trait]
impl AnimalStore for SqlAnimalStore {
    async fn list(&self, filter: &AnimalFilter) -> Result<Vec<Animal>> {
        let mut query = QueryBuilder::<Sqlite>::new(SELECT_ANIMALS);
        let mut separator = " WHERE ";

        if let Some(status) = filter.status {
            query.push(separator).push("status = ").push_bind(status.code());
            separator = " AND ";
        }
        if let Some(race) = filter.race {
            query.push(separator).push("race = ").push_bind(race.value());
        }
        query.push(" ORDER BY id");

        let rows = query
            .build_query_as::<AnimalRow>()
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Animal::try_from).collect()
    }

    async fn get(&self, id: i64) -> Result<Animal> {
        let mut conn = self.pool.acquire().await?;
        fetch_by_id(&mut conn, id)
            .await?
            .ok_or_else(|| FarmError::animal_not_found(id))
    }

    async fn create(&self, animal: NewAnimal) -> Result<Animal> {
        let mut tx = self.pool.begin().await?;

        if let Some(existing_id) = id_for_name(&mut tx, &animal.name).await? {
            return Err(duplicate_name(&animal.name, existing_id));
        }
        let animal = insert_created(&mut tx, animal).await?;

        tx.commit().await?;
        Ok(animal)
    }

    async fn update(&self, id: i64, changes: AnimalChanges) -> Result<Animal> {
        let mut tx = self.pool.begin().await?;

        let mut animal = fetch_by_id(&mut tx, id)
            .await?
            .ok_or_else(|| FarmError::animal_not_found(id))?;

        if let Some(name) = &changes.name {
            if let Some(existing_id) = id_for_name(&mut tx, name).await? {
                if existing_id != id {
                    return Err(name_taken(name));
                }
            }
        }

        changes.apply_to(&mut animal);
        sqlx::query(
            r#"
            UPDATE animals
            SET name = ?1, race = ?2, status = ?3, birth_date = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&animal.name)
        .bind(animal.race.value())
        .bind(animal.status.code())
        .bind(animal.birth_date)
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| unique_name_violation(e, &animal.name, name_taken))?;

        tx.commit().await?;
        Ok(animal)
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM animals WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(FarmError::animal_not_found(id));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn replace_all(&self, animals: Vec<NewAnimal>) -> Result<usize> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM animals").execute(&mut *tx).await?;
        // Restart AUTOINCREMENT so reseeded animals get ids from 1.
        sqlx::query("DELETE FROM sqlite_sequence WHERE name = 'animals'")
            .execute(&mut *tx)
            .await?;

        let mut inserted = 0;
        for animal in animals {
            insert(&mut tx, animal, name_taken).await?;
            inserted += 1;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    async fn health_check(&self) -> Result<()> {
        db::health_check(&self.pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_animals;

    async fn seeded() -> SqlAnimalStore {
        let pool = db::create_memory_pool().await.unwrap();
        db::run_migrations(&pool).await.unwrap();
        let store = SqlAnimalStore::new(pool);
        store.replace_all(seed_animals()).await.unwrap();
        store
    }

    fn new_animal(name: &str) -> NewAnimal {
        NewAnimal {
            name: name.to_string(),
            race: Race::Duck,
            status: Status::Alive,
            birth_date: 2019,
            created_at: chrono::Utc::now().naive_utc(),
        }
    }

    #[tokio::test]
    async fn test_list_all_ordered() {
        let store = seeded().await;
        let animals = store.list(&AnimalFilter::default()).await.unwrap();
        assert_eq!(animals.len(), 6);
        let ids: Vec<i64> = animals.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(animals[0].created_at.to_string(), "2003-01-01 10:00:00");
    }

    #[tokio::test]
    async fn test_list_filters() {
        let store = seeded().await;

        let cows = store
            .list(&AnimalFilter {
                race: Some(Race::Cow),
                status: None,
            })
            .await
            .unwrap();
        assert_eq!(cows.len(), 2);
        assert!(cows.iter().all(|a| a.race == Race::Cow));

        let live_chickens = store
            .list(&AnimalFilter {
                race: Some(Race::Chicken),
                status: Some(Status::Alive),
            })
            .await
            .unwrap();
        assert_eq!(live_chickens.len(), 2);

        let dogs = store
            .list(&AnimalFilter {
                race: Some(Race::Dog),
                status: None,
            })
            .await
            .unwrap();
        assert!(dogs.is_empty());
    }

    #[tokio::test]
    async fn test_get() {
        let store = seeded().await;
        let animal = store.get(4).await.unwrap();
        assert_eq!(animal.name, "Moo-gnificent");
        assert_eq!(animal.race, Race::Cow);
        assert!(matches!(store.get(404).await, Err(FarmError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_and_duplicate() {
        let store = seeded().await;

        let animal = store.create(new_animal("Donald")).await.unwrap();
        assert_eq!(animal.id, 7);
        assert_eq!(store.get(7).await.unwrap(), animal);

        let err = store.create(new_animal("Donald")).await.unwrap_err();
        assert!(matches!(err, FarmError::Validation(_)));
        assert!(err.to_string().contains("id: 7"));
    }

    #[tokio::test]
    async fn test_insert_created_name_collision() {
        let store = seeded().await;
        let mut conn = store.pool().acquire().await.unwrap();

        let err = insert_created(&mut conn, new_animal("Moo-tiful"))
            .await
            .unwrap_err();
        assert!(matches!(err, FarmError::Validation(_)));
        assert_eq!(err.to_string(), "An animal named 'Moo-tiful' already exists");
    }

    #[tokio::test]
    async fn test_update() {
        let store = seeded().await;
        let before = store.get(2).await.unwrap();

        let updated = store
            .update(
                2,
                AnimalChanges {
                    name: Some("Hen Solo".to_string()),
                    birth_date: Some(2010),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Hen Solo");
        assert_eq!(updated.birth_date, 2010);
        assert_eq!(updated.race, before.race);
        assert_eq!(updated.created_at, before.created_at);
        assert_eq!(store.get(2).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_errors() {
        let store = seeded().await;

        let result = store.update(99, AnimalChanges::default()).await;
        assert!(matches!(result, Err(FarmError::NotFound(_))));

        let rename = AnimalChanges {
            name: Some("Moo-tiful".to_string()),
            ..Default::default()
        };
        let result = store.update(4, rename).await;
        assert!(matches!(result, Err(FarmError::Validation(_))));
        assert_eq!(store.get(4).await.unwrap().name, "Moo-gnificent");

        let same_name = AnimalChanges {
            name: Some("Moo-tiful".to_string()),
            ..Default::default()
        };
        assert!(store.update(5, same_name).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete() {
        let store = seeded().await;
        store.delete(1).await.unwrap();
        assert!(matches!(store.get(1).await, Err(FarmError::NotFound(_))));
        assert!(matches!(store.delete(1).await, Err(FarmError::NotFound(_))));
        assert_eq!(store.list(&AnimalFilter::default()).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_replace_all_restarts_ids() {
        let store = seeded().await;
        store.create(new_animal("Daffy")).await.unwrap();

        let inserted = store.replace_all(seed_animals()).await.unwrap();
        assert_eq!(inserted, 6);

        let animals = store.list(&AnimalFilter::default()).await.unwrap();
        assert_eq!(animals.len(), 6);
        assert_eq!(animals[0].id, 1);
    }

    #[tokio::test]
    async fn test_replace_all_rejects_duplicate_names() {
        let store = seeded().await;

        let err = store
            .replace_all(vec![new_animal("Twin"), new_animal("Twin")])
            .await
            .unwrap_err();
        assert!(matches!(err, FarmError::Validation(_)));
        assert_eq!(err.to_string(), "Another animal already uses the name 'Twin'");

        let animals = store.list(&AnimalFilter::default()).await.unwrap();
        assert_eq!(animals.len(), 6);
        assert_eq!(animals[0].name, "Obi-Wan Henobi");
    }

    #[tokio::test]
    async fn test_unknown_race_in_table() {
        let store = seeded().await;
        sqlx::query("UPDATE animals SET race = 'Dragon' WHERE id = 1")
            .execute(store.pool())
            .await
            .unwrap();
        assert!(matches!(store.get(1).await, Err(FarmError::Internal(_))));
    }

    #[tokio::test]
    async fn test_health_check() {
        let store = seeded().await;
        store.health_check().await.unwrap();
    }
}
