//! Person storage.
//!
//! Provides the create and list operations for passenger records.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::storage::StorageError;
use crate::storage::db::SqlitePool;

// =============================================================================
// Types
// =============================================================================

/// A passenger record persisted in the `people` table.
///
/// JSON field names are camelCase to match the wire format, e.g.
/// `passengerClass` and `siblingsOrSpousesAboard`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Database ID, assigned on insert and never reused.
    pub id: i64,
    /// Survival flag (0 or 1).
    pub survived: i64,
    /// Ticket class (1-3 by convention, not enforced).
    pub passenger_class: i64,
    /// Passenger name.
    pub name: String,
    /// Passenger sex ("male"/"female" by convention, not enforced).
    pub sex: String,
    /// Age in years, unknown for some passengers.
    pub age: Option<f64>,
    /// Number of siblings or spouses aboard.
    pub siblings_or_spouses_aboard: i64,
    /// Number of parents or children aboard.
    pub parents_or_children_aboard: i64,
    /// Ticket fare.
    pub fare: f64,
}

/// Creation payload for a passenger record.
///
/// Same shape as [`Person`] minus the store-assigned `id`. All fields are
/// required except `age`. Deserialization rejects missing or malformed
/// fields before the storage layer is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerson {
    pub survived: i64,
    pub passenger_class: i64,
    pub name: String,
    pub sex: String,
    #[serde(default)]
    pub age: Option<f64>,
    pub siblings_or_spouses_aboard: i64,
    pub parents_or_children_aboard: i64,
    pub fare: f64,
}

// =============================================================================
// Person Store
// =============================================================================

/// Storage facade for passenger records.
#[derive(Clone)]
pub struct PersonStore {
    pool: SqlitePool,
}

impl std::fmt::Debug for PersonStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonStore").finish_non_exhaustive()
    }
}

impl PersonStore {
    /// Create a new person store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all passenger records in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Person>, StorageError> {
        let people = sqlx::query_as::<_, Person>(
            "SELECT id, survived, passenger_class, name, sex, age,
                    siblings_or_spouses_aboard, parents_or_children_aboard, fare
             FROM people ORDER BY id",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(people)
    }

    /// Insert a new passenger record.
    ///
    /// The store assigns the `id`; the persisted record is returned.
    pub async fn create(&self, new: NewPerson) -> Result<Person, StorageError> {
        let person = sqlx::query_as::<_, Person>(
            "INSERT INTO people
                 (survived, passenger_class, name, sex, age,
                  siblings_or_spouses_aboard, parents_or_children_aboard, fare)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, survived, passenger_class, name, sex, age,
                       siblings_or_spouses_aboard, parents_or_children_aboard, fare",
        )
        .bind(new.survived)
        .bind(new.passenger_class)
        .bind(&new.name)
        .bind(&new.sex)
        .bind(new.age)
        .bind(new.siblings_or_spouses_aboard)
        .bind(new.parents_or_children_aboard)
        .bind(new.fare)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(person)
    }

    /// Count passenger records. Used by the readiness probe.
    pub async fn count(&self) -> Result<i64, StorageError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM people")
            .fetch_one(self.pool.inner())
            .await?;

        Ok(row.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::schema::init_schema;

    async fn create_test_store() -> PersonStore {
        let pool = SqlitePool::connect_with_size("sqlite::memory:", 1)
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        PersonStore::new(pool)
    }

    fn sample_person() -> NewPerson {
        NewPerson {
            survived: 1,
            passenger_class: 1,
            name: "Test Person".to_string(),
            sex: "male".to_string(),
            age: Some(30.0),
            siblings_or_spouses_aboard: 0,
            parents_or_children_aboard: 0,
            fare: 50.0,
        }
    }

    #[tokio::test]
    async fn test_list_empty() {
        let store = create_test_store().await;
        let people = store.list_all().await.unwrap();
        assert!(people.is_empty());
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let store = create_test_store().await;

        let created = store.create(sample_person()).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(created.name, "Test Person");
        assert_eq!(created.age, Some(30.0));

        let people = store.list_all().await.unwrap();
        assert_eq!(people.len(), 1);
        assert_eq!(people[0], created);
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let store = create_test_store().await;

        let first = store.create(sample_person()).await.unwrap();
        let second = store.create(sample_person()).await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_create_with_null_age() {
        let store = create_test_store().await;

        let mut new = sample_person();
        new.age = None;
        let created = store.create(new).await.unwrap();
        assert_eq!(created.age, None);

        let people = store.list_all().await.unwrap();
        assert_eq!(people[0].age, None);
    }

    #[tokio::test]
    async fn test_count() {
        let store = create_test_store().await;
        assert_eq!(store.count().await.unwrap(), 0);

        store.create(sample_person()).await.unwrap();
        store.create(sample_person()).await.unwrap();
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[test]
    fn test_person_json_field_names() {
        let new: NewPerson = serde_json::from_value(serde_json::json!({
            "survived": 1,
            "passengerClass": 3,
            "name": "Jane",
            "sex": "female",
            "age": 27.5,
            "siblingsOrSpousesAboard": 1,
            "parentsOrChildrenAboard": 2,
            "fare": 7.25
        }))
        .unwrap();
        assert_eq!(new.passenger_class, 3);
        assert_eq!(new.siblings_or_spouses_aboard, 1);

        let person = Person {
            id: 9,
            survived: new.survived,
            passenger_class: new.passenger_class,
            name: new.name.clone(),
            sex: new.sex.clone(),
            age: new.age,
            siblings_or_spouses_aboard: new.siblings_or_spouses_aboard,
            parents_or_children_aboard: new.parents_or_children_aboard,
            fare: new.fare,
        };
        let value = serde_json::to_value(&person).unwrap();
        assert_eq!(value["id"], 9);
        assert_eq!(value["passengerClass"], 3);
        assert_eq!(value["parentsOrChildrenAboard"], 2);
    }

    #[test]
    fn test_new_person_requires_fields() {
        // Missing `name` must be rejected at deserialization time
        let result: Result<NewPerson, _> = serde_json::from_value(serde_json::json!({
            "survived": 1,
            "passengerClass": 3,
            "sex": "female",
            "siblingsOrSpousesAboard": 0,
            "parentsOrChildrenAboard": 0,
            "fare": 7.25
        }));
        assert!(result.is_err());

        // Missing `age` is fine
        let result: Result<NewPerson, _> = serde_json::from_value(serde_json::json!({
            "survived": 0,
            "passengerClass": 2,
            "name": "John",
            "sex": "male",
            "siblingsOrSpousesAboard": 0,
            "parentsOrChildrenAboard": 0,
            "fare": 13.0
        }));
        assert_eq!(result.unwrap().age, None);
    }
}
