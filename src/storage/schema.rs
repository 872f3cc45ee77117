//! Database schema definitions.

use crate::storage::StorageError;
use crate::storage::db::SqlitePool;

/// SQL statement for creating the people table.
///
/// `AUTOINCREMENT` guarantees ids are never reused, even after deletion at
/// the SQL level. `age` is the only nullable column.
pub const PEOPLE_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS people (
    id                          INTEGER PRIMARY KEY AUTOINCREMENT,
    survived                    INTEGER NOT NULL,
    passenger_class             INTEGER NOT NULL,
    name                        TEXT NOT NULL,
    sex                         TEXT NOT NULL,
    age                         REAL,
    siblings_or_spouses_aboard  INTEGER NOT NULL,
    parents_or_children_aboard  INTEGER NOT NULL,
    fare                        REAL NOT NULL
);
"#;

/// Initialize the database schema.
///
/// Creates all necessary tables if they don't exist.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), StorageError> {
    sqlx::query(PEOPLE_TABLE_DDL).execute(pool.inner()).await?;

    tracing::info!("Database schema initialized");
    Ok(())
}
