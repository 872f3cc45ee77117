//! Database abstraction layer.
//!
//! Currently supports SQLite. The abstraction is intentionally minimal:
//! `SqlitePool` wraps sqlx's pool with sensible defaults, and a future
//! `PostgresPool` would follow the same interface pattern.
//!
//! # Example
//!
//! ```ignore
//! let pool = SqlitePool::connect("sqlite:data/people.db?mode=rwc").await?;
//! let row = sqlx::query("SELECT 1").fetch_one(pool.inner()).await?;
//! ```

mod sqlite;

pub(crate) use sqlite::DEFAULT_MAX_CONNECTIONS;
pub use sqlite::SqlitePool;
