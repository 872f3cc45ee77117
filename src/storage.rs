//! Storage Layer
//!
//! SQLite-backed persistence for passenger records, accessed through a
//! sqlx connection pool.
//!
//! # Components
//!
//! - [`PersonStore`]: CRUD facade for the `people` table
//! - [`StorageBuilder`] / [`StorageHandles`]: Initialization and lifecycle management
//! - [`SqlitePool`]: Connection pool wrapper

mod builder;
pub mod db;
mod error;
pub mod people;
pub mod schema;

pub use builder::{StorageBuilder, StorageHandles};
pub use db::SqlitePool;
pub use error::StorageError;
pub use people::{NewPerson, Person, PersonStore};
