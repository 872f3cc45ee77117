//! Storage builder and handles.
//!
//! Provides a builder pattern for constructing the storage layer
//! and a handles struct for accessing the storage facades.

use crate::storage::StorageError;
use crate::storage::db::{DEFAULT_MAX_CONNECTIONS, SqlitePool};
use crate::storage::people::PersonStore;
use crate::storage::schema::init_schema;

/// Builder for constructing the storage layer.
pub struct StorageBuilder {
    db_url: String,
    pool_size: u32,
}

impl StorageBuilder {
    /// Create a new storage builder for the given connection URL.
    pub fn new(db_url: impl Into<String>) -> Self {
        Self {
            db_url: db_url.into(),
            pool_size: DEFAULT_MAX_CONNECTIONS,
        }
    }

    /// Set the connection pool size.
    pub fn pool_size(mut self, size: u32) -> Self {
        self.pool_size = size;
        self
    }

    /// Build the storage layer and return handles.
    ///
    /// Connects the pool and initializes the schema.
    pub async fn build(self) -> Result<StorageHandles, StorageError> {
        let pool = SqlitePool::connect_with_size(&self.db_url, self.pool_size).await?;
        init_schema(&pool).await?;

        Ok(StorageHandles {
            people: PersonStore::new(pool.clone()),
            pool,
        })
    }
}

/// Handles to the storage layer facades.
pub struct StorageHandles {
    /// Facade for passenger record operations.
    pub people: PersonStore,
    pool: SqlitePool,
}

impl StorageHandles {
    /// Gracefully shut down the storage layer.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
