//! Titanic API - Passenger Records Service
//!
//! This crate provides the core functionality for the Titanic passenger
//! API. It can be used as a library by other Rust projects, or run as a
//! standalone binary with the `titanic-api` executable.
//!
//! # Architecture
//!
//! - **Storage**: SQLite-based persistence layer for passenger records
//! - **Server**: Axum HTTP API (people resource, health probes, metrics)
//! - **Config**: Environment-profile configuration with YAML and env overrides
//! - **Metrics**: Prometheus exposition
//!
//! # Example
//!
//! ```rust,ignore
//! use titanic_api::server::{AppState, create_router};
//! use titanic_api::storage::StorageBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let handles = StorageBuilder::new("sqlite:people.db?mode=rwc")
//!         .build()
//!         .await?;
//!     let app = create_router(AppState { people: handles.people.clone() });
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod metrics;
pub mod server;
pub mod storage;

pub use config::{AppConfig, ConfigError, Environment};
pub use storage::{NewPerson, Person, PersonStore, StorageBuilder, StorageError, StorageHandles};
