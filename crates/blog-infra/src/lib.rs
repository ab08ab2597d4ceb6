//! # Blog Infrastructure
//!
//! Concrete implementations of the storage ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `sqlite` - File-based SQLite storage via SeaORM

pub mod database;

pub use database::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "sqlite")]
pub use database::{DatabaseHandle, SqlPostRepository};
