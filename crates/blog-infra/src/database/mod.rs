//! Post storage: SQLite through SeaORM, with an in-memory fallback.

mod connections;
mod memory;

#[cfg(feature = "sqlite")]
mod sql_base;
#[cfg(feature = "sqlite")]
pub mod sql_repo;

#[cfg(feature = "sqlite")]
pub mod entity;

pub use connections::DatabaseConfig;
pub use memory::InMemoryPostRepository;

#[cfg(feature = "sqlite")]
pub use connections::DatabaseHandle;
#[cfg(feature = "sqlite")]
pub use sql_repo::SqlPostRepository;
