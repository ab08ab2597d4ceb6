//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::PostRepository;
use blog_infra::{DatabaseConfig, InMemoryPostRepository};

#[cfg(feature = "sqlite")]
use blog_infra::{DatabaseHandle, SqlPostRepository};
#[cfg(feature = "sqlite")]
use migration::{DbErr, Migrator, MigratorTrait};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: &DatabaseConfig) -> Self {
        #[cfg(feature = "sqlite")]
        {
            match open_database(db_config).await {
                Ok(handle) => {
                    tracing::info!("Application state initialized");
                    return Self {
                        posts: Arc::new(SqlPostRepository::new(handle.conn)),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to open database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        }

        #[cfg(not(feature = "sqlite"))]
        tracing::info!(
            url = %db_config.url,
            "Running without sqlite feature - using in-memory repository"
        );

        Self::in_memory()
    }

    /// State backed by a fresh in-memory post table.
    pub fn in_memory() -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
        }
    }
}

/// Connect and bring the schema up to date, creating the posts table if absent.
#[cfg(feature = "sqlite")]
async fn open_database(config: &DatabaseConfig) -> Result<DatabaseHandle, DbErr> {
    let handle = DatabaseHandle::connect(config).await?;
    Migrator::up(&handle.conn, None).await?;
    tracing::info!("Database schema is up to date");
    Ok(handle)
}
