#[cfg(feature = "sqlite")]
use std::time::Duration;

#[cfg(feature = "sqlite")]
use sea_orm::{ConnectOptions, Database, DbConn, DbErr};

/// File created next to the working directory when no URL is configured.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://blog.db?mode=rwc";

/// Configuration for the posts database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 5,
            min_connections: 1,
        }
    }
}

/// Storage handle shared by request handlers.
///
/// Wraps a connection pool: every query checks a connection out and returns
/// it when the query finishes, whether it succeeded or not.
#[cfg(feature = "sqlite")]
#[derive(Debug)]
pub struct DatabaseHandle {
    pub conn: DbConn,
}

#[cfg(feature = "sqlite")]
impl DatabaseHandle {
    /// Open the pool described by `config`.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        tracing::info!("Opening database at {}", config.url);

        let opts = ConnectOptions::new(&config.url)
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(true)
            .to_owned();

        let conn = Database::connect(opts).await?;
        tracing::info!(
            "Database connected (pool: {}..{})",
            config.min_connections,
            config.max_connections
        );

        Ok(Self { conn })
    }
}
