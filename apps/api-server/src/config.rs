//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use blog_infra::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source. Missing or unparsable
    /// values fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = DatabaseConfig::default();
        let database = DatabaseConfig {
            url: lookup("DATABASE_URL").unwrap_or(defaults.url),
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections),
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", defaults.min_connections),
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080),
            database,
            telemetry: TelemetryConfig::from_lookup(&lookup),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
