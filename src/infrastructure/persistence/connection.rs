//! SQLite connection pool

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::config::DatabaseConfig;
use crate::infrastructure::persistence::SqliteGameStore;

pub async fn connect(config: &DatabaseConfig) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)
        .with_context(|| format!("Invalid database url: {}", config.url))?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
        .with_context(|| format!("Failed to open database at {}", config.url))
}

/// Connect, create the schema and check that every table is there
pub async fn open_game_store(config: &DatabaseConfig) -> Result<SqliteGameStore> {
    let pool = connect(config).await?;
    let store = SqliteGameStore::new(pool)
        .await
        .context("Failed to initialize database schema")?;
    let missing = store
        .missing_tables()
        .await
        .context("Failed to inspect database schema")?;
    if !missing.is_empty() {
        anyhow::bail!("Database schema is missing tables: {}", missing.join(", "));
    }
    Ok(store)
}

/// A private in-memory database. One connection, kept alive for the whole
/// pool lifetime, since every new connection would see an empty database.
#[cfg(test)]
pub async fn connect_in_memory() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .unwrap()
}
