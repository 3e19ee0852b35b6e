//! Database connection management

pub mod schema;

use crate::config::StoreConfig;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// PostgreSQL database connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool with default settings
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        Self::connect_with(database_url, &StoreConfig::default()).await
    }

    /// Create a new database connection pool sized from config
    pub async fn connect_with(database_url: &str, config: &StoreConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(database_url)
            .await?;

        tracing::info!(
            max_connections = config.max_connections,
            "PostgreSQL connection pool established"
        );
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the ledger tables if they do not exist yet
    pub async fn init_schema(&self) -> Result<(), sqlx::Error> {
        schema::apply(&self.pool).await
    }
}
