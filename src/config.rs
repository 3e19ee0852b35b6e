use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    /// Emit sqlx statement logs (otherwise sqlx is capped at WARN)
    #[serde(default)]
    pub log_statements: bool,
    /// PostgreSQL connection URL for the ledger store
    pub postgres_url: String,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Connection pool and transaction settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Upper bound for one unit of work; expiry rolls the transaction back
    #[serde(default)]
    pub tx_timeout_ms: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            acquire_timeout_secs: 5,
            tx_timeout_ms: None,
        }
    }
}

impl StoreConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn tx_timeout(&self) -> Option<Duration> {
        self.tx_timeout_ms.map(Duration::from_millis)
    }
}

impl AppConfig {
    /// Load `config/<env>.yaml`. `DATABASE_URL` overrides `postgres_url`.
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        let mut config = Self::from_yaml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path))?;

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.postgres_url = url;
        }
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse config yaml")
    }
}
