//! Server configuration from environment variables.
//!
//! - `DATABASE_URL`: Postgres connection string (optional)
//! - `ADVOCATE_BIND_ADDR`: listen address (default: 0.0.0.0:3000)
//! - `ADVOCATE_DB_MAX_CONNECTIONS`: pool size (default: 5)

use anyhow::{Context, Result};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `None` selects the fixture store.
    pub database_url: Option<String>,
    pub bind_addr: String,
    pub max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
        let bind_addr = lookup("ADVOCATE_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());
        let max_connections = match lookup("ADVOCATE_DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("ADVOCATE_DB_MAX_CONNECTIONS must be a number, got '{raw}'"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            bind_addr,
            max_connections,
        })
    }
}
