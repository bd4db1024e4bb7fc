//! Application configuration management

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, Result, bail};

use crate::services::pubsub::DEFAULT_CHANNEL_CAPACITY;

/// Default SQLite database location
pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/navmap.db";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line
    Json,
    /// Human-readable, for local development
    Pretty,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind
    pub host: String,

    /// Server port
    pub port: u16,

    /// SQLite connection URL (`sqlite:<path>` or `sqlite::memory:`)
    pub database_url: String,

    /// Upper bound of the connection pool
    pub database_max_connections: u32,

    /// Per-topic buffer of the subscription broadcast channels
    pub broadcast_capacity: usize,

    /// bcrypt work factor for password hashes
    pub bcrypt_cost: u32,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source
    pub fn from_source(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // Prefer DATABASE_PATH (a plain file path), fall back to DATABASE_URL
        let database_url = match get("DATABASE_PATH").or_else(|| get("DATABASE_URL")) {
            Some(value) if value.starts_with("sqlite:") => value,
            Some(path) => format!("sqlite:{}", path),
            None => DEFAULT_DATABASE_URL.to_string(),
        };

        let log_format = match get("LOG_FORMAT").as_deref() {
            None | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => bail!("Invalid LOG_FORMAT '{}': expected 'json' or 'pretty'", other),
        };

        let broadcast_capacity: usize =
            parse_or(&get, "BROADCAST_CAPACITY", DEFAULT_CHANNEL_CAPACITY)?;
        if broadcast_capacity == 0 {
            bail!("BROADCAST_CAPACITY must be greater than zero");
        }

        Ok(Self {
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&get, "PORT", 4000)?,
            database_url,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10)?,
            broadcast_capacity,
            bcrypt_cost: parse_or(&get, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            log_format,
        })
    }

    /// Socket address to listen on
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid HOST/PORT '{}:{}'", self.host, self.port))
    }
}

fn parse_or<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} '{}'", key, value)),
        None => Ok(default),
    }
}
