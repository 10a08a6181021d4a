//! Server configuration read from environment variables.
//!
//! | Variable         | Default     |
//! |------------------|-------------|
//! | `TODO_HOST`      | `127.0.0.1` |
//! | `PORT`           | `3000`      |
//! | `TODO_SEED_DEMO` | `true`      |
//! | `TODO_LOG`       | `info`      |
//!
//! `TODO_LOG` is only the fallback filter; `RUST_LOG` wins when set.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value {value:?} for {key}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub seed_demo: bool,
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            seed_demo: true,
            log_filter: "info".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("TODO_HOST") {
            config.host = value.parse().map_err(|e: std::net::AddrParseError| ConfigError {
                key: "TODO_HOST",
                reason: e.to_string(),
                value,
            })?;
        }
        if let Some(value) = lookup("PORT") {
            config.port = value.parse().map_err(|e: std::num::ParseIntError| ConfigError {
                key: "PORT",
                reason: e.to_string(),
                value,
            })?;
        }
        if let Some(value) = lookup("TODO_SEED_DEMO") {
            config.seed_demo = parse_bool("TODO_SEED_DEMO", value)?;
        }
        if let Some(value) = lookup("TODO_LOG") {
            config.log_filter = value;
        }
        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            key,
            value,
            reason: "expected a boolean".to_string(),
        }),
    }
}
