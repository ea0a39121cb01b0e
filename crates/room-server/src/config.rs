//! Configuration for the room TCP server.
//!
//! Sources, later ones winning:
//!
//! - built-in defaults
//! - an optional TOML file (see [`Config::load`])
//! - environment variables:
//!   - `ROOM_BIND_ADDR`   (default: "0.0.0.0")
//!   - `PORT` / `ROOM_PORT` (default: "3000"; `ROOM_PORT` wins if both are set)
//!   - `ROOM_MAX_CLIENTS` (default: "1024")
//!   - `ROOM_DEFAULT`     (default: "default")
//! - command-line flags, applied by `main`

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on. `0` lets the OS choose.
    pub port: u16,

    /// Maximum number of simultaneously connected clients.
    pub max_clients: usize,

    /// Room joined by clients whose handshake names none.
    pub default_room: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            max_clients: 1024,
            default_room: room_core::DEFAULT_ROOM.to_string(),
        }
    }
}

impl Config {
    /// Read an optional TOML file, then apply environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let base = match path {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::default(),
        };
        base.with_env()
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Config::from_toml_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    fn with_env(self) -> Result<Self> {
        let bind_addr = env::var("ROOM_BIND_ADDR").unwrap_or(self.bind_addr);
        let port = read_env_or("PORT", self.port)?;
        let port = read_env_or("ROOM_PORT", port)?;
        let max_clients = read_env_or("ROOM_MAX_CLIENTS", self.max_clients)?;
        let default_room = env::var("ROOM_DEFAULT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or(self.default_room);

        Ok(Config {
            bind_addr,
            port,
            max_clients,
            default_room,
        })
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_env_or<T>(key: &str, current: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val
            .parse::<T>()
            .with_context(|| format!("invalid value for {key}: {val:?}")),
        Err(_) => Ok(current),
    }
}
