use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

use crate::store::persistence::DEFAULT_SLOT;
use crate::store::{JsonFileStorage, MemoryStorage, SeedPolicy, SnapshotStorage};

pub mod cors;
pub mod security;

pub use cors::{create_cors_layer, DEFAULT_ALLOWED_ORIGINS};
pub use security::apply_security_headers;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_PLACEHOLDER_CREATOR: &str = "user-123";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageKind::File),
            "memory" => Ok(StorageKind::Memory),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub storage: StorageKind,
    pub data_dir: PathBuf,
    pub storage_slot: String,
    pub seed_policy: SeedPolicy,
    /// Creator recorded for events posted over HTTP; there is no auth.
    pub placeholder_creator_id: String,
    pub cors_allowed_origins: String,
    pub production: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            bind_addr: parse("EVENTS_BIND_ADDR", get("EVENTS_BIND_ADDR", DEFAULT_BIND_ADDR))?,
            storage: parse("EVENTS_STORAGE", get("EVENTS_STORAGE", "file"))?,
            data_dir: PathBuf::from(get("EVENTS_DATA_DIR", DEFAULT_DATA_DIR)),
            storage_slot: get("EVENTS_STORAGE_SLOT", DEFAULT_SLOT),
            seed_policy: parse("EVENTS_SEED_POLICY", get("EVENTS_SEED_POLICY", "seed-on-empty"))?,
            placeholder_creator_id: get("EVENTS_PLACEHOLDER_CREATOR", DEFAULT_PLACEHOLDER_CREATOR),
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGINS),
            production: lookup("RUST_ENV")
                .map(|v| v.to_lowercase() == "production")
                .unwrap_or(false),
        })
    }

    pub fn build_storage(&self) -> Box<dyn SnapshotStorage> {
        match self.storage {
            StorageKind::File => {
                let storage = JsonFileStorage::new(&self.data_dir, self.storage_slot.clone());
                tracing::info!(path = %storage.path().display(), "Storage: JSON file slot");
                Box::new(storage)
            }
            StorageKind::Memory => {
                tracing::info!(slot = %self.storage_slot, "Storage: in-memory slot (not durable)");
                Box::new(MemoryStorage::new(self.storage_slot.clone()))
            }
        }
    }
}

fn parse<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
