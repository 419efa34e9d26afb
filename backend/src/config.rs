//! Configuration loading.
//!
//! Values are resolved once at start-up in this priority order:
//! 1. Environment variables (`ECOLEDGER_HOST`, `ECOLEDGER_PORT`, `ECOLEDGER_DB`)
//! 2. TOML file (`ECOLEDGER_CONFIG`, or `./ecoledger.toml` when present)
//! 3. Compiled defaults
//!
//! The TOML file may also override single emission factor entries:
//!
//! ```toml
//! port = 9000
//!
//! [factors.energy]
//! factor = 0.19
//! source = "Supplier-specific tariff 2024"
//! ```

use crate::engine::factors::FactorOverride;
use crate::error::{ApiError, Result};
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_ENV: &str = "ECOLEDGER_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "ecoledger.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_path: PathBuf,
    /// Largest accepted CSV upload, in bytes.
    pub max_upload_bytes: usize,
    /// Emission factor overrides keyed by activity type label (or `fallback`).
    pub factors: HashMap<String, FactorOverride>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            database_path: PathBuf::from("ecoledger.sqlite"),
            max_upload_bytes: 10 * 1024 * 1024,
            factors: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration from the optional TOML file and the process environment.
    pub fn load() -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ApiError::Config(e.to_string()))
    }

    /// Applies `ECOLEDGER_*` overrides, reading values through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("ECOLEDGER_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("ECOLEDGER_PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ApiError::Config(format!("invalid ECOLEDGER_PORT '{}'", port)))?;
        }
        if let Some(db) = lookup("ECOLEDGER_DB") {
            self.database_path = PathBuf::from(db);
        }
        Ok(())
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}
