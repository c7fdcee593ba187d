//! # Configuration State
//!
//! The loaded client configuration plus where it came from.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`INVENTARIO_*`)
//! 2. Config file (`--config` or the platform default `client.toml`)
//! 3. Defaults

use std::path::PathBuf;

use inventario_client::ClientConfig;

use crate::error::{ApiError, ApiResult, ErrorCode};

#[derive(Debug, Clone)]
pub struct ConfigState {
    pub config: ClientConfig,

    /// Explicit `--config` path, if given.
    pub path: Option<PathBuf>,
}

impl ConfigState {
    /// Loads the effective configuration. A broken file is an error here
    /// rather than a silent fallback, so `config set-url` never overwrites
    /// a file it could not read.
    pub fn load(path: Option<PathBuf>) -> ApiResult<Self> {
        let config = ClientConfig::load(path.clone())?;
        Ok(ConfigState { config, path })
    }

    pub fn from_config(config: ClientConfig) -> Self {
        ConfigState { config, path: None }
    }

    /// File the configuration is read from and saved to.
    pub fn file_path(&self) -> ApiResult<PathBuf> {
        self.path
            .clone()
            .or_else(ClientConfig::default_config_path)
            .ok_or_else(|| ApiError::new(ErrorCode::ConfigError, "No config path available"))
    }
}
