//! # Config Commands
//!
//! Read and edit the client configuration. None of these touch the
//! network or the session.

use std::path::PathBuf;

use tracing::{debug, info};

use inventario_client::ClientConfig;

use crate::error::{ApiError, ApiResult, ErrorCode};
use crate::state::ConfigState;

/// The effective configuration (file + environment) as TOML.
pub fn show(state: &ConfigState) -> ApiResult<String> {
    debug!("config show command");
    toml::to_string_pretty(&state.config)
        .map_err(|e| ApiError::new(ErrorCode::ConfigError, e.to_string()))
}

pub fn path(state: &ConfigState) -> ApiResult<PathBuf> {
    state.file_path()
}

/// Writes a new backend origin into the config file.
///
/// Only the file layer is rewritten, so environment overrides active in
/// this shell are not baked into the file.
pub fn set_url(state: &ConfigState, url: &str) -> ApiResult<PathBuf> {
    let path = state.file_path()?;
    let mut config = ClientConfig::from_file(Some(path.clone()))?;
    config.api.base_url = url.trim().to_string();
    config.validate()?;

    let saved = config.save(Some(path))?;
    info!(url = %config.api.base_url, path = ?saved, "API URL updated");
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(dir: &tempfile::TempDir) -> ConfigState {
        ConfigState {
            config: ClientConfig::default(),
            path: Some(dir.path().join("client.toml")),
        }
    }

    #[test]
    fn test_set_url_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_at(&dir);

        let saved = set_url(&state, "https://inventario.example.com/api").unwrap();
        assert_eq!(saved, dir.path().join("client.toml"));

        let reread = ClientConfig::from_file(Some(saved)).unwrap();
        assert_eq!(reread.api.base_url, "https://inventario.example.com/api");
    }

    #[test]
    fn test_set_url_rejects_non_http() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_at(&dir);

        let err = set_url(&state, "ftp://example.com").unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert!(!dir.path().join("client.toml").exists());
    }

    #[test]
    fn test_show_renders_sections() {
        let text = show(&ConfigState::from_config(ClientConfig::default())).unwrap();
        assert!(text.contains("[api]"));
        assert!(text.contains("base_url = \"http://localhost:3000\""));
        assert!(text.contains("[auth]"));
    }
}
