//! # Client Configuration
//!
//! Configuration management for the admin client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     INVENTARIO_API_URL=http://api.local:3000                           │
//! │     INVENTARIO_AUTH_MODE=token                                         │
//! │     INVENTARIO_STORAGE_DIR=/tmp/inventario                             │
//! │     INVENTARIO_REDIRECT_DELAY_MS=2000                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/admin/client.toml (Linux)                                │
//! │     ~/Library/Application Support/com.inventario.admin/client.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3000, legacy scan login                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # client.toml
//! [api]
//! base_url = "http://localhost:3000"
//! timeout_secs = 30
//!
//! [auth]
//! mode = "legacy_scan"  # legacy_scan | token
//! login_path = "auth/login"
//! resolve_role_references = false
//! redirect_delay_ms = 0
//!
//! [ui]
//! notification_life_ms = 3000
//! page_size = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use inventario_core::{DEFAULT_PAGE_SIZE, NOTIFICATION_LIFE_MS};

use crate::error::{ClientError, ClientResult};

/// Backend origin used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

// =============================================================================
// Auth Mode
// =============================================================================

/// How a login is verified.
///
/// ## Mode Selection
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LEGACY_SCAN (Default)                                                  │
/// │  ─────────────────────                                                  │
/// │  • GET {origin}/usuarios, compared client-side                          │
/// │  • Works against the plain resource backend (no login endpoint)         │
/// │  • Every stored credential is downloaded to the client                  │
/// │                                                                         │
/// │  TOKEN (opt-in)                                                         │
/// │  ──────────────                                                         │
/// │  • POST {origin}/auth/login { email, password }                         │
/// │  • Backend checks the secret and returns a bearer token                 │
/// │  • The user collection never leaves the server                          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthMode {
    Token,
    #[default]
    LegacyScan,
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthMode::Token => write!(f, "token"),
            AuthMode::LegacyScan => write!(f, "legacy_scan"),
        }
    }
}

impl std::str::FromStr for AuthMode {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "token" | "jwt" => Ok(AuthMode::Token),
            "legacy_scan" | "legacy-scan" | "legacy" | "scan" => Ok(AuthMode::LegacyScan),
            other => Err(ClientError::InvalidConfig(format!(
                "Unknown auth mode: '{}'. Valid options: token, legacy_scan",
                other
            ))),
        }
    }
}

// =============================================================================
// API Settings
// =============================================================================

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Backend origin. Requests go to `{base_url}/{resource}[/{id}]`.
    #[serde(default = "default_api_url")]
    pub base_url: String,

    /// Whole-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_connect_timeout() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_api_url(),
            timeout_secs: default_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

// =============================================================================
// Auth Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    #[serde(default)]
    pub mode: AuthMode,

    /// Login endpoint path under the origin (token mode).
    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Name bare `{ "id": n }` role references from the `roles` catalogue
    /// at login. Off: bare references never count as admin.
    #[serde(default)]
    pub resolve_role_references: bool,

    /// Pause before the post-login navigation (milliseconds).
    #[serde(default)]
    pub redirect_delay_ms: u64,
}

fn default_login_path() -> String {
    "auth/login".to_string()
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            mode: AuthMode::default(),
            login_path: default_login_path(),
            resolve_role_references: false,
            redirect_delay_ms: 0,
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Directory holding the session record. Defaults to the platform data
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

// =============================================================================
// UI Settings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    #[serde(default = "default_notification_life")]
    pub notification_life_ms: u64,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_notification_life() -> u64 {
    NOTIFICATION_LIFE_MS
}
fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for UiSettings {
    fn default() -> Self {
        UiSettings {
            notification_life_ms: default_notification_life(),
            page_size: default_page_size(),
        }
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub ui: UiSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (client.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::from_file(config_path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            let mut config = Self::default();
            config.apply_env_overrides();
            if let Err(e) = config.validate() {
                warn!("Environment overrides rejected: {}. Using defaults.", e);
                return Self::default();
            }
            config
        })
    }

    /// Reads the file layer only (defaults + TOML). Used by commands that
    /// edit and re-save the file without baking environment values into it.
    pub fn from_file(config_path: Option<PathBuf>) -> ClientResult<Self> {
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                return Ok(toml::from_str(&contents)?);
            }
            debug!(?path, "Config file not found, using defaults");
        }
        Ok(Self::default())
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.auth.login_path.trim_matches('/').is_empty() {
            return Err(ClientError::InvalidConfig("login_path must not be empty".into()));
        }

        if self.ui.page_size == 0 {
            return Err(ClientError::InvalidConfig(
                "page_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("INVENTARIO_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(mode) = lookup("INVENTARIO_AUTH_MODE") {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding auth mode from environment");
                    self.auth.mode = parsed;
                }
                Err(_) => warn!(mode = %mode, "Unknown auth mode in environment"),
            }
        }

        if let Some(dir) = lookup("INVENTARIO_STORAGE_DIR") {
            self.storage.dir = Some(PathBuf::from(dir));
        }

        if let Some(delay) = lookup("INVENTARIO_REDIRECT_DELAY_MS") {
            if let Ok(ms) = delay.parse::<u64>() {
                self.auth.redirect_delay_ms = ms;
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "inventario", "admin")
            .map(|dirs| dirs.config_dir().join("client.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Directory of the durable session record.
    pub fn storage_dir(&self) -> ClientResult<PathBuf> {
        if let Some(dir) = &self.storage.dir {
            return Ok(dir.clone());
        }
        directories::ProjectDirs::from("com", "inventario", "admin")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| ClientError::Storage("No storage directory available".into()))
    }

    pub fn redirect_delay(&self) -> Duration {
        Duration::from_millis(self.auth.redirect_delay_ms)
    }

    pub fn auth_mode(&self) -> AuthMode {
        self.auth.mode
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }
}
