//! # Client Error Types
//!
//! Error types for network, storage and configuration operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Network      │  │     Authentication      │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Http           │  │  Auth (reason)          │ │
//! │  │  InvalidUrl     │  │  Transport      │  │  NotAuthenticated       │ │
//! │  │  ConfigLoad/Save│  │  Decode         │  │  AccessDenied           │ │
//! │  └─────────────────┘  └─────────────────┘  │  Superseded             │ │
//! │                                             └─────────────────────────┘ │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │    Storage      │  │     Domain      │                              │
//! │  │                 │  │                 │                              │
//! │  │  Storage        │  │  Validation     │                              │
//! │  │                 │  │  Core           │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is retried. Every error is reported once, at the operation
//! that failed.

use inventario_core::error::{AuthError, CoreError, ValidationError};
use inventario_core::navigation::Route;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering every failure of the I/O layer.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid backend URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Network Errors
    // =========================================================================
    /// The backend answered with a non-2xx status.
    #[error("Request failed: {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// The request never got an answer (connection refused, timeout, TLS).
    #[error("Network error: {0}")]
    Transport(String),

    /// The answer was not the expected JSON shape.
    #[error("Unexpected response: {0}")]
    Decode(String),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    /// Login rejected.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The operation needs a session and none is held.
    #[error("Not logged in. Run `login` first.")]
    NotAuthenticated,

    /// The session's roles do not open this route.
    #[error("Access to {route} requires the administrator role")]
    AccessDenied { route: Route },

    /// A logout or a newer login started while this login was in flight.
    #[error("Login was superseded by a newer session change")]
    Superseded,

    // =========================================================================
    // Storage Errors
    // =========================================================================
    /// Durable session storage failed.
    #[error("Session storage error: {0}")]
    Storage(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Payload presence check failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Any other domain error (unknown resource, unknown route).
    #[error(transparent)]
    Core(CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Auth(auth) => ClientError::Auth(auth),
            CoreError::Validation(validation) => ClientError::Validation(validation),
            other => ClientError::Core(other),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Returns true for the NetworkFailure category: non-2xx answers,
    /// transport failures and undecodable bodies.
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Http { .. } | ClientError::Transport(_) | ClientError::Decode(_)
        )
    }

    /// Returns true if a login was rejected or a session is missing.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Auth(_)
                | ClientError::NotAuthenticated
                | ClientError::AccessDenied { .. }
                | ClientError::Superseded
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    /// The login rejection reason, if this is one.
    pub fn auth_reason(&self) -> Option<AuthError> {
        match self {
            ClientError::Auth(reason) => Some(*reason),
            _ => None,
        }
    }

    /// HTTP status of a non-2xx answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let http = ClientError::Http {
            status: 500,
            status_text: "Internal Server Error".into(),
        };
        assert!(http.is_network_failure());
        assert_eq!(http.status(), Some(500));
        assert!(!http.is_auth_failure());

        assert!(ClientError::Auth(AuthError::AccountInactive).is_auth_failure());
        assert!(ClientError::Superseded.is_auth_failure());
        assert!(ClientError::InvalidUrl("x".into()).is_config_error());
    }

    #[test]
    fn test_http_error_display() {
        let err = ClientError::Http {
            status: 404,
            status_text: "Not Found".into(),
        };
        assert_eq!(err.to_string(), "Request failed: 404 Not Found");
    }

    #[test]
    fn test_core_errors_keep_their_category() {
        let err: ClientError = CoreError::Auth(AuthError::UserNotFound).into();
        assert_eq!(err.auth_reason(), Some(AuthError::UserNotFound));

        let err: ClientError = CoreError::UnknownResource("facturas".into()).into();
        assert!(matches!(err, ClientError::Core(_)));
        assert_eq!(err.to_string(), "Unknown resource: facturas");
    }
}
