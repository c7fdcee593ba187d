//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Backend failure? ─── ClientError::Http { 404, .. } ──┐         │  │
//! │  │         │                                             │         │  │
//! │  │         ▼                                             ▼         │  │
//! │  │  Login rejected? ─── AuthError::AccountInactive ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ApiError renders as an error notification on stderr, or as             │
//! │  { "code": "ACCOUNT_INACTIVE", "message": "..." } with -o json.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;

use inventario_client::ClientError;
use inventario_core::error::{AuthError, CoreError, ValidationError};
use inventario_core::notification::Notification;

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error returned from CLI commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NETWORK_FAILURE",
///   "message": "Request failed: 500 Internal Server Error"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes, one per failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Non-2xx answer or no answer at all
    NetworkFailure,

    /// Record id does not exist (404)
    NotFound,

    UserNotFound,
    AccountInactive,
    InvalidCredential,
    NoRoleAssigned,

    /// Command needs a session
    NotAuthenticated,

    /// Session lacks the administrator role
    AccessDenied,

    /// Login discarded because the session changed meanwhile
    Superseded,

    /// Payload presence check failed
    ValidationError,

    /// Unknown resource or route name
    UnknownName,

    /// Configuration could not be loaded, validated or saved
    ConfigError,

    /// Durable session storage failed
    StorageError,

    /// Terminal or file input failed
    InputError,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn input(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InputError, message)
    }

    /// The transient notification this failure is surfaced as.
    pub fn to_notification(&self, life_ms: u64) -> Notification {
        Notification::error(self.message.clone()).with_life(life_ms)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let code = match err {
            AuthError::UserNotFound => ErrorCode::UserNotFound,
            AuthError::AccountInactive => ErrorCode::AccountInactive,
            AuthError::InvalidCredential => ErrorCode::InvalidCredential,
            AuthError::NoRoleAssigned => ErrorCode::NoRoleAssigned,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Auth(e) => e.into(),
            CoreError::Validation(e) => e.into(),
            CoreError::UnknownResource(_) | CoreError::UnknownRoute(_) => {
                ApiError::new(ErrorCode::UnknownName, err.to_string())
            }
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Auth(e) => e.into(),
            ClientError::Validation(e) => e.into(),
            ClientError::Core(e) => e.into(),
            ClientError::Http { status: 404, .. } => {
                ApiError::new(ErrorCode::NotFound, err.to_string())
            }
            ClientError::NotAuthenticated => {
                ApiError::new(ErrorCode::NotAuthenticated, err.to_string())
            }
            ClientError::AccessDenied { .. } => {
                ApiError::new(ErrorCode::AccessDenied, err.to_string())
            }
            ClientError::Superseded => ApiError::new(ErrorCode::Superseded, err.to_string()),
            ClientError::Storage(ref e) => {
                tracing::error!("Session storage failed: {}", e);
                ApiError::new(ErrorCode::StorageError, err.to_string())
            }
            ref e if e.is_config_error() => ApiError::new(ErrorCode::ConfigError, err.to_string()),
            ref e if e.is_network_failure() => {
                ApiError::new(ErrorCode::NetworkFailure, err.to_string())
            }
            other => {
                tracing::error!("Unexpected client error: {}", other);
                ApiError::new(ErrorCode::NetworkFailure, other.to_string())
            }
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::input(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use inventario_core::navigation::Route;
    use inventario_core::notification::Severity;

    #[test]
    fn test_auth_reasons_keep_their_code() {
        let err: ApiError = ClientError::Auth(AuthError::AccountInactive).into();
        assert_eq!(err.code, ErrorCode::AccountInactive);
        assert_eq!(err.message, "The user is inactive. Contact an administrator.");
    }

    #[test]
    fn test_http_failures() {
        let err: ApiError = ClientError::Http {
            status: 500,
            status_text: "Internal Server Error".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NetworkFailure);
        assert_eq!(err.message, "Request failed: 500 Internal Server Error");

        let err: ApiError = ClientError::Http {
            status: 404,
            status_text: "Not Found".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = ClientError::Transport("connection refused".into()).into();
        assert_eq!(err.code, ErrorCode::NetworkFailure);
    }

    #[test]
    fn test_gate_errors() {
        let err: ApiError = ClientError::AccessDenied {
            route: Route::Usuarios,
        }
        .into();
        assert_eq!(err.code, ErrorCode::AccessDenied);

        let err: ApiError = ClientError::NotAuthenticated.into();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[test]
    fn test_config_errors() {
        let err: ApiError = ClientError::InvalidUrl("nope".into()).into();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::validation("fecha_entrega is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "fecha_entrega is required");
    }

    #[test]
    fn test_notification_is_transient_error() {
        let n = ApiError::validation("x").to_notification(3000);
        assert_eq!(n.severity, Severity::Error);
        assert_eq!(n.summary, "Error");
        assert_eq!(n.life_ms, 3000);
    }
}
