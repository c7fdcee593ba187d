//! # Error Types
//!
//! Domain-specific error types for inventario-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  inventario-core errors (this file)                                    │
//! │  ├── AuthError        - Login rejections (the reason taxonomy)         │
//! │  ├── ValidationError  - Presence checks on form payloads               │
//! │  └── CoreError        - Umbrella for both + resource lookups           │
//! │                                                                         │
//! │  inventario-client errors (separate crate)                             │
//! │  └── ClientError      - Network, storage and config failures           │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the operator sees (code + message)        │
//! │                                                                         │
//! │  Flow: AuthError → ClientError → ApiError → Notification               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Auth Error
// =============================================================================

/// Reasons a login attempt is rejected.
///
/// The variants are checked in declaration order by the credential scan,
/// so an inactive account with a wrong secret reports `AccountInactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AuthError {
    /// No user record carries the given email.
    #[error("User not found. Register first.")]
    UserNotFound,

    /// The user exists but `estado` is not `Activo`.
    #[error("The user is inactive. Contact an administrator.")]
    AccountInactive,

    /// The secret does not match the stored credential.
    #[error("Incorrect password.")]
    InvalidCredential,

    /// The user has no role assigned.
    #[error("The user has no role assigned. Contact an administrator.")]
    NoRoleAssigned,
}

impl AuthError {
    /// Parses the machine-readable reason a login endpoint returns in its
    /// `error` field.
    pub fn from_reason(reason: &str) -> Option<Self> {
        match reason {
            "user_not_found" => Some(AuthError::UserNotFound),
            "account_inactive" => Some(AuthError::AccountInactive),
            "invalid_credential" => Some(AuthError::InvalidCredential),
            "no_role_assigned" => Some(AuthError::NoRoleAssigned),
            _ => None,
        }
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Login rejected.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Resource name not part of the backend's catalogue.
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Route path not part of the navigation model.
    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// The client only performs presence checks (order fields and the
/// required fields a resource schema declares); everything else is left
/// to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// The payload is not a JSON object.
    #[error("{resource} payload must be a JSON object")]
    NotAnObject { resource: String },

    /// Invalid format (e.g. unparseable id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(AuthError::InvalidCredential.to_string(), "Incorrect password.");
        assert!(AuthError::AccountInactive.to_string().contains("inactive"));
    }

    #[test]
    fn test_auth_error_reason_round_trip() {
        for err in [
            AuthError::UserNotFound,
            AuthError::AccountInactive,
            AuthError::InvalidCredential,
            AuthError::NoRoleAssigned,
        ] {
            let reason = serde_json::to_value(err).unwrap();
            let reason = reason.as_str().unwrap();
            assert_eq!(AuthError::from_reason(reason), Some(err));
        }
        assert_eq!(AuthError::from_reason("locked"), None);
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "empresa".to_string(),
        };
        assert_eq!(err.to_string(), "empresa is required");
    }

    #[test]
    fn test_errors_convert_to_core_error() {
        let core_err: CoreError = AuthError::UserNotFound.into();
        assert!(matches!(core_err, CoreError::Auth(AuthError::UserNotFound)));

        let validation_err = ValidationError::Required {
            field: "estado".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
