//! # Credential Verification
//!
//! The rules that decide whether a user record may open a session.
//!
//! ## Scan Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  users (whole collection)                                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  first record with email == input (case-sensitive) ── none ──► NotFound │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  estado == "Activo" ? ────────────────────────────── no ──► Inactive    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  secret == passwordHash ? ────────────────────────── no ──► Credential  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  roles non-empty ? ───────────────────────────────── no ──► NoRole      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(record)                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`verify_credentials`] backs the default scan login, which needs no
//! login endpoint on the backend. [`check_eligibility`] applies to
//! every mode.
//!
//! Self sign-up goes through [`Registration`], which always creates an
//! active account holding the default role.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::role::RoleRef;
use crate::types::{EntityRef, RecordStatus, Usuario};
use crate::DEFAULT_ROLE_ID;

/// Finds the user for `email` and checks status, secret and roles, in that
/// order. Returns the matched record untouched.
pub fn verify_credentials<'a>(
    users: &'a [Usuario],
    email: &str,
    secret: &str,
) -> Result<&'a Usuario, AuthError> {
    let user = users
        .iter()
        .find(|u| u.email == email)
        .ok_or(AuthError::UserNotFound)?;

    if !user.is_active() {
        return Err(AuthError::AccountInactive);
    }

    if user.password_hash.as_deref() != Some(secret) {
        return Err(AuthError::InvalidCredential);
    }

    if !user.has_roles() {
        return Err(AuthError::NoRoleAssigned);
    }

    Ok(user)
}

/// Checks the session invariant: active status and at least one role.
///
/// Evaluated once at login. A stored session is never re-checked.
pub fn check_eligibility(user: &Usuario) -> Result<(), AuthError> {
    if !user.is_active() {
        return Err(AuthError::AccountInactive);
    }
    if !user.has_roles() {
        return Err(AuthError::NoRoleAssigned);
    }
    Ok(())
}

// =============================================================================
// Registration
// =============================================================================

/// Fields collected by the sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub nombre_completo: String,
    pub email: String,
    pub telefono: Option<String>,
    pub password: String,
    pub empresa_id: Option<i64>,
}

/// Body posted to `usuarios` on sign-up.
///
/// `estado` is always `Activo` and `roles` always the single default
/// reference; the form cannot choose either.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationPayload {
    pub nombre_completo: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
    pub empresa: Option<EntityRef>,
    pub estado: RecordStatus,
    pub roles: Vec<RoleRef>,
}

impl Registration {
    pub fn into_payload(self) -> RegistrationPayload {
        RegistrationPayload {
            nombre_completo: self.nombre_completo,
            email: self.email,
            telefono: self.telefono.filter(|t| !t.trim().is_empty()),
            password_hash: self.password,
            empresa: self.empresa_id.map(EntityRef::id),
            estado: RecordStatus::Active,
            roles: vec![RoleRef::reference(DEFAULT_ROLE_ID)],
        }
    }
}
