//! # Session Model
//!
//! The record of the currently authenticated user, as held in memory and
//! mirrored to durable storage by the client's session store.
//!
//! ## Stored Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Current shape (written by this client)                                 │
//! │    { "id": <uuid>, "user": { id, nombre_completo, email, estado,        │
//! │      roles: [{ id, nombre? }] }, "established_at": ..., "token"? }      │
//! │                                                                         │
//! │  Earlier shape (a raw `usuarios` record, written by the web client)     │
//! │    { id, nombre_completo, email, estado, passwordHash, roles, ... }     │
//! │                                                                         │
//! │  parse_stored() accepts both; the credential of an earlier record is    │
//! │  dropped during the conversion.                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::role::{has_admin_role, resolve_roles, Rol, SessionRole};
use crate::types::{RecordStatus, Usuario};
use crate::UNKNOWN_USER_LABEL;

/// The user projection a session keeps. Never carries the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionUser {
    pub id: i64,
    pub nombre_completo: String,
    pub email: String,
    #[ts(as = "String")]
    pub estado: RecordStatus,
    pub roles: Vec<SessionRole>,
}

impl SessionUser {
    /// Projects a user record, resolving its roles into canonical form.
    pub fn from_usuario(user: &Usuario, catalog: Option<&[Rol]>) -> Self {
        SessionUser {
            id: user.id,
            nombre_completo: user.nombre_completo.clone(),
            email: user.email.clone(),
            estado: user.estado.clone(),
            roles: resolve_roles(&user.roles, catalog),
        }
    }

    /// Name shown next to the sign-out action.
    pub fn display_name(&self) -> &str {
        if self.nombre_completo.trim().is_empty() {
            UNKNOWN_USER_LABEL
        } else {
            &self.nombre_completo
        }
    }

    pub fn is_admin(&self) -> bool {
        has_admin_role(&self.roles)
    }
}

/// An established session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Local identifier, used to correlate log lines of one session.
    pub id: Uuid,

    pub user: SessionUser,

    pub established_at: DateTime<Utc>,

    /// Bearer token issued by the login endpoint (token mode only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Session {
    pub fn new(user: SessionUser, token: Option<String>) -> Self {
        Session {
            id: Uuid::new_v4(),
            user,
            established_at: Utc::now(),
            token,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }

    /// Serializes the session for durable storage.
    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Parses a stored session record.
///
/// Accepts the current shape and a raw user record left behind by the web
/// client. Returns the error of the current shape when neither matches.
pub fn parse_stored(raw: &str) -> Result<Session, serde_json::Error> {
    match serde_json::from_str::<Session>(raw) {
        Ok(session) => Ok(session),
        Err(err) => match serde_json::from_str::<Usuario>(raw) {
            Ok(user) => Ok(Session::new(SessionUser::from_usuario(&user, None), None)),
            Err(_) => Err(err),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleRef;
    use serde_json::json;

    fn ana() -> Usuario {
        serde_json::from_value(json!({
            "id": 7,
            "nombre_completo": "Ana",
            "email": "a@x.com",
            "estado": "Activo",
            "passwordHash": "p1",
            "roles": [{ "id": 1, "nombre": "Administrador" }]
        }))
        .unwrap()
    }

    #[test]
    fn test_projection_drops_credential() {
        let session = Session::new(SessionUser::from_usuario(&ana(), None), None);
        let stored = session.to_stored().unwrap();
        assert!(!stored.contains("passwordHash"));
        assert!(!stored.contains("p1"));
        assert!(session.is_admin());
    }

    #[test]
    fn test_parse_stored_round_trip() {
        let session = Session::new(
            SessionUser::from_usuario(&ana(), None),
            Some("jwt".to_string()),
        );
        let parsed = parse_stored(&session.to_stored().unwrap()).unwrap();
        assert_eq!(parsed, session);
    }

    #[test]
    fn test_parse_stored_accepts_raw_user_record() {
        let raw = serde_json::to_string(&ana()).unwrap();
        let session = parse_stored(&raw).unwrap();
        assert_eq!(session.user.email, "a@x.com");
        assert!(session.token.is_none());
        assert!(session.is_admin());
    }

    #[test]
    fn test_parse_stored_rejects_garbage() {
        assert!(parse_stored("{not json").is_err());
        assert!(parse_stored(r#"{"foo": 1}"#).is_err());
    }

    #[test]
    fn test_display_name_fallback() {
        let mut user = ana();
        user.nombre_completo = "  ".into();
        user.roles = vec![RoleRef::reference(3)];
        let projected = SessionUser::from_usuario(&user, None);
        assert_eq!(projected.display_name(), UNKNOWN_USER_LABEL);
        assert!(!projected.is_admin());
    }
}
