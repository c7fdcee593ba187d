//! # Roles
//!
//! The backend returns a user's roles in two shapes, sometimes mixed in
//! one list:
//!
//! ```text
//! "roles": [ { "id": 1, "nombre": "Administrador", ... },   ← full record
//!            { "id": 3 } ]                                   ← bare reference
//! ```
//!
//! [`RoleRef`] decodes that polymorphism once. Before any comparison the
//! references are resolved into the single canonical [`SessionRole`] shape;
//! the admin gate only ever looks at canonical roles.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ADMIN_ROLE_NAME;

/// A role record of the `roles` resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rol {
    pub id: i64,
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
}

/// A role as it appears inside a user record.
///
/// `Full` is tried first: an object only counts as a full record when it
/// carries a string `nombre`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum RoleRef {
    Full(Rol),
    Reference { id: i64 },
}

impl RoleRef {
    /// A bare `{ "id": n }` reference.
    pub fn reference(id: i64) -> Self {
        RoleRef::Reference { id }
    }

    pub fn id(&self) -> i64 {
        match self {
            RoleRef::Full(rol) => rol.id,
            RoleRef::Reference { id } => *id,
        }
    }

    /// Canonical shape without a catalogue: bare references stay unnamed.
    pub fn canonical(&self) -> SessionRole {
        match self {
            RoleRef::Full(rol) => SessionRole {
                id: rol.id,
                nombre: Some(rol.nombre.clone()),
            },
            RoleRef::Reference { id } => SessionRole { id: *id, nombre: None },
        }
    }
}

/// Canonical role kept in a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionRole {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
}

impl SessionRole {
    /// Exact, case-sensitive match against the admin role name.
    pub fn is_admin(&self) -> bool {
        self.nombre.as_deref() == Some(ADMIN_ROLE_NAME)
    }
}

/// Resolves a user's role references into canonical roles.
///
/// With a `catalog`, bare references whose id appears in it take the
/// catalogue's name. Without one they stay unnamed and can never satisfy
/// the admin gate.
pub fn resolve_roles(refs: &[RoleRef], catalog: Option<&[Rol]>) -> Vec<SessionRole> {
    refs.iter()
        .map(|role| match (role, catalog) {
            (RoleRef::Reference { id }, Some(catalog)) => SessionRole {
                id: *id,
                nombre: catalog.iter().find(|r| r.id == *id).map(|r| r.nombre.clone()),
            },
            _ => role.canonical(),
        })
        .collect()
}

/// Returns true if any canonical role is the admin role.
pub fn has_admin_role(roles: &[SessionRole]) -> bool {
    roles.iter().any(SessionRole::is_admin)
}
