//! # inventario-core: Pure Rules of the Inventario Admin Client
//!
//! This crate holds everything the admin client decides without touching
//! the network or the disk: who may log in, what the menu shows, how each
//! backend resource is shaped and how it is rendered.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Inventario Admin Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    CLI (apps/cli)                               │   │
//! │  │    login ──► menu ──► list / get / create / update / delete     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              inventario-client (I/O)                            │   │
//! │  │    ApiClient · ResourceClient · Authenticator · SessionStore    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ inventario-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   auth    │  │ navigation │  │ resource  │  │   │
//! │  │   │  Usuario  │  │  verify   │  │  menu_for  │  │  schemas  │  │   │
//! │  │   │  Pedido   │  │ eligible  │  │ can_access │  │  models   │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO FILE SYSTEM • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Backend records (Usuario, Empresa, Producto, ...)
//! - [`role`] - Role references and their canonical form
//! - [`session`] - The session record and its stored shapes
//! - [`auth`] - Credential verification and the session invariant
//! - [`navigation`] - Routes, the menu gate and navigation outcomes
//! - [`resource`] - Resource catalogue, schemas and typed models
//! - [`validation`] - Payload presence checks
//! - [`table`] - Row rendering and pagination
//! - [`notification`] - Transient user messages
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use inventario_core::auth::verify_credentials;
//! use inventario_core::navigation::menu_for;
//! use inventario_core::session::{Session, SessionUser};
//! use inventario_core::Usuario;
//!
//! let users: Vec<Usuario> = serde_json::from_str(r#"[{
//!     "id": 1, "nombre_completo": "Ana", "email": "a@x.com",
//!     "estado": "Activo", "passwordHash": "p1",
//!     "roles": [{ "id": 1, "nombre": "Administrador" }]
//! }]"#).unwrap();
//!
//! let user = verify_credentials(&users, "a@x.com", "p1").unwrap();
//! let session = Session::new(SessionUser::from_usuario(user, None), None);
//!
//! let menu = menu_for(Some(&session));
//! assert_eq!(menu.items.len(), 10);
//! assert_eq!(menu.items[0].label, "Usuarios");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod resource;
pub mod role;
pub mod session;
pub mod table;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{AuthError, CoreError, ValidationError};
pub use navigation::{Menu, NavItem, Navigation, Route};
pub use notification::{Notification, Severity};
pub use resource::{Resource, ResourceModel, ResourceSchema};
pub use role::{Rol, RoleRef, SessionRole};
pub use session::{Session, SessionUser};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

use std::time::Duration;

/// Role name that unlocks the Usuarios and Roles screens.
///
/// Compared exactly (case-sensitive). Renaming the role in the backend
/// removes admin navigation for everyone.
pub const ADMIN_ROLE_NAME: &str = "Administrador";

/// `estado` literal of an active record.
pub const ACTIVE_STATUS: &str = "Activo";

/// `estado` literal of an inactive record.
pub const INACTIVE_STATUS: &str = "Inactivo";

/// Menu label when the session user has no display name.
pub const UNKNOWN_USER_LABEL: &str = "Usuario Desconocido";

/// Storage key of the session record.
pub const SESSION_STORAGE_KEY: &str = "usuario";

/// Storage key an earlier web client wrote. Read once for migration, then
/// removed.
pub const LEGACY_STORAGE_KEY: &str = "user";

/// Role assigned to self-registered users (`{ "id": 3 }`).
pub const DEFAULT_ROLE_ID: i64 = 3;

/// `estado` of a new order.
pub const DEFAULT_ORDER_STATUS: &str = "Pendiente";

/// Delay before navigating to the dashboard after a successful login in
/// the web client.
pub const LOGIN_REDIRECT_DELAY: Duration = Duration::from_secs(2);

/// How long a notification stays visible.
pub const NOTIFICATION_LIFE_MS: u64 = 3000;

/// Rows per table page.
pub const DEFAULT_PAGE_SIZE: usize = 5;
