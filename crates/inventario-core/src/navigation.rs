//! # Navigation Gate
//!
//! Derives the visible menu from the current session. Pure: the same
//! session always yields the same menu, and nothing is cached between
//! calls.
//!
//! ## Menu Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  no session        Inicio · Acerca de                          (2)      │
//! │                                                                         │
//! │  session           Empresas · Categorías · Productos · Inventario ·     │
//! │                    Movimientos · Pedidos · Proveedores · Acerca de (8)  │
//! │                    + "Cerrar Sesión" action + user label                │
//! │                                                                         │
//! │  "Administrador"   Usuarios · Roles · <the 8 above>            (10)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`can_access`] applies the same gate to direct route access. It only
//! hides navigation; the backend does not enforce it.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::session::Session;

// =============================================================================
// Route
// =============================================================================

/// Every page of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    Dashboard,
    Login,
    Register,
    AcercaDe,
    Usuarios,
    Roles,
    Empresas,
    Categorias,
    Productos,
    Inventario,
    Movimientos,
    Pedidos,
    Proveedores,
}

impl Route {
    pub const ALL: [Route; 14] = [
        Route::Home,
        Route::Dashboard,
        Route::Login,
        Route::Register,
        Route::AcercaDe,
        Route::Usuarios,
        Route::Roles,
        Route::Empresas,
        Route::Categorias,
        Route::Productos,
        Route::Inventario,
        Route::Movimientos,
        Route::Pedidos,
        Route::Proveedores,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Dashboard => "/dashboard",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::AcercaDe => "/acerca-de",
            Route::Usuarios => "/usuarios",
            Route::Roles => "/roles",
            Route::Empresas => "/empresas",
            Route::Categorias => "/categorias",
            Route::Productos => "/productos",
            Route::Inventario => "/inventario",
            Route::Movimientos => "/movimientos",
            Route::Pedidos => "/pedidos",
            Route::Proveedores => "/proveedores",
        }
    }

    /// Reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Route::Home | Route::Login | Route::Register | Route::AcercaDe
        )
    }

    /// Only shown to sessions holding the admin role.
    pub fn requires_admin(&self) -> bool {
        matches!(self, Route::Usuarios | Route::Roles)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = CoreError;

    /// Accepts a path with or without the leading slash.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches('/');
        let normalized = if trimmed.is_empty() {
            "/".to_string()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        Route::ALL
            .iter()
            .copied()
            .find(|route| route.path() == normalized)
            .ok_or_else(|| CoreError::UnknownRoute(s.to_string()))
    }
}

// =============================================================================
// Menu
// =============================================================================

/// One entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NavItem {
    pub label: String,
    pub icon: String,
    pub route: Route,
}

impl NavItem {
    fn new(label: &str, icon: &str, route: Route) -> Self {
        NavItem {
            label: label.to_string(),
            icon: icon.to_string(),
            route,
        }
    }
}

/// The sign-out entry of the user menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserMenu {
    /// Display name of the session user.
    pub user_label: String,
    pub sign_out_label: String,
    pub sign_out_icon: String,
}

/// Navigation bar contents for one session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Menu {
    pub items: Vec<NavItem>,

    /// Present only when a session is held.
    pub user_menu: Option<UserMenu>,
}

impl Menu {
    pub fn labels(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.label.as_str()).collect()
    }

    pub fn contains(&self, route: Route) -> bool {
        self.items.iter().any(|item| item.route == route)
    }
}

pub const SIGN_OUT_LABEL: &str = "Cerrar Sesión";

fn public_items() -> Vec<NavItem> {
    vec![
        NavItem::new("Inicio", "pi pi-home", Route::Home),
        NavItem::new("Acerca de", "pi pi-info-circle", Route::AcercaDe),
    ]
}

fn session_items() -> Vec<NavItem> {
    vec![
        NavItem::new("Empresas", "pi pi-building", Route::Empresas),
        NavItem::new("Categorías", "pi pi-box", Route::Categorias),
        NavItem::new("Productos", "pi pi-box", Route::Productos),
        NavItem::new("Inventario", "pi pi-list", Route::Inventario),
        NavItem::new("Movimientos", "pi pi-exchange", Route::Movimientos),
        NavItem::new("Pedidos", "pi pi-shopping-cart", Route::Pedidos),
        NavItem::new("Proveedores", "pi pi-truck", Route::Proveedores),
        NavItem::new("Acerca de", "pi pi-info-circle", Route::AcercaDe),
    ]
}

fn admin_items() -> Vec<NavItem> {
    vec![
        NavItem::new("Usuarios", "pi pi-user", Route::Usuarios),
        NavItem::new("Roles", "pi pi-users", Route::Roles),
    ]
}

/// Builds the menu for the given session state.
pub fn menu_for(session: Option<&Session>) -> Menu {
    let Some(session) = session else {
        return Menu {
            items: public_items(),
            user_menu: None,
        };
    };

    let mut items = Vec::with_capacity(10);
    if session.is_admin() {
        items.extend(admin_items());
    }
    items.extend(session_items());

    Menu {
        items,
        user_menu: Some(UserMenu {
            user_label: session.user.display_name().to_string(),
            sign_out_label: SIGN_OUT_LABEL.to_string(),
            sign_out_icon: "pi pi-sign-out".to_string(),
        }),
    }
}

/// Returns true if the route may be opened in the given session state.
pub fn can_access(session: Option<&Session>, route: Route) -> bool {
    if route.is_public() {
        return true;
    }
    match session {
        None => false,
        Some(session) => !route.requires_admin() || session.is_admin(),
    }
}

// =============================================================================
// Navigation Outcome
// =============================================================================

/// Where a flow sends the user once it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// Full reload at the route; all in-memory state is dropped.
    Hard(Route),

    /// Client-side navigation after `delay`, leaving time to read the
    /// notification.
    Delayed { route: Route, delay: Duration },
}

impl Navigation {
    pub fn route(&self) -> Route {
        match self {
            Navigation::Hard(route) => *route,
            Navigation::Delayed { route, .. } => *route,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::SessionRole;
    use crate::session::SessionUser;
    use crate::types::RecordStatus;

    fn session_with(roles: Vec<SessionRole>, name: &str) -> Session {
        Session::new(
            SessionUser {
                id: 1,
                nombre_completo: name.to_string(),
                email: "a@x.com".to_string(),
                estado: RecordStatus::Active,
                roles,
            },
            None,
        )
    }

    fn named(id: i64, nombre: &str) -> SessionRole {
        SessionRole {
            id,
            nombre: Some(nombre.to_string()),
        }
    }

    #[test]
    fn test_menu_without_session() {
        let menu = menu_for(None);
        assert_eq!(menu.labels(), vec!["Inicio", "Acerca de"]);
        assert!(menu.user_menu.is_none());
    }

    #[test]
    fn test_menu_for_regular_user() {
        let session = session_with(vec![named(2, "Vendedor")], "Ana");
        let menu = menu_for(Some(&session));
        assert_eq!(menu.items.len(), 8);
        assert_eq!(menu.items[0].label, "Empresas");
        assert_eq!(menu.items[7].route, Route::AcercaDe);
        assert!(!menu.contains(Route::Usuarios));

        let user_menu = menu.user_menu.unwrap();
        assert_eq!(user_menu.user_label, "Ana");
        assert_eq!(user_menu.sign_out_label, "Cerrar Sesión");
    }

    #[test]
    fn test_menu_for_admin_prepends_admin_items() {
        let session = session_with(vec![named(2, "Vendedor"), named(1, "Administrador")], "Ana");
        let menu = menu_for(Some(&session));
        assert_eq!(menu.items.len(), 10);
        assert_eq!(&menu.labels()[..3], &["Usuarios", "Roles", "Empresas"]);
    }

    #[test]
    fn test_unnamed_reference_is_not_admin() {
        let session = session_with(vec![SessionRole { id: 1, nombre: None }], "");
        let menu = menu_for(Some(&session));
        assert_eq!(menu.items.len(), 8);
        assert_eq!(menu.user_menu.unwrap().user_label, "Usuario Desconocido");
    }

    #[test]
    fn test_menu_is_recomputed_per_call() {
        let session = session_with(vec![named(1, "Administrador")], "Ana");
        assert_eq!(menu_for(Some(&session)), menu_for(Some(&session)));
        assert_eq!(menu_for(None).items.len(), 2);
    }

    #[test]
    fn test_route_parsing() {
        assert_eq!("/".parse::<Route>().unwrap(), Route::Home);
        assert_eq!("".parse::<Route>().unwrap(), Route::Home);
        assert_eq!("acerca-de".parse::<Route>().unwrap(), Route::AcercaDe);
        assert_eq!("/pedidos/".parse::<Route>().unwrap(), Route::Pedidos);
        assert!("/nope".parse::<Route>().is_err());
        for route in Route::ALL {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn test_can_access() {
        let regular = session_with(vec![named(2, "Vendedor")], "Ana");
        let admin = session_with(vec![named(1, "Administrador")], "Ana");

        assert!(can_access(None, Route::Login));
        assert!(!can_access(None, Route::Productos));
        assert!(can_access(Some(&regular), Route::Productos));
        assert!(!can_access(Some(&regular), Route::Roles));
        assert!(can_access(Some(&admin), Route::Usuarios));
    }
}
