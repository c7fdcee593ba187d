//! # Commands Module
//!
//! One function per CLI command. Commands take the state they need and
//! return plain values; rendering happens in `lib.rs` and `output.rs`.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (navigation helper)
//! ├── auth.rs      ◄─── login, logout, whoami, register
//! ├── menu.rs      ◄─── navigation menu
//! ├── resource.rs  ◄─── list, inventory, get, create, update, delete
//! └── config.rs    ◄─── config show, path, set-url
//! ```
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  inventario list pedidos                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  SessionState::open ──► restore persisted session                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  store.require(Route::Pedidos) ──► NotAuthenticated / AccessDenied     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  RecordClient::list ──► paginate ──► rows(schema) ──► TableView        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod config;
pub mod menu;
pub mod resource;

use inventario_core::navigation::{Navigation, Route};
use tracing::debug;

/// Carries out a navigation: waits out a delayed redirect, then reports
/// the route the user lands on.
pub async fn follow(navigation: Navigation) -> Route {
    if let Navigation::Delayed { route, delay } = navigation {
        if !delay.is_zero() {
            debug!(?delay, %route, "Delayed redirect");
            tokio::time::sleep(delay).await;
        }
    }
    navigation.route()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_follow_waits_for_delay() {
        let started = tokio::time::Instant::now();
        let route = follow(Navigation::Delayed {
            route: Route::Dashboard,
            delay: Duration::from_secs(2),
        })
        .await;
        assert_eq!(route, Route::Dashboard);
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_follow_hard_is_immediate() {
        assert_eq!(follow(Navigation::Hard(Route::Home)).await, Route::Home);
    }
}
