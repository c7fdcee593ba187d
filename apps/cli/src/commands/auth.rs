//! # Auth Commands
//!
//! Sign in, sign out, identity and self-registration.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  inventario login --email a@x.com                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionStore::login ──► Authenticator (token or legacy scan)          │
//! │       │                                                                 │
//! │       ├── rejected ──► ApiError { USER_NOT_FOUND | ACCOUNT_INACTIVE |   │
//! │       │                           INVALID_CREDENTIAL | NO_ROLE_ASSIGNED }│
//! │       │                session and storage untouched                    │
//! │       ▼                                                                 │
//! │  storage["usuario"] written, success notification,                      │
//! │  delayed redirect to /dashboard                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use inventario_client::{register as register_account, ClientError, LoginOutcome};
use inventario_core::auth::Registration;
use inventario_core::navigation::Navigation;
use inventario_core::notification::Notification;
use inventario_core::session::Session;

use crate::error::ApiResult;
use crate::state::SessionState;

/// Signs in. On failure nothing about the current session changes.
pub async fn login(state: &SessionState, email: &str, password: &str) -> ApiResult<LoginOutcome> {
    debug!(email, "login command");

    let mut outcome = state.store().login(email, password).await?;
    outcome.notification = outcome
        .notification
        .with_life(state.ui().notification_life_ms);
    Ok(outcome)
}

/// Signs out; always lands on the root.
pub async fn logout(state: &SessionState) -> ApiResult<Navigation> {
    debug!("logout command");
    Ok(state.store().logout().await?)
}

pub async fn whoami(state: &SessionState) -> ApiResult<Session> {
    state
        .store()
        .current()
        .await
        .ok_or_else(|| ClientError::NotAuthenticated.into())
}

/// Registers a new active account with the default role.
pub async fn register(
    state: &SessionState,
    registration: Registration,
) -> ApiResult<(Notification, Navigation)> {
    debug!(email = %registration.email, "register command");

    let navigation =
        register_account(state.store().api(), registration, state.redirect_delay()).await?;
    info!("Registration accepted by backend");

    let notification = Notification::success("Usuario registrado correctamente")
        .with_life(state.ui().notification_life_ms);
    Ok((notification, navigation))
}
