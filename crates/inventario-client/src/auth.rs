//! # Authenticators
//!
//! The two ways a login is verified, behind one trait.
//!
//! ## Token Login
//! ```text
//! ┌──────────────┐  POST /auth/login { email, password }   ┌──────────────┐
//! │   client     │────────────────────────────────────────►│   backend    │
//! │              │◄────────────────────────────────────────│              │
//! └──────────────┘  200 { access_token, usuario }          └──────────────┘
//!                   4xx { "error": "account_inactive" }
//! ```
//!
//! ## Legacy Scan (default)
//! ```text
//! ┌──────────────┐  GET /usuarios                         ┌──────────────┐
//! │   client     │────────────────────────────────────────►│   backend    │
//! │              │◄────────────────────────────────────────│              │
//! └──────┬───────┘  [ every user, credentials included ]   └──────────────┘
//!        │
//!        ▼
//!  verify_credentials(): not found → inactive → secret → no role
//! ```
//!
//! Both return the user record only if it satisfies the session invariant
//! (active, at least one role).

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use inventario_core::auth::{check_eligibility, verify_credentials, Registration};
use inventario_core::error::AuthError;
use inventario_core::navigation::{Navigation, Route};
use inventario_core::resource::Resource;
use inventario_core::types::Usuario;

use crate::config::AuthMode;
use crate::error::{ClientError, ClientResult};
use crate::http::{http_error, read_payload, ApiClient};

/// A verified login.
#[derive(Debug, Clone, PartialEq)]
pub struct Authenticated {
    pub user: Usuario,

    /// Bearer token for later requests (token mode only).
    pub token: Option<String>,
}

/// Verifies an email/secret pair.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, email: &str, secret: &str) -> ClientResult<Authenticated>;

    fn mode(&self) -> AuthMode;
}

/// Builds the authenticator for the configured mode.
pub fn authenticator_for(mode: AuthMode, api: ApiClient, login_path: &str) -> Box<dyn Authenticator> {
    match mode {
        AuthMode::Token => Box::new(TokenLogin::new(api, login_path)),
        AuthMode::LegacyScan => Box::new(LegacyScanLogin::new(api)),
    }
}

// =============================================================================
// Token Login
// =============================================================================

/// Server-side verification through a login endpoint.
pub struct TokenLogin {
    api: ApiClient,
    login_path: String,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
    usuario: Usuario,
}

#[derive(Deserialize)]
struct LoginRejection {
    error: String,
}

impl TokenLogin {
    pub fn new(api: ApiClient, login_path: impl Into<String>) -> Self {
        TokenLogin {
            api,
            login_path: login_path.into(),
        }
    }
}

#[async_trait]
impl Authenticator for TokenLogin {
    async fn authenticate(&self, email: &str, secret: &str) -> ClientResult<Authenticated> {
        let request = LoginRequest {
            email,
            password: secret,
        };
        let response = self
            .api
            .send(Method::POST, &self.login_path, Some(&request))
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let reason = serde_json::from_slice::<LoginRejection>(&body)
                .ok()
                .and_then(|r| AuthError::from_reason(&r.error));
            return match reason {
                Some(reason) => {
                    debug!(email, ?reason, "Login rejected by backend");
                    Err(reason.into())
                }
                None => Err(http_error(status)),
            };
        }

        let LoginResponse {
            access_token,
            usuario,
        } = read_payload(response)
            .await?
            .ok_or_else(|| ClientError::Decode("empty login response".into()))?;

        check_eligibility(&usuario)?;

        Ok(Authenticated {
            user: usuario,
            token: Some(access_token),
        })
    }

    fn mode(&self) -> AuthMode {
        AuthMode::Token
    }
}

// =============================================================================
// Legacy Scan
// =============================================================================

/// Client-side verification against the full user collection.
pub struct LegacyScanLogin {
    api: ApiClient,
}

impl LegacyScanLogin {
    pub fn new(api: ApiClient) -> Self {
        LegacyScanLogin { api }
    }
}

#[async_trait]
impl Authenticator for LegacyScanLogin {
    async fn authenticate(&self, email: &str, secret: &str) -> ClientResult<Authenticated> {
        info!("Legacy scan login: fetching the user collection");

        // Decoded one record at a time: a malformed record elsewhere in the
        // collection must not block this login.
        let records: Vec<Value> = self
            .api
            .get(Resource::Usuarios.path())
            .await?
            .unwrap_or_default();
        debug!(count = records.len(), "Scanning user collection");

        let record = records
            .into_iter()
            .find(|r| r.get("email").and_then(Value::as_str) == Some(email))
            .ok_or(AuthError::UserNotFound)?;
        let user: Usuario = serde_json::from_value(record)?;

        verify_credentials(std::slice::from_ref(&user), email, secret)?;
        Ok(Authenticated { user, token: None })
    }

    fn mode(&self) -> AuthMode {
        AuthMode::LegacyScan
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Creates a self-registered account and returns the follow-up navigation
/// to the login page.
///
/// There is no uniqueness pre-check; a duplicate email is whatever the
/// backend answers.
pub async fn register(
    api: &ApiClient,
    registration: Registration,
    redirect_delay: std::time::Duration,
) -> ClientResult<Navigation> {
    let email = registration.email.clone();
    let payload = registration.into_payload();

    api.request::<Value, _>(Method::POST, Resource::Usuarios.path(), Some(&payload))
        .await?;

    info!(email = %email, "User registered");
    Ok(Navigation::Delayed {
        route: Route::Login,
        delay: redirect_delay,
    })
}
