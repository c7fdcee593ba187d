//! # Session Store
//!
//! The single owner of the current session. Constructed explicitly and
//! passed to whatever needs it; there is no global instance.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   restore() ──► read "usuario" ── missing ──► read "user" (legacy)      │
//! │                     │                             │                     │
//! │                     │                             ├─ found: write       │
//! │                     │                             │  "usuario", remove  │
//! │                     │                             │  "user"             │
//! │                     ▼                             ▼                     │
//! │               parse ok? ── no ──► warn, stay logged out                 │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │               memory = session                                          │
//! │                                                                         │
//! │   login()  ──► epoch += 1 ──► authenticate ──► epoch unchanged?         │
//! │                                                  │ no  → Superseded     │
//! │                                                  ▼ yes                  │
//! │                                    storage write, then memory           │
//! │                                                                         │
//! │   logout() ──► epoch += 1 ──► memory = None ──► remove both keys        │
//! │                           ──► Hard("/")                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A login failure leaves memory and storage untouched. A stored session
//! is trusted as-is; it is not re-validated against the backend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use inventario_core::navigation::{self, Menu, Navigation, Route};
use inventario_core::notification::Notification;
use inventario_core::role::Rol;
use inventario_core::session::{parse_stored, Session, SessionUser};
use inventario_core::{LEGACY_STORAGE_KEY, SESSION_STORAGE_KEY};

use crate::auth::Authenticator;
use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;
use crate::resource::ResourceClient;
use crate::storage::SessionStorage;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub session: Session,
    pub notification: Notification,
    pub navigation: Navigation,
}

/// Options that shape login behavior.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Name bare role references from the `roles` catalogue.
    pub resolve_role_references: bool,

    /// Delay of the post-login navigation to the dashboard.
    pub redirect_delay: Duration,
}

pub struct SessionStore {
    api: ApiClient,
    storage: Arc<dyn SessionStorage>,
    authenticator: Arc<dyn Authenticator>,
    options: SessionOptions,
    current: RwLock<Option<Session>>,
    /// Bumped by every login and logout. A login only commits if the
    /// epoch it started with is still current.
    epoch: AtomicU64,
}

impl SessionStore {
    pub fn new(
        api: ApiClient,
        storage: Arc<dyn SessionStorage>,
        authenticator: Arc<dyn Authenticator>,
        options: SessionOptions,
    ) -> Self {
        SessionStore {
            api,
            storage,
            authenticator,
            options,
            current: RwLock::new(None),
            epoch: AtomicU64::new(0),
        }
    }

    // =========================================================================
    // Restore
    // =========================================================================

    /// Loads the persisted session into memory.
    ///
    /// A record found only under the legacy key is moved to the current
    /// key first. An unreadable record leaves the store logged out.
    pub async fn restore(&self) -> ClientResult<Option<Session>> {
        let raw = match self.storage.get(SESSION_STORAGE_KEY)? {
            Some(raw) => Some(raw),
            None => self.migrate_legacy_record()?,
        };

        let restored = raw.and_then(|raw| match parse_stored(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!(error = %e, "Stored session is unreadable, starting logged out");
                None
            }
        });

        if let Some(session) = &restored {
            info!(session_id = %session.id, email = %session.user.email, "Session restored");
            self.api.set_token(session.token.clone()).await;
        }

        *self.current.write().await = restored.clone();
        Ok(restored)
    }

    fn migrate_legacy_record(&self) -> ClientResult<Option<String>> {
        let Some(raw) = self.storage.get(LEGACY_STORAGE_KEY)? else {
            return Ok(None);
        };

        let migrated = match parse_stored(&raw) {
            Ok(session) => session.to_stored()?,
            Err(e) => {
                warn!(error = %e, "Legacy session record is unreadable, discarding it");
                self.storage.remove(LEGACY_STORAGE_KEY)?;
                return Ok(None);
            }
        };

        self.storage.set(SESSION_STORAGE_KEY, &migrated)?;
        self.storage.remove(LEGACY_STORAGE_KEY)?;
        info!("Migrated legacy session record");
        Ok(Some(migrated))
    }

    // =========================================================================
    // Login / Logout
    // =========================================================================

    /// Authenticates and, on success, makes the user the current session.
    pub async fn login(&self, email: &str, secret: &str) -> ClientResult<LoginOutcome> {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(email, mode = %self.authenticator.mode(), "Login started");

        let authenticated = self.authenticator.authenticate(email, secret).await?;

        // The token is needed to read the catalogue, but only committed
        // once the epoch check passes.
        let catalog = if self.options.resolve_role_references {
            Some(self.role_catalog(authenticated.token.as_deref()).await?)
        } else {
            None
        };

        let user = SessionUser::from_usuario(&authenticated.user, catalog.as_deref());
        let session = Session::new(user, authenticated.token);

        {
            let mut current = self.current.write().await;
            if self.epoch.load(Ordering::SeqCst) != epoch {
                warn!(email, "Discarding login result, session changed meanwhile");
                return Err(ClientError::Superseded);
            }
            self.storage.set(SESSION_STORAGE_KEY, &session.to_stored()?)?;
            self.api.set_token(session.token.clone()).await;
            *current = Some(session.clone());
        }

        info!(
            session_id = %session.id,
            email = %session.user.email,
            admin = session.is_admin(),
            "Login successful"
        );

        Ok(LoginOutcome {
            notification: Notification::success(format!(
                "Bienvenido, {}",
                session.user.display_name()
            )),
            navigation: Navigation::Delayed {
                route: Route::Dashboard,
                delay: self.options.redirect_delay,
            },
            session,
        })
    }

    async fn role_catalog(&self, token: Option<&str>) -> ClientResult<Vec<Rol>> {
        let api = match token {
            Some(token) => {
                let scoped = self.api.clone_detached().await;
                scoped.set_token(Some(token.to_string())).await;
                scoped
            }
            None => self.api.clone(),
        };
        ResourceClient::<Rol>::new(api).list().await
    }

    /// Ends the session. Returns a hard navigation to the root, which
    /// drops every piece of in-memory state.
    pub async fn logout(&self) -> ClientResult<Navigation> {
        self.epoch.fetch_add(1, Ordering::SeqCst);

        let previous = {
            let mut current = self.current.write().await;
            self.api.set_token(None).await;
            current.take()
        };

        self.storage.remove(SESSION_STORAGE_KEY)?;
        self.storage.remove(LEGACY_STORAGE_KEY)?;

        match previous {
            Some(session) => info!(session_id = %session.id, "Logged out"),
            None => debug!("Logout without a session"),
        }
        Ok(Navigation::Hard(Route::Home))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Menu for the current session, recomputed on every call.
    pub async fn menu(&self) -> Menu {
        navigation::menu_for(self.current.read().await.as_ref())
    }

    /// Checks that the current session may open `route`.
    pub async fn require(&self, route: Route) -> ClientResult<()> {
        let current = self.current.read().await;
        if navigation::can_access(current.as_ref(), route) {
            return Ok(());
        }
        match current.as_ref() {
            None => Err(ClientError::NotAuthenticated),
            Some(_) => Err(ClientError::AccessDenied { route }),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}
