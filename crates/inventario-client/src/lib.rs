//! # inventario-client: I/O Layer of the Inventario Admin Client
//!
//! Everything that talks to the backend or touches the disk: the REST
//! client, the login strategies, durable session storage, the session
//! store and configuration.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Architecture                               │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  SessionStore (session.rs)                       │  │
//! │  │                                                                  │  │
//! │  │  restore · login · logout · menu · require                      │  │
//! │  └──────────┬─────────────────────┬─────────────────────┬───────────┘  │
//! │             ▼                     ▼                     ▼              │
//! │  ┌────────────────────┐  ┌────────────────────┐  ┌──────────────────┐  │
//! │  │  Authenticator     │  │  SessionStorage    │  │  ApiClient       │  │
//! │  │                    │  │                    │  │                  │  │
//! │  │  TokenLogin        │  │  FileStorage       │  │  fetch contract  │  │
//! │  │  LegacyScanLogin   │  │  MemoryStorage     │  │  bearer token    │  │
//! │  └────────────────────┘  └────────────────────┘  └────────┬─────────┘  │
//! │                                                           │            │
//! │                                        ┌──────────────────▼─────────┐  │
//! │                                        │  RecordClient /            │  │
//! │                                        │  ResourceClient<T>         │  │
//! │                                        │  list get create update    │  │
//! │                                        │  delete                    │  │
//! │                                        └────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - Client configuration (API origin, auth mode, storage)
//! - [`error`] - Client error types
//! - [`http`] - HTTP client implementing the request contract
//! - [`resource`] - Generic CRUD clients
//! - [`auth`] - Authenticators and registration
//! - [`storage`] - Durable session storage
//! - [`session`] - The session store
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use inventario_client::{
//!     authenticator_for, ApiClient, ClientConfig, FileStorage, SessionOptions, SessionStore,
//! };
//!
//! # async fn run() -> Result<(), inventario_client::ClientError> {
//! let config = ClientConfig::load_or_default(None);
//! let api = ApiClient::new(&config.api)?;
//! let store = SessionStore::new(
//!     api.clone(),
//!     Arc::new(FileStorage::new(config.storage_dir()?)),
//!     Arc::from(authenticator_for(config.auth_mode(), api, &config.auth.login_path)),
//!     SessionOptions::default(),
//! );
//!
//! store.restore().await?;
//! let outcome = store.login("a@x.com", "p1").await?;
//! println!("{}", outcome.notification.detail);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod resource;
pub mod session;
pub mod storage;

// =============================================================================
// Re-exports
// =============================================================================

pub use auth::{authenticator_for, register, Authenticated, Authenticator, LegacyScanLogin, TokenLogin};
pub use config::{AuthMode, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
pub use resource::{RecordClient, ResourceClient};
pub use session::{LoginOutcome, SessionOptions, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
