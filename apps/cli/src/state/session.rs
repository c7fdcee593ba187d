//! # Session State
//!
//! The session store every non-config command runs against, restored from
//! durable storage when the CLI starts.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use inventario_client::config::UiSettings;
use inventario_client::{
    authenticator_for, ApiClient, ClientConfig, FileStorage, RecordClient, SessionOptions,
    SessionStorage, SessionStore,
};
use inventario_core::resource::Resource;

use crate::error::ApiResult;

pub struct SessionState {
    store: SessionStore,
    ui: UiSettings,
    redirect_delay: Duration,
}

impl SessionState {
    /// Opens the session store over the configured storage directory.
    pub async fn open(config: &ClientConfig) -> ApiResult<Self> {
        let storage = Arc::new(FileStorage::new(config.storage_dir()?));
        Self::open_with(config, storage).await
    }

    /// Opens the session store over any storage backend.
    pub async fn open_with(
        config: &ClientConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> ApiResult<Self> {
        let api = ApiClient::new(&config.api)?;
        let authenticator = authenticator_for(config.auth_mode(), api.clone(), &config.auth.login_path);
        let options = SessionOptions {
            resolve_role_references: config.auth.resolve_role_references,
            redirect_delay: config.redirect_delay(),
        };

        let store = SessionStore::new(api, storage, Arc::from(authenticator), options);
        let restored = store.restore().await?;
        debug!(restored = restored.is_some(), origin = %config.base_url(), "Session state ready");

        Ok(SessionState {
            store,
            ui: config.ui.clone(),
            redirect_delay: config.redirect_delay(),
        })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn ui(&self) -> &UiSettings {
        &self.ui
    }

    pub fn redirect_delay(&self) -> Duration {
        self.redirect_delay
    }

    /// A CRUD client for `resource` that shares the session's bearer token.
    pub fn records(&self, resource: Resource) -> RecordClient {
        RecordClient::new(self.store.api().clone(), resource)
    }
}
