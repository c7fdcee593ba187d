//! # API Client
//!
//! One HTTP entry point for every backend call.
//!
//! ## Request Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request(method, "usuarios/7", body?)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  {origin}/usuarios/7                                                    │
//! │  Content-Type: application/json                                         │
//! │  Authorization: Bearer <token>        (only while a token is held)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  status not 2xx ──────────────► Http { status, status_text }            │
//! │  204 or empty body ───────────► Ok(None)                                │
//! │  otherwise ───────────────────► Ok(Some(json))                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use url::Url;

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult};

/// Shared HTTP client. Cheap to clone; clones share the bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    origin: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Self::with_client(http, &settings.base_url)
    }

    /// Builds a client around an existing `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: &str) -> ClientResult<Self> {
        let mut origin = Url::parse(base_url)?;
        if origin.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        // A trailing slash makes `join` append instead of replacing the
        // last segment of an origin with a path prefix.
        if !origin.path().ends_with('/') {
            let path = format!("{}/", origin.path());
            origin.set_path(&path);
        }

        Ok(ApiClient {
            http,
            origin,
            token: Arc::new(RwLock::new(None)),
        })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolves a path such as `usuarios/7` against the origin.
    pub fn url(&self, path: &str) -> ClientResult<Url> {
        Ok(self.origin.join(path.trim_start_matches('/'))?)
    }

    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// A clone with its own token cell, starting from the current token.
    pub async fn clone_detached(&self) -> Self {
        ApiClient {
            http: self.http.clone(),
            origin: self.origin.clone(),
            token: Arc::new(RwLock::new(self.token().await)),
        }
    }

    /// Sends a request and returns the raw response, whatever its status.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<Response> {
        let url = self.url(path)?;
        debug!(%method, %url, "API request");

        let mut builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = self.token.read().await.as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        Ok(builder.send().await?)
    }

    /// Sends a request under the fetch contract and decodes the payload.
    pub async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self.send(method, path, body).await?;
        read_payload(response).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Option<T>> {
        self.request::<T, ()>(Method::GET, path, None).await
    }
}

/// Applies the status and empty-body rules to a response.
pub(crate) async fn read_payload<T: DeserializeOwned>(response: Response) -> ClientResult<Option<T>> {
    let status = response.status();
    if !status.is_success() {
        return Err(http_error(status));
    }
    if status == StatusCode::NO_CONTENT || response.content_length() == Some(0) {
        return Ok(None);
    }

    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_slice(&bytes)?))
}

pub(crate) fn http_error(status: StatusCode) -> ClientError {
    ClientError::Http {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or_default().to_string(),
    }
}
