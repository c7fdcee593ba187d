//! Generic CRUD over the backend's uniform REST resources.
//!
//! [`RecordClient`] works on raw JSON records of any [`Resource`] and is
//! what the list/form screens use. [`ResourceClient`] is the typed variant
//! for code that knows its model.

use std::marker::PhantomData;

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use inventario_core::resource::{Resource, ResourceModel};

use crate::error::{ClientError, ClientResult};
use crate::http::ApiClient;

// =============================================================================
// Raw Records
// =============================================================================

/// CRUD client for one resource, exchanging raw JSON records.
#[derive(Debug, Clone)]
pub struct RecordClient {
    api: ApiClient,
    resource: Resource,
}

impl RecordClient {
    pub fn new(api: ApiClient, resource: Resource) -> Self {
        RecordClient { api, resource }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    fn item_path(&self, id: i64) -> String {
        format!("{}/{}", self.resource.path(), id)
    }

    /// `GET /{resource}`. An empty answer is an empty list.
    pub async fn list(&self) -> ClientResult<Vec<Value>> {
        let records: Option<Vec<Value>> = self.api.get(self.resource.path()).await?;
        let records = records.unwrap_or_default();
        debug!(resource = %self.resource, count = records.len(), "Listed records");
        Ok(records)
    }

    /// `GET /{resource}/{id}`.
    pub async fn get(&self, id: i64) -> ClientResult<Value> {
        self.api
            .get::<Value>(&self.item_path(id))
            .await?
            .ok_or_else(|| ClientError::Decode(format!("empty body for {}", self.item_path(id))))
    }

    /// `POST /{resource}`. Returns the created record when the backend
    /// echoes it.
    pub async fn create(&self, record: &Value) -> ClientResult<Option<Value>> {
        self.api
            .request(Method::POST, self.resource.path(), Some(record))
            .await
    }

    /// `PUT /{resource}/{id}`.
    pub async fn update(&self, id: i64, record: &Value) -> ClientResult<Option<Value>> {
        self.api
            .request(Method::PUT, &self.item_path(id), Some(record))
            .await
    }

    /// `DELETE /{resource}/{id}`. Any body in the answer is ignored.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api
            .request::<Value, ()>(Method::DELETE, &self.item_path(id), None)
            .await?;
        Ok(())
    }
}

// =============================================================================
// Typed Records
// =============================================================================

/// Type-safe CRUD client for a single model.
#[derive(Debug, Clone)]
pub struct ResourceClient<T: ResourceModel> {
    api: ApiClient,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: ResourceModel> ResourceClient<T> {
    pub fn new(api: ApiClient) -> Self {
        ResourceClient {
            api,
            _phantom: PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", T::RESOURCE.path(), id)
    }

    pub async fn list(&self) -> ClientResult<Vec<T>> {
        let items: Option<Vec<T>> = self.api.get(T::RESOURCE.path()).await?;
        Ok(items.unwrap_or_default())
    }

    pub async fn get(&self, id: i64) -> ClientResult<T> {
        self.api
            .get::<T>(&Self::item_path(id))
            .await?
            .ok_or_else(|| ClientError::Decode(format!("empty body for {}", Self::item_path(id))))
    }

    pub async fn create<B: serde::Serialize + ?Sized>(&self, item: &B) -> ClientResult<Option<T>> {
        self.api
            .request(Method::POST, T::RESOURCE.path(), Some(item))
            .await
    }

    pub async fn update(&self, item: &T) -> ClientResult<Option<T>> {
        self.api
            .request(Method::PUT, &Self::item_path(item.id()), Some(item))
            .await
    }

    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api
            .request::<Value, ()>(Method::DELETE, &Self::item_path(id), None)
            .await?;
        Ok(())
    }
}
