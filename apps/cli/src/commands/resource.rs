//! # Resource Commands
//!
//! One generic implementation of the list/detail/create/edit/delete
//! screens, driven by each resource's schema.
//!
//! ## Write Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  inventario create pedidos --json '{"empresa":{"id":1}}'                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  require(Route::Pedidos)                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_defaults        estado = "Pendiente"                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_payload ───► "fecha_entrega is required"  (nothing sent)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /pedidos ──────► success notification                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use inventario_core::navigation::Route;
use inventario_core::notification::Notification;
use inventario_core::resource::{Resource, ResourceSchema, INVENTORY_SCHEMA};
use inventario_core::table::{paginate, rows};
use inventario_core::validation::{apply_defaults, parse_record_id, validate_payload};

use crate::error::ApiResult;
use crate::state::SessionState;

/// One rendered page of a resource table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub title: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// One-based.
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// Builds the table for `page` (one-based) out of the full record list.
pub fn table_view(
    schema: &ResourceSchema,
    records: &[Value],
    page: usize,
    page_size: usize,
) -> TableView {
    let page = paginate(records, page.saturating_sub(1), page_size);
    TableView {
        title: schema.title.to_string(),
        headers: schema.columns.iter().map(|c| c.header.to_string()).collect(),
        rows: rows(schema, &page.items),
        page: page.page + 1,
        total_pages: page.total_pages(),
        total: page.total,
    }
}

// =============================================================================
// Read
// =============================================================================

pub async fn list(
    state: &SessionState,
    resource: Resource,
    page: usize,
    page_size: Option<usize>,
) -> ApiResult<TableView> {
    debug!(%resource, page, "list command");
    state.store().require(resource.route()).await?;

    let records = state.records(resource).list().await?;
    let page_size = page_size.unwrap_or(state.ui().page_size);
    Ok(table_view(resource.schema(), &records, page, page_size))
}

/// The stock view: products with their company and stock bounds.
pub async fn inventory(
    state: &SessionState,
    page: usize,
    page_size: Option<usize>,
) -> ApiResult<TableView> {
    debug!(page, "inventory command");
    state.store().require(Route::Inventario).await?;

    let records = state.records(INVENTORY_SCHEMA.resource).list().await?;
    let page_size = page_size.unwrap_or(state.ui().page_size);
    Ok(table_view(&INVENTORY_SCHEMA, &records, page, page_size))
}

pub async fn get(state: &SessionState, resource: Resource, id: &str) -> ApiResult<Value> {
    let id = parse_record_id(id)?;
    debug!(%resource, id, "get command");
    state.store().require(resource.route()).await?;

    Ok(state.records(resource).get(id).await?)
}

// =============================================================================
// Write
// =============================================================================

/// Creates a record. Schema defaults fill omitted fields and the presence
/// checks run before anything is sent.
pub async fn create(
    state: &SessionState,
    resource: Resource,
    mut body: Value,
) -> ApiResult<(Option<Value>, Notification)> {
    debug!(%resource, "create command");
    state.store().require(resource.route()).await?;

    let schema = resource.schema();
    apply_defaults(schema, &mut body);
    validate_payload(schema, &body)?;

    let created = state.records(resource).create(&body).await?;
    info!(%resource, "Record created");
    Ok((created, notice(state, "Registro creado correctamente")))
}

/// Replaces a record. The id from the command line is written into the
/// body unless the body already names one.
pub async fn update(
    state: &SessionState,
    resource: Resource,
    id: &str,
    mut body: Value,
) -> ApiResult<(Option<Value>, Notification)> {
    let id = parse_record_id(id)?;
    debug!(%resource, id, "update command");
    state.store().require(resource.route()).await?;

    let schema = resource.schema();
    validate_payload(schema, &body)?;
    if let Some(object) = body.as_object_mut() {
        object
            .entry(schema.id_field.to_string())
            .or_insert_with(|| Value::from(id));
    }

    let updated = state.records(resource).update(id, &body).await?;
    info!(%resource, id, "Record updated");
    Ok((updated, notice(state, "Registro actualizado correctamente")))
}

pub async fn delete(state: &SessionState, resource: Resource, id: &str) -> ApiResult<Notification> {
    let id = parse_record_id(id)?;
    debug!(%resource, id, "delete command");
    state.store().require(resource.route()).await?;

    state.records(resource).delete(id).await?;
    info!(%resource, id, "Record deleted");
    Ok(notice(state, "Registro eliminado correctamente"))
}

fn notice(state: &SessionState, detail: &str) -> Notification {
    Notification::success(detail).with_life(state.ui().notification_life_ms)
}
