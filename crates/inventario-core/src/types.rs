//! # Domain Types
//!
//! Typed views of the records the backend exposes.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Usuario      │   │    Producto     │   │     Pedido      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  email (login)  │   │  codigo_barras  │   │  empresa (ref)  │       │
//! │  │  estado         │   │  precio_venta   │   │  fecha_entrega  │       │
//! │  │  roles (refs)   │   │  stock_minimo   │   │  estado         │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Empresa      │   │   Proveedor     │   │   Categoria     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐                          │
//! │  │ MovimientoInventario│   │    EntityRef    │  { id, nombre? }         │
//! │  └─────────────────────┘   └─────────────────┘                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Field names follow the backend verbatim (`nombre_completo`,
//! `fechaCreacion`, `passwordHash`, ...). They are externally fixed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::role::RoleRef;
use crate::{ACTIVE_STATUS, INACTIVE_STATUS};

// =============================================================================
// Record Status
// =============================================================================

/// `estado` of users and companies.
///
/// Anything other than the two known literals is kept verbatim and treated
/// as not active.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordStatus {
    Active,
    Inactive,
    Other(String),
}

impl RecordStatus {
    /// Returns the wire literal.
    pub fn as_str(&self) -> &str {
        match self {
            RecordStatus::Active => ACTIVE_STATUS,
            RecordStatus::Inactive => INACTIVE_STATUS,
            RecordStatus::Other(s) => s,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, RecordStatus::Active)
    }
}

impl Default for RecordStatus {
    /// A record without `estado` is not active.
    fn default() -> Self {
        RecordStatus::Other(String::new())
    }
}

impl From<String> for RecordStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            ACTIVE_STATUS => RecordStatus::Active,
            INACTIVE_STATUS => RecordStatus::Inactive,
            _ => RecordStatus::Other(s),
        }
    }
}

impl From<&str> for RecordStatus {
    fn from(s: &str) -> Self {
        RecordStatus::from(s.to_string())
    }
}

impl From<RecordStatus> for String {
    fn from(status: RecordStatus) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Entity Reference
// =============================================================================

/// A nested reference to another record: `{ "id": 1 }` or
/// `{ "id": 1, "nombre": "Acme" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EntityRef {
    pub id: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
}

impl EntityRef {
    /// A bare reference (what forms send back to the backend).
    pub fn id(id: i64) -> Self {
        EntityRef { id, nombre: None }
    }

    /// Display label, falling back to the id.
    pub fn label(&self) -> String {
        self.nombre
            .clone()
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

// =============================================================================
// Usuario
// =============================================================================

/// A user account as the `usuarios` resource returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Usuario {
    pub id: i64,

    /// Display name.
    pub nombre_completo: String,

    /// Login key. Compared case-sensitively.
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,

    #[serde(default)]
    #[ts(as = "String")]
    pub estado: RecordStatus,

    #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,

    #[serde(rename = "ultimaConexion", default, skip_serializing_if = "Option::is_none")]
    pub ultima_conexion: Option<String>,

    /// Stored credential. Plain text on the current backend.
    #[serde(rename = "passwordHash", default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa: Option<EntityRef>,

    /// Absent, `null` and empty are equivalent: no role assigned.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub roles: Vec<RoleRef>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Usuario {
    /// Returns true if the account may open a session.
    pub fn is_active(&self) -> bool {
        self.estado.is_active()
    }

    pub fn has_roles(&self) -> bool {
        !self.roles.is_empty()
    }
}

// =============================================================================
// Empresa
// =============================================================================

/// A company (tenant) managed by the back office.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Empresa {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub ruc: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub email_contacto: String,
    #[serde(default)]
    pub sector: String,
    #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
    #[serde(default)]
    #[ts(as = "String")]
    pub estado: RecordStatus,
}

// =============================================================================
// Proveedor
// =============================================================================

/// A supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Proveedor {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub contacto: String,
    #[serde(default)]
    pub telefono: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub direccion: String,
    #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
}

// =============================================================================
// Categoria
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Categoria {
    pub id: i64,
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
}

// =============================================================================
// Producto
// =============================================================================

/// A product. The inventory screen is a view over this resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Producto {
    pub id: i64,
    #[serde(default)]
    pub codigo_barras: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categoria: Option<EntityRef>,
    #[serde(default)]
    pub precio_compra: f64,
    #[serde(default)]
    pub precio_venta: f64,
    #[serde(default)]
    pub stock_minimo: i64,
    #[serde(default)]
    pub stock_maximo: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa: Option<EntityRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proveedor: Option<EntityRef>,
    #[serde(rename = "fechaCreacion", default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<String>,
    #[serde(rename = "ultimaActualizacion", default, skip_serializing_if = "Option::is_none")]
    pub ultima_actualizacion: Option<String>,
}

impl Producto {
    /// Company label used by the inventory table.
    pub fn empresa_label(&self) -> String {
        self.empresa
            .as_ref()
            .and_then(|e| e.nombre.clone())
            .unwrap_or_else(|| "Sin empresa".to_string())
    }
}

// =============================================================================
// Pedido
// =============================================================================

/// A purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Pedido {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empresa: Option<EntityRef>,
    #[serde(default)]
    pub fecha_solicitud: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_entrega: Option<String>,
    #[serde(default)]
    pub estado: String,
}

// =============================================================================
// Movimiento de Inventario
// =============================================================================

/// A stock movement (in/out) of one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MovimientoInventario {
    pub id_movimiento: i64,
    pub id_producto: i64,
    pub tipo_movimiento: String,
    pub cantidad: i64,
    #[serde(default)]
    pub fecha_movimiento: String,
    #[serde(default)]
    pub motivo: String,
    #[serde(default)]
    pub id_usuario: i64,
    #[serde(default)]
    pub costo_unitario: f64,
    #[serde(default)]
    pub ubicacion: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
