//! # Resource Catalogue
//!
//! The backend exposes eight uniform REST resources. Every screen of the
//! application is the same list + form shape over one of them, so the
//! client is driven by a [`ResourceSchema`] instead of per-screen code.
//!
//! ## Wire Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET    {origin}/{resource}          list                               │
//! │  GET    {origin}/{resource}/{id}     get                                │
//! │  POST   {origin}/{resource}          create                             │
//! │  PUT    {origin}/{resource}/{id}     update                             │
//! │  DELETE {origin}/{resource}/{id}     delete                             │
//! │                                                                         │
//! │  resource ∈ empresas roles usuarios productos categorias                │
//! │             proveedores pedidos movimientos                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The inventory screen has no resource of its own; it is a different
//! column set over `productos` ([`INVENTORY_SCHEMA`]).

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::navigation::Route;
use crate::role::Rol;
use crate::types::{Categoria, Empresa, MovimientoInventario, Pedido, Producto, Proveedor, Usuario};
use crate::{ACTIVE_STATUS, DEFAULT_ORDER_STATUS};

// =============================================================================
// Resource
// =============================================================================

/// A backend collection. The path names are externally fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Empresas,
    Roles,
    Usuarios,
    Productos,
    Categorias,
    Proveedores,
    Pedidos,
    Movimientos,
}

impl Resource {
    pub const ALL: [Resource; 8] = [
        Resource::Empresas,
        Resource::Roles,
        Resource::Usuarios,
        Resource::Productos,
        Resource::Categorias,
        Resource::Proveedores,
        Resource::Pedidos,
        Resource::Movimientos,
    ];

    /// Path segment under the backend origin.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Empresas => "empresas",
            Resource::Roles => "roles",
            Resource::Usuarios => "usuarios",
            Resource::Productos => "productos",
            Resource::Categorias => "categorias",
            Resource::Proveedores => "proveedores",
            Resource::Pedidos => "pedidos",
            Resource::Movimientos => "movimientos",
        }
    }

    /// The page that manages this resource.
    pub fn route(&self) -> Route {
        match self {
            Resource::Empresas => Route::Empresas,
            Resource::Roles => Route::Roles,
            Resource::Usuarios => Route::Usuarios,
            Resource::Productos => Route::Productos,
            Resource::Categorias => Route::Categorias,
            Resource::Proveedores => Route::Proveedores,
            Resource::Pedidos => Route::Pedidos,
            Resource::Movimientos => Route::Movimientos,
        }
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        match self {
            Resource::Empresas => &EMPRESAS_SCHEMA,
            Resource::Roles => &ROLES_SCHEMA,
            Resource::Usuarios => &USUARIOS_SCHEMA,
            Resource::Productos => &PRODUCTOS_SCHEMA,
            Resource::Categorias => &CATEGORIAS_SCHEMA,
            Resource::Proveedores => &PROVEEDORES_SCHEMA,
            Resource::Pedidos => &PEDIDOS_SCHEMA,
            Resource::Movimientos => &MOVIMIENTOS_SCHEMA,
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = CoreError;

    /// Accepts the path name, its singular and an English alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let resource = match s.trim().to_lowercase().as_str() {
            "empresas" | "empresa" | "companies" | "company" => Resource::Empresas,
            "roles" | "rol" | "role" => Resource::Roles,
            "usuarios" | "usuario" | "users" | "user" => Resource::Usuarios,
            "productos" | "producto" | "products" | "product" => Resource::Productos,
            "categorias" | "categoria" | "categorías" | "categoría" | "categories"
            | "category" => Resource::Categorias,
            "proveedores" | "proveedor" | "suppliers" | "supplier" => Resource::Proveedores,
            "pedidos" | "pedido" | "orders" | "order" => Resource::Pedidos,
            "movimientos" | "movimiento" | "movements" | "movement" => Resource::Movimientos,
            _ => return Err(CoreError::UnknownResource(s.to_string())),
        };
        Ok(resource)
    }
}

// =============================================================================
// Schema
// =============================================================================

/// One table column. `path` may reach into a nested reference
/// (`empresa.nombre`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub path: &'static str,
    pub header: &'static str,
    /// Shown when the value is missing or null.
    pub fallback: &'static str,
}

const fn col(path: &'static str, header: &'static str) -> Column {
    Column {
        path,
        header,
        fallback: "",
    }
}

/// Table and form description of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceSchema {
    pub resource: Resource,

    /// Screen title.
    pub title: &'static str,

    /// Key holding the record id. Most resources use `id`.
    pub id_field: &'static str,

    pub columns: &'static [Column],

    /// Fields a create/update payload must carry (presence only).
    pub required: &'static [&'static str],

    /// Values filled into a new record when the payload omits them.
    pub defaults: &'static [(&'static str, &'static str)],
}

pub static EMPRESAS_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Empresas,
    title: "Empresas",
    id_field: "id",
    columns: &[
        col("id", "ID"),
        col("nombre", "Nombre"),
        col("ruc", "RUC"),
        col("direccion", "Dirección"),
        col("telefono", "Teléfono"),
        col("email_contacto", "Email"),
        col("sector", "Sector"),
        col("estado", "Estado"),
        col("fechaCreacion", "Fecha de Creación"),
    ],
    required: &[],
    defaults: &[("estado", ACTIVE_STATUS)],
};

pub static ROLES_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Roles,
    title: "Roles",
    id_field: "id",
    columns: &[
        col("id", "ID"),
        col("nombre", "Nombre"),
        col("descripcion", "Descripción"),
        col("fechaCreacion", "Fecha de Creación"),
    ],
    required: &[],
    defaults: &[],
};

pub static USUARIOS_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Usuarios,
    title: "Usuarios",
    id_field: "id",
    columns: &[
        col("id", "ID"),
        col("nombre_completo", "Nombre Completo"),
        col("email", "Email"),
        col("telefono", "Teléfono"),
        col("estado", "Estado"),
        col("fechaCreacion", "Fecha Creación"),
        Column {
            path: "ultimaConexion",
            header: "Última Conexión",
            fallback: "Nunca",
        },
        Column {
            path: "roles",
            header: "Rol",
            fallback: "Sin rol",
        },
        Column {
            path: "empresa.nombre",
            header: "Empresa",
            fallback: "Sin empresa",
        },
    ],
    required: &[],
    defaults: &[("estado", ACTIVE_STATUS)],
};

pub static PRODUCTOS_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Productos,
    title: "Productos",
    id_field: "id",
    columns: &[
        col("id", "ID"),
        col("codigo_barras", "Código de Barras"),
        col("nombre", "Nombre"),
        col("descripcion", "Descripción"),
        Column {
            path: "categoria.nombre",
            header: "Categoría",
            fallback: "Sin categoría",
        },
        Column {
            path: "empresa.nombre",
            header: "Empresa",
            fallback: "Sin empresa",
        },
        Column {
            path: "proveedor.nombre",
            header: "Proveedor",
            fallback: "Sin proveedor",
        },
        col("precio_compra", "Precio Compra"),
        col("precio_venta", "Precio Venta"),
        col("stock_minimo", "Stock Mínimo"),
        col("stock_maximo", "Stock Máximo"),
        col("fechaCreacion", "Fecha Creación"),
    ],
    required: &[],
    defaults: &[],
};

/// Inventory view over `productos`.
pub static INVENTORY_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Productos,
    title: "Inventario",
    id_field: "id",
    columns: &[
        col("id", "ID"),
        col("nombre", "Producto"),
        Column {
            path: "empresa.nombre",
            header: "Empresa",
            fallback: "Sin empresa",
        },
        col("stock_minimo", "Stock Mínimo"),
        col("stock_maximo", "Stock Máximo"),
    ],
    required: &[],
    defaults: &[],
};

pub static CATEGORIAS_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Categorias,
    title: "Categorías",
    id_field: "id",
    columns: &[
        col("id", "ID"),
        col("nombre", "Nombre"),
        col("descripcion", "Descripción"),
        col("fechaCreacion", "Fecha de Creación"),
    ],
    required: &[],
    defaults: &[],
};

pub static PROVEEDORES_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Proveedores,
    title: "Proveedores",
    id_field: "id",
    columns: &[
        col("id", "ID"),
        col("nombre", "Nombre"),
        col("contacto", "Contacto"),
        col("telefono", "Teléfono"),
        col("email", "Email"),
        col("direccion", "Dirección"),
        col("fechaCreacion", "Fecha de Creación"),
    ],
    required: &[],
    defaults: &[],
};

pub static PEDIDOS_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Pedidos,
    title: "Pedidos",
    id_field: "id",
    columns: &[
        col("id", "ID"),
        Column {
            path: "empresa.nombre",
            header: "Empresa",
            fallback: "Sin empresa",
        },
        col("fecha_solicitud", "Fecha Solicitud"),
        col("fecha_entrega", "Fecha Entrega"),
        col("estado", "Estado"),
    ],
    required: &["empresa", "fecha_entrega", "estado"],
    defaults: &[("estado", DEFAULT_ORDER_STATUS)],
};

pub static MOVIMIENTOS_SCHEMA: ResourceSchema = ResourceSchema {
    resource: Resource::Movimientos,
    title: "Movimientos",
    id_field: "id_movimiento",
    columns: &[
        col("id_movimiento", "ID"),
        col("id_producto", "Producto"),
        col("tipo_movimiento", "Tipo"),
        col("cantidad", "Cantidad"),
        col("fecha_movimiento", "Fecha"),
        col("motivo", "Motivo"),
        col("costo_unitario", "Costo Unitario"),
        col("ubicacion", "Ubicación"),
    ],
    required: &[],
    defaults: &[],
};

// =============================================================================
// Typed Models
// =============================================================================

/// A typed record of one resource.
pub trait ResourceModel: Serialize + DeserializeOwned + Send + Sync {
    const RESOURCE: Resource;

    fn id(&self) -> i64;
}

macro_rules! impl_resource_model {
    ($ty:ty, $resource:expr, $id:ident) => {
        impl ResourceModel for $ty {
            const RESOURCE: Resource = $resource;

            fn id(&self) -> i64 {
                self.$id
            }
        }
    };
}

impl_resource_model!(Empresa, Resource::Empresas, id);
impl_resource_model!(Rol, Resource::Roles, id);
impl_resource_model!(Usuario, Resource::Usuarios, id);
impl_resource_model!(Producto, Resource::Productos, id);
impl_resource_model!(Categoria, Resource::Categorias, id);
impl_resource_model!(Proveedor, Resource::Proveedores, id);
impl_resource_model!(Pedido, Resource::Pedidos, id);
impl_resource_model!(MovimientoInventario, Resource::Movimientos, id_movimiento);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_names_parse() {
        assert_eq!("empresas".parse::<Resource>().unwrap(), Resource::Empresas);
        assert_eq!("Pedido".parse::<Resource>().unwrap(), Resource::Pedidos);
        assert_eq!("users".parse::<Resource>().unwrap(), Resource::Usuarios);
        assert_eq!("categorías".parse::<Resource>().unwrap(), Resource::Categorias);
        assert!(matches!(
            "facturas".parse::<Resource>(),
            Err(CoreError::UnknownResource(_))
        ));
    }

    #[test]
    fn test_every_resource_round_trips_through_its_path() {
        for resource in Resource::ALL {
            assert_eq!(resource.path().parse::<Resource>().unwrap(), resource);
            assert_eq!(resource.schema().resource, resource);
            assert!(!resource.schema().columns.is_empty());
        }
    }

    #[test]
    fn test_admin_resources_map_to_admin_routes() {
        assert!(Resource::Usuarios.route().requires_admin());
        assert!(Resource::Roles.route().requires_admin());
        assert!(!Resource::Pedidos.route().requires_admin());
    }

    #[test]
    fn test_only_orders_declare_required_fields() {
        for resource in Resource::ALL {
            let required = resource.schema().required;
            if resource == Resource::Pedidos {
                assert_eq!(required, &["empresa", "fecha_entrega", "estado"]);
            } else {
                assert!(required.is_empty());
            }
        }
    }

    #[test]
    fn test_model_ids() {
        let movimiento: MovimientoInventario = serde_json::from_value(serde_json::json!({
            "id_movimiento": 12,
            "id_producto": 3,
            "tipo_movimiento": "entrada",
            "cantidad": 5
        }))
        .unwrap();
        assert_eq!(movimiento.id(), 12);
        assert_eq!(<MovimientoInventario as ResourceModel>::RESOURCE, Resource::Movimientos);
    }
}
