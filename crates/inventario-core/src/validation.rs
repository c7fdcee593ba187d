//! # Validation Module
//!
//! Presence checks on form payloads. The client validates nothing else;
//! formats, uniqueness and references are the backend's job.
//!
//! ## Where It Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI: create / update <resource> --data '{...}'                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  apply_defaults()   (create only: estado = "Activo" / "Pendiente")      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_payload() ← THIS MODULE                                       │
//! │       │                                                                 │
//! │       ├── not an object?     → NotAnObject                              │
//! │       ├── required missing?  → Required { field }  (first one only)     │
//! │       │                                                                 │
//! │       └── OK → request is sent                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use inventario_core::resource::Resource;
//! use inventario_core::validation::{apply_defaults, validate_payload};
//! use serde_json::json;
//!
//! let schema = Resource::Pedidos.schema();
//! let mut order = json!({ "empresa": { "id": 1 }, "fecha_entrega": "2024-06-01" });
//! apply_defaults(schema, &mut order);
//! assert_eq!(order["estado"], "Pendiente");
//! assert!(validate_payload(schema, &order).is_ok());
//! ```

use serde_json::Value;

use crate::error::ValidationError;
use crate::resource::ResourceSchema;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Returns true if the value counts as "not filled in": absent, null,
/// an empty or blank string.
fn is_missing(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(_) => false,
    }
}

/// Checks that the payload is an object carrying every required field.
///
/// Fields are checked in schema order and the first missing one is
/// reported.
pub fn validate_payload(schema: &ResourceSchema, payload: &Value) -> ValidationResult<()> {
    let object = payload
        .as_object()
        .ok_or_else(|| ValidationError::NotAnObject {
            resource: schema.resource.path().to_string(),
        })?;

    for field in schema.required {
        if is_missing(object.get(*field)) {
            return Err(ValidationError::Required {
                field: (*field).to_string(),
            });
        }
    }

    Ok(())
}

/// Fills the schema's defaults into a new-record payload. Fields already
/// present (even null) are left alone. Non-object payloads are untouched.
pub fn apply_defaults(schema: &ResourceSchema, payload: &mut Value) {
    if let Some(object) = payload.as_object_mut() {
        for (field, default) in schema.defaults {
            object
                .entry((*field).to_string())
                .or_insert_with(|| Value::String((*default).to_string()));
        }
    }
}

/// Parses a record id given on the command line.
pub fn parse_record_id(raw: &str) -> ValidationResult<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    raw.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be an integer".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Resource;
    use serde_json::json;

    #[test]
    fn test_order_presence_checks_in_order() {
        let schema = Resource::Pedidos.schema();

        let err = validate_payload(schema, &json!({})).unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "empresa".into() });

        let err = validate_payload(schema, &json!({ "empresa": { "id": 1 }, "fecha_entrega": "" }))
            .unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "fecha_entrega".into() });

        let err = validate_payload(
            schema,
            &json!({ "empresa": { "id": 1 }, "fecha_entrega": "2024-06-01", "estado": null }),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::Required { field: "estado".into() });
    }

    #[test]
    fn test_other_resources_accept_any_object() {
        assert!(validate_payload(Resource::Productos.schema(), &json!({})).is_ok());
        assert!(matches!(
            validate_payload(Resource::Productos.schema(), &json!([1, 2])),
            Err(ValidationError::NotAnObject { .. })
        ));
    }

    #[test]
    fn test_apply_defaults() {
        let mut empresa = json!({ "nombre": "Acme" });
        apply_defaults(Resource::Empresas.schema(), &mut empresa);
        assert_eq!(empresa["estado"], "Activo");

        let mut explicit = json!({ "estado": "Inactivo" });
        apply_defaults(Resource::Usuarios.schema(), &mut explicit);
        assert_eq!(explicit["estado"], "Inactivo");

        let mut order = json!({});
        apply_defaults(Resource::Pedidos.schema(), &mut order);
        assert_eq!(order["estado"], "Pendiente");
    }

    #[test]
    fn test_parse_record_id() {
        assert_eq!(parse_record_id(" 42 ").unwrap(), 42);
        assert!(matches!(parse_record_id(""), Err(ValidationError::Required { .. })));
        assert!(matches!(
            parse_record_id("abc"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }
}
