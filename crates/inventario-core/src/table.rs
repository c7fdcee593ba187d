//! # Tables
//!
//! Schema-driven rows and client-side pagination for list screens.
//!
//! ```text
//! records (JSON) ──► rows(schema) ──► paginate(page, size) ──► Page<Vec<String>>
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::resource::{Column, ResourceSchema};

/// One page of a longer list. `page` is zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    pub fn has_next(&self) -> bool {
        self.page + 1 < self.total_pages()
    }
}

/// Cuts one page out of `items`. A page past the end is empty; a zero
/// page size is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: items[start..end].to_vec(),
        page,
        page_size,
        total: items.len(),
    }
}

/// Renders one cell. Follows dotted paths into nested objects; strings are
/// shown without quotes and missing or null values use the column fallback.
pub fn cell_text(record: &Value, column: &Column) -> String {
    let value = column
        .path
        .split('.')
        .try_fold(record, |current, key| current.get(key));

    match value {
        None | Some(Value::Null) => column.fallback.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                Value::Object(o) => o
                    .get("nombre")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .or_else(|| o.get("id").map(Value::to_string))
                    .unwrap_or_default(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

/// Renders every record into a row of cells, in column order.
pub fn rows(schema: &ResourceSchema, records: &[Value]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|record| {
            schema
                .columns
                .iter()
                .map(|column| cell_text(record, column))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Resource, INVENTORY_SCHEMA};
    use serde_json::json;

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=12).collect();

        let first = paginate(&items, 0, 5);
        assert_eq!(first.items, vec![1, 2, 3, 4, 5]);
        assert_eq!(first.total_pages(), 3);
        assert!(first.has_next());

        let last = paginate(&items, 2, 5);
        assert_eq!(last.items, vec![11, 12]);
        assert!(!last.has_next());

        assert!(paginate(&items, 9, 5).items.is_empty());
        assert_eq!(paginate(&items, 0, 0).items, vec![1]);
    }

    #[test]
    fn test_empty_list_has_no_pages() {
        let page = paginate::<u32>(&[], 0, 5);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_next());
    }

    #[test]
    fn test_inventory_rows_use_fallbacks() {
        let records = vec![
            json!({ "id": 1, "nombre": "Tornillo", "empresa": { "id": 2, "nombre": "Acme" },
                    "stock_minimo": 5, "stock_maximo": 50 }),
            json!({ "id": 2, "nombre": "Tuerca", "empresa": null, "stock_minimo": 1 }),
        ];
        let rows = rows(&INVENTORY_SCHEMA, &records);
        assert_eq!(rows[0], vec!["1", "Tornillo", "Acme", "5", "50"]);
        assert_eq!(rows[1], vec!["2", "Tuerca", "Sin empresa", "1", ""]);
    }

    #[test]
    fn test_cell_text_for_role_lists() {
        let column = Column {
            path: "roles",
            header: "Rol",
            fallback: "Sin rol",
        };
        let record = json!({ "roles": [{ "id": 1, "nombre": "Administrador" }, { "id": 3 }] });
        assert_eq!(cell_text(&record, &column), "Administrador, 3");
        assert_eq!(cell_text(&json!({}), &column), "Sin rol");
    }

    #[test]
    fn test_rows_follow_schema_order() {
        let schema = Resource::Roles.schema();
        let rows = rows(schema, &[json!({ "nombre": "Vendedor", "id": 2 })]);
        assert_eq!(rows[0][0], "2");
        assert_eq!(rows[0][1], "Vendedor");
    }
}
