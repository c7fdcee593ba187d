//! # Output Rendering
//!
//! Turns command results into terminal text. Results go to stdout,
//! notifications to stderr so `-o json` output stays pipeable.

use serde::Serialize;

use inventario_core::navigation::Menu;
use inventario_core::notification::Notification;
use inventario_core::session::Session;

use crate::commands::resource::TableView;
use crate::error::{ApiError, ApiResult};

/// `[success] Éxito: Bienvenido, Ana`
pub fn render_notification(notification: &Notification) -> String {
    format!(
        "[{}] {}: {}",
        notification.severity.as_str(),
        notification.summary,
        notification.detail
    )
}

pub fn notify(notification: &Notification) {
    eprintln!("{}", render_notification(notification));
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ApiResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::input(format!("Cannot render JSON: {}", e)))?;
    println!("{}", text);
    Ok(())
}

/// Column-aligned table with a page footer.
pub fn render_table(view: &TableView) -> String {
    let mut widths: Vec<usize> = view.headers.iter().map(|h| h.chars().count()).collect();
    for row in &view.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&view.title);
    out.push('\n');
    out.push_str(&line(&view.headers));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');
    if view.rows.is_empty() {
        out.push_str("(sin registros)\n");
    }
    for row in &view.rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out.push_str(&format!(
        "Página {} de {} ({} registros)",
        view.page,
        view.total_pages.max(1),
        view.total
    ));
    out
}

fn pad(cell: &str, width: usize) -> String {
    let len = cell.chars().count();
    format!("{}{}", cell, " ".repeat(width.saturating_sub(len)))
}

pub fn render_menu(menu: &Menu) -> String {
    let mut out = String::new();
    for item in &menu.items {
        out.push_str(&format!("  {:<14} {}\n", item.label, item.route.path()));
    }
    if let Some(user) = &menu.user_menu {
        out.push_str(&format!("  {}  ({})\n", user.user_label, user.sign_out_label));
    }
    out.trim_end().to_string()
}

pub fn render_session(session: &Session) -> String {
    let roles: Vec<String> = session
        .user
        .roles
        .iter()
        .map(|r| match &r.nombre {
            Some(nombre) => nombre.clone(),
            None => format!("#{}", r.id),
        })
        .collect();

    format!(
        "{} <{}>\nRoles: {}\nDesde: {}",
        session.user.display_name(),
        session.user.email,
        if roles.is_empty() {
            "-".to_string()
        } else {
            roles.join(", ")
        },
        session.established_at.format("%Y-%m-%d %H:%M:%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use inventario_core::navigation::menu_for;

    fn view() -> TableView {
        TableView {
            title: "Empresas".into(),
            headers: vec!["ID".into(), "Nombre".into()],
            rows: vec![
                vec!["1".into(), "Acme".into()],
                vec!["12".into(), "Compañía Ñandú".into()],
            ],
            page: 1,
            total_pages: 1,
            total: 2,
        }
    }

    #[test]
    fn test_table_aligns_columns() {
        let text = render_table(&view());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Empresas");
        assert_eq!(lines[1], "ID  Nombre");
        assert_eq!(lines[2], "--  --------------");
        assert_eq!(lines[3], "1   Acme");
        assert_eq!(lines[4], "12  Compañía Ñandú");
        assert_eq!(lines[5], "Página 1 de 1 (2 registros)");
    }

    #[test]
    fn test_empty_table() {
        let mut v = view();
        v.rows.clear();
        v.total = 0;
        v.total_pages = 0;
        let text = render_table(&v);
        assert!(text.contains("(sin registros)"));
        assert!(text.ends_with("Página 1 de 1 (0 registros)"));
    }

    #[test]
    fn test_notification_line() {
        let n = Notification::success("Bienvenido, Ana");
        assert_eq!(render_notification(&n), "[success] Éxito: Bienvenido, Ana");
    }

    #[test]
    fn test_anonymous_menu() {
        let text = render_menu(&menu_for(None));
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("/acerca-de"));
    }
}
