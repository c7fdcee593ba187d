//! # Menu Command

use inventario_core::navigation::Menu;

use crate::state::SessionState;

/// Navigation menu for whatever session was restored.
pub async fn menu(state: &SessionState) -> Menu {
    state.store().menu().await
}
