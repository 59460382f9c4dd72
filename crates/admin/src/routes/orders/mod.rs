//! Admin order management routes.

pub mod actions;
pub mod export;
pub mod list;
pub mod types;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Order route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list::index))
        .route("/orders/export", get(export::csv))
        .route("/orders/{id}", get(list::detail).delete(actions::remove))
        .route("/orders/{id}/status", post(actions::set_status))
        .route("/orders/{id}/note", post(actions::set_note))
}
