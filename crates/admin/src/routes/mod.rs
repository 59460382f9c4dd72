//! Admin routes.

pub mod auth;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// All admin routes.
pub fn routes() -> Router<AppState> {
    Router::new().merge(auth::routes()).merge(orders::routes())
}
