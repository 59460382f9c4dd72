//! Storefront routes.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod tips;
pub mod wizard;

use axum::Router;

use crate::state::AppState;

/// All storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(wizard::routes())
        .merge(cart::routes())
        .merge(checkout::routes())
        .merge(orders::routes())
        .merge(tips::routes())
}
