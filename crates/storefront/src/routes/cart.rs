//! Cart routes.
//!
//! The cart is keyed by the device cookie, not the logged-in user, so it
//! survives reloads and account switches on the same browser. `DELETE
//! /cart` is the explicit reset for anyone who wants isolation.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use boostline_core::cart::{Cart, CartItem};
use boostline_core::types::{CartItemId, Price};

use crate::error::{AppError, Result};
use crate::middleware::session::Device;
use crate::state::AppState;

/// Cart route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(show).delete(clear))
        .route("/cart/items/{id}/count", post(set_count))
        .route("/cart/items/{id}", delete(remove))
}

/// Client-facing view of the cart.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    /// Sum of `price * count`.
    pub total: Price,
    /// Sum of counts (the badge number).
    pub count: u32,
}

impl CartView {
    pub(crate) fn of(cart: &Cart) -> Self {
        Self {
            items: cart.snapshot(),
            total: cart.total(),
            count: cart.count(),
        }
    }
}

/// The device's cart.
#[instrument(skip(state))]
async fn show(State(state): State<AppState>, Device(device): Device) -> Result<Json<CartView>> {
    let cart = state.store().carts().get(device).await?;
    Ok(Json(CartView::of(&cart)))
}

#[derive(Debug, Deserialize)]
pub struct CountInput {
    /// Signed delta; the resulting count clamps to a minimum of 1.
    pub delta: i32,
}

/// Apply a count delta to one line item.
#[instrument(skip(state))]
async fn set_count(
    State(state): State<AppState>,
    Device(device): Device,
    Path(id): Path<CartItemId>,
    Json(input): Json<CountInput>,
) -> Result<Json<CartView>> {
    let (cart, found) = state
        .store()
        .carts()
        .mutate(device, move |cart| cart.set_count(id, input.delta))
        .await?;
    if !found {
        return Err(AppError::NotFound(format!("cart item {id}")));
    }
    Ok(Json(CartView::of(&cart)))
}

/// Remove one line item. The only way an item leaves the cart short of a
/// full clear.
#[instrument(skip(state))]
async fn remove(
    State(state): State<AppState>,
    Device(device): Device,
    Path(id): Path<CartItemId>,
) -> Result<Json<CartView>> {
    let (cart, found) = state
        .store()
        .carts()
        .mutate(device, move |cart| cart.remove(id))
        .await?;
    if !found {
        return Err(AppError::NotFound(format!("cart item {id}")));
    }
    Ok(Json(CartView::of(&cart)))
}

/// Clear the device's cart.
#[instrument(skip(state))]
async fn clear(State(state): State<AppState>, Device(device): Device) -> Result<Json<CartView>> {
    state.store().carts().clear(device).await?;
    Ok(Json(CartView::of(&Cart::new())))
}
