//! Checkout route.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use boostline_core::types::{OrderId, Price};

use crate::error::Result;
use crate::middleware::session::{Device, RequireAuth};
use crate::services::checkout::{CheckoutInput, CheckoutService};
use crate::state::AppState;

/// Checkout route tree.
pub fn routes() -> Router<AppState> {
    Router::new().route("/checkout", post(submit))
}

#[derive(Debug, Deserialize)]
pub struct SubmitInput {
    pub sender_phone: String,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub receipt_image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
    pub order_id: OrderId,
    pub total_amount: Price,
}

/// Submit the cart as an order.
///
/// Requires login - the `RequireAuth` rejection steers unauthenticated
/// clients to `/auth/login` instead of failing the order.
#[instrument(skip(state, user, input), fields(customer_id = %user.id))]
async fn submit(
    State(state): State<AppState>,
    Device(device): Device,
    RequireAuth(user): RequireAuth,
    Json(input): Json<SubmitInput>,
) -> Result<(StatusCode, Json<SubmitResponse>)> {
    let order = CheckoutService::new(state.store())
        .submit(
            device,
            Some(user.id),
            CheckoutInput {
                sender_phone: input.sender_phone,
                reference_number: input.reference_number,
                receipt_image: input.receipt_image,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: "Your order has been placed successfully!".to_string(),
            order_id: order.order_id,
            total_amount: order.total_amount,
        }),
    ))
}
