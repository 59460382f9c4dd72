//! Customer order routes.
//!
//! `GET /orders` and `GET /orders/active` are the plain polling endpoints;
//! `GET /orders/stream` serves the same data as server-sent events backed
//! by an [`OrderFeed`] subscription. Either way, the data source is the
//! periodically re-read order document - disconnecting the stream drops the
//! subscription and with it the polling task.

use std::convert::Infallible;

use axum::{
    Json, Router,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
};
use futures::Stream;
use serde::Serialize;
use tracing::instrument;

use boostline_core::order::StoredOrder;

use crate::error::Result;
use crate::middleware::session::RequireAuth;
use crate::state::AppState;

/// Customer order route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list))
        .route("/orders/active", get(active))
        .route("/orders/stream", get(stream))
}

/// The customer's own orders, newest first.
#[instrument(skip(state, user), fields(customer_id = %user.id))]
async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<StoredOrder>>> {
    let orders = state.store().orders().by_customer(&user.id).await?;
    Ok(Json(orders))
}

#[derive(Debug, Serialize)]
pub struct ActiveResponse {
    /// Number of Pending or Processing orders.
    pub active_count: usize,
}

/// The active-order badge count.
#[instrument(skip(state, user), fields(customer_id = %user.id))]
async fn active(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<ActiveResponse>> {
    let orders = state.store().orders().by_customer(&user.id).await?;
    let active_count = orders.iter().filter(|o| o.status.is_active()).count();
    Ok(Json(ActiveResponse { active_count }))
}

/// Live order updates as server-sent events.
///
/// One event per change, each carrying the full snapshot. The subscription
/// (and its poll timer) dies with the connection.
#[instrument(skip(state, user), fields(customer_id = %user.id))]
async fn stream(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let mut subscription = state.feed().subscribe(user.id);

    let stream = async_stream::stream! {
        loop {
            if subscription.changed().await.is_err() {
                break;
            }
            let snapshot = subscription.latest();
            match Event::default().json_data(&snapshot) {
                Ok(event) => yield Ok(event),
                Err(e) => {
                    tracing::error!(error = %e, "failed to encode order snapshot");
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
