//! Single order action handlers: status, admin note, delete.
//!
//! Status and note mutations carry the `version` the panel last read; the
//! store refuses the write with a conflict if the order moved on since.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::instrument;

use boostline_core::order::StoredOrder;
use boostline_core::types::{OrderId, OrderStatus};

use crate::error::Result;
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

/// Input for a status change.
#[derive(Debug, Deserialize)]
pub struct StatusInput {
    /// New status. Any status is reachable from any other.
    pub status: OrderStatus,
    /// Version the panel last read.
    pub version: u64,
}

/// Input for setting the admin note.
#[derive(Debug, Deserialize)]
pub struct NoteInput {
    /// New note text; empty clears the note. Overwrites any prior note and
    /// is visible to the owning customer.
    pub note: String,
    /// Version the panel last read.
    pub version: u64,
}

/// Change an order's status.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn set_status(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(input): Json<StatusInput>,
) -> Result<Json<StoredOrder>> {
    let order = state
        .store()
        .orders()
        .set_status(&id, input.status, input.version)
        .await?;
    tracing::info!(order_id = %id, status = %input.status, "status changed");
    Ok(Json(order))
}

/// Overwrite an order's customer-visible note.
#[instrument(skip(admin, state, input), fields(admin_id = %admin.id))]
pub async fn set_note(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(input): Json<NoteInput>,
) -> Result<Json<StoredOrder>> {
    let order = state
        .store()
        .orders()
        .set_admin_note(&id, input.note, input.version)
        .await?;
    Ok(Json(order))
}

/// Delete an order. Irreversible.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn remove(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<StatusCode> {
    state.store().orders().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
