//! Order list and detail handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;

use boostline_core::order::StoredOrder;
use boostline_core::types::OrderId;

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

use super::types::{OrdersPage, OrdersQuery, apply_filters, paginate};

/// Filtered, searched, paginated order list.
///
/// A "refresh" in the panel is just a re-request of this endpoint - the
/// list is always read fresh from the store.
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn index(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<OrdersPage>> {
    let status = query.status_filter()?;
    let orders = state.store().orders().all().await?;
    let filtered = apply_filters(orders, status, query.q.as_deref());
    Ok(Json(paginate(filtered, query.page)))
}

/// One order, in full (including payment proof and line items).
#[instrument(skip(admin, state), fields(admin_id = %admin.id))]
pub async fn detail(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<StoredOrder>> {
    let order = state
        .store()
        .orders()
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;
    Ok(Json(order))
}
