//! Growth-tips route.

use axum::{Json, Router, extract::State, routing::post};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use boostline_core::catalog::Platform;

use crate::state::AppState;

/// Tips route tree.
pub fn routes() -> Router<AppState> {
    Router::new().route("/tips", post(generate))
}

#[derive(Debug, Deserialize)]
pub struct TipsInput {
    pub platform: Platform,
    pub goal: String,
}

#[derive(Debug, Serialize)]
pub struct TipsResponse {
    pub tips: String,
}

/// Generate growth tips for a platform and goal.
///
/// Infallible by design: assistant failures degrade to a static message and
/// never surface as errors.
#[instrument(skip(state, input), fields(platform = %input.platform))]
async fn generate(
    State(state): State<AppState>,
    Json(input): Json<TipsInput>,
) -> Json<TipsResponse> {
    let tips = state.tips().tips(input.platform, &input.goal).await;
    Json(TipsResponse { tips })
}
