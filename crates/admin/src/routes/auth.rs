//! Admin authentication routes.
//!
//! Admins log in with the same identifier/password credentials as any
//! user; the role check is what gates the panel. Accounts come from
//! `bl-cli admin create`.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use axum_extra::extract::cookie::CookieJar;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use boostline_core::types::credential::verify_password;
use boostline_core::user::User;

use crate::error::{AppError, Result};
use crate::middleware::auth::{
    SESSION_TTL_DAYS, clear_session_cookie, session_cookie, session_token,
};
use crate::state::AppState;

/// Admin auth route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    /// Email address or phone number.
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
}

/// Admin login.
#[instrument(skip(state, jar, input))]
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<LoginResponse>)> {
    let record = state
        .store()
        .users()
        .find_by_identifier(&input.identifier)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if verify_password(&input.password, &record.password_hash).is_err() {
        return Err(AppError::InvalidCredentials);
    }

    if !record.user.role.is_admin() {
        return Err(AppError::Forbidden);
    }

    let session = state
        .store()
        .sessions()
        .create(record.user.clone(), Duration::days(SESSION_TTL_DAYS))
        .await?;

    tracing::info!(admin_id = %record.user.id, "admin login");

    Ok((
        jar.add(session_cookie(&session.token)),
        Json(LoginResponse {
            message: "Welcome Admin".to_string(),
            user: record.user,
        }),
    ))
}

/// End the current admin session.
#[instrument(skip_all)]
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    parts: axum::http::request::Parts,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(token) = session_token(&parts) {
        state.store().sessions().delete(&token).await?;
    }
    Ok((jar.add(clear_session_cookie()), StatusCode::NO_CONTENT))
}
