//! Authentication routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use boostline_core::user::User;

use crate::error::Result;
use crate::middleware::session::{
    MaybeToken, OptionalAuth, clear_session_cookie, session_cookie,
};
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Auth route tree.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
}

#[derive(Debug, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub phone: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginInput {
    /// Email address or phone number.
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: User,
}

/// Register a new customer. Issues a session immediately (auto-login).
#[instrument(skip(state, jar, input))]
async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let auth = AuthService::new(state.store());
    let (user, session) = auth
        .register(&input.email, &input.phone, &input.password, input.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        jar.add(session_cookie(&session.token)),
        Json(AuthResponse {
            message: "Registration successful!".to_string(),
            user,
        }),
    ))
}

/// Login with an email-or-phone identifier.
#[instrument(skip(state, jar, input))]
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(input): Json<LoginInput>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let auth = AuthService::new(state.store());
    let (user, session) = auth.login(&input.identifier, &input.password).await?;

    Ok((
        jar.add(session_cookie(&session.token)),
        Json(AuthResponse {
            message: "Login successful!".to_string(),
            user,
        }),
    ))
}

/// End the current session. A no-op without one.
#[instrument(skip(state, jar, token))]
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    MaybeToken(token): MaybeToken,
) -> Result<(CookieJar, StatusCode)> {
    if let Some(token) = token {
        AuthService::new(state.store()).logout(&token).await?;
    }
    Ok((jar.add(clear_session_cookie()), StatusCode::NO_CONTENT))
}

/// The current user, if logged in.
async fn me(OptionalAuth(user): OptionalAuth) -> Json<Option<User>> {
    Json(user)
}
