//! Device and session middleware.
//!
//! Two cookies, two scopes:
//!
//! - `bl_device` - long-lived, identifies the browser. Carts and in-progress
//!   wizards key off it, so they survive reloads and are shared across
//!   whoever logs in on that device.
//! - `bl_session` - an opaque token resolved server-side to a session
//!   record holding a full user snapshot. The server is the source of truth
//!   for who is logged in; the client only carries the token.

use axum::{
    Json,
    extract::{FromRequestParts, Request},
    http::{StatusCode, header::SET_COOKIE, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::json;

use boostline_core::types::{DeviceId, SessionToken};
use boostline_core::user::User;

use crate::services::auth::SESSION_TTL_DAYS;
use crate::state::AppState;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "bl_session";

/// Device cookie name.
pub const DEVICE_COOKIE_NAME: &str = "bl_device";

/// Device cookie lifetime in days.
const DEVICE_COOKIE_TTL_DAYS: i64 = 365;

/// Assign every request a device identity.
///
/// Reads the device cookie or mints a fresh ID, exposes it as a request
/// extension for the [`Device`] extractor, and sets the cookie on the way
/// out when it was missing.
pub async fn device_cookie(jar: CookieJar, mut request: Request, next: Next) -> Response {
    let existing = jar
        .get(DEVICE_COOKIE_NAME)
        .and_then(|c| c.value().parse::<DeviceId>().ok());
    let device = existing.unwrap_or_default();

    request.extensions_mut().insert(device);
    let mut response = next.run(request).await;

    if existing.is_none() {
        let cookie = Cookie::build((DEVICE_COOKIE_NAME, device.to_string()))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::days(DEVICE_COOKIE_TTL_DAYS))
            .build();
        if let Ok(value) = cookie.to_string().parse() {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

/// Build the session cookie for a freshly issued token.
#[must_use]
pub fn session_cookie(token: &SessionToken) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Build the removal cookie used at logout.
#[must_use]
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::ZERO)
        .build()
}

/// Extractor for the request's device identity.
///
/// Requires the [`device_cookie`] middleware to be installed.
pub struct Device(pub DeviceId);

impl<S> FromRequestParts<S> for Device
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<DeviceId>()
            .copied()
            .map(Self)
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Read the session token from the request's cookies.
fn session_token(parts: &Parts) -> Option<SessionToken> {
    let jar = CookieJar::from_headers(&parts.headers);
    jar.get(SESSION_COOKIE_NAME)
        .map(|c| SessionToken::from_raw(c.value()))
}

/// Extractor that requires a logged-in user.
///
/// Unauthenticated requests are turned back toward the login flow with a
/// 401 and a `redirect` hint rather than a hard failure.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
pub struct RequireAuth(pub User);

/// Rejection for [`RequireAuth`].
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "login required",
                "redirect": "/auth/login",
            })),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or(AuthRejection)?;
        let record = state
            .store()
            .sessions()
            .get(&token)
            .await
            .ok()
            .flatten()
            .ok_or(AuthRejection)?;
        Ok(Self(record.user))
    }
}

/// Extractor that optionally resolves the current user.
///
/// Unlike [`RequireAuth`], this never rejects the request.
pub struct OptionalAuth(pub Option<User>);

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = match session_token(parts) {
            Some(token) => state
                .store()
                .sessions()
                .get(&token)
                .await
                .ok()
                .flatten()
                .map(|record| record.user),
            None => None,
        };
        Ok(Self(user))
    }
}

/// Extract the raw session token (for logout).
pub struct MaybeToken(pub Option<SessionToken>);

impl<S> FromRequestParts<S> for MaybeToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(session_token(parts)))
    }
}
