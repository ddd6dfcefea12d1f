//! Auth handlers: login, logout, refresh.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum_extra::extract::cookie::CookieJar;
use tracing::{info, warn};
use validator::Validate;

use admingate_auth::compare::constant_time_eq;
use admingate_auth::gate::SESSION_COOKIE;
use admingate_auth::policy::now_millis;
use admingate_auth::token::sync;
use admingate_core::error::AppError;

use crate::cookies::{cleared_session_cookie, session_cookie};
use crate::dto::request::LoginRequest;
use crate::dto::response::{
    ApiResponse, MessageResponse, SessionIssuedResponse, millis_to_datetime,
};
use crate::error::ApiError;
use crate::state::AppState;

type IssuedSession = (CookieJar, Json<ApiResponse<SessionIssuedResponse>>);

/// Signs a fresh admin token at `now_ms` and adds it to `jar`.
fn issue_session(state: &AppState, jar: CookieJar, now_ms: i64) -> Result<IssuedSession, ApiError> {
    let token = sync::issue_admin_token(&state.secret, now_ms)?;
    let expires_at =
        millis_to_datetime(now_ms.saturating_add(state.gate.policy().max_age_ms()));

    let jar = jar.add(session_cookie(token, state.secure_cookies()));
    Ok((jar, Json(ApiResponse::ok(SessionIssuedResponse { expires_at }))))
}

/// POST /admin/api/auth/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<IssuedSession, ApiError> {
    let Json(req) = body?;
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let auth = &state.config.auth;
    // Both comparisons always run.
    let username_ok = constant_time_eq(req.username.as_bytes(), auth.admin_username.as_bytes());
    let password_ok = constant_time_eq(req.password.as_bytes(), auth.admin_password.as_bytes());
    if !(username_ok & password_ok) {
        warn!(username = %req.username, "Admin login rejected");
        return Err(AppError::authentication("Invalid credentials").into());
    }

    info!(username = %req.username, "Admin logged in");
    issue_session(&state, jar, now_millis())
}

/// POST /admin/api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<ApiResponse<MessageResponse>>) {
    let jar = jar.add(cleared_session_cookie(state.secure_cookies()));
    (
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Logged out".to_string(),
        })),
    )
}

/// POST /admin/api/auth/refresh
///
/// Re-issues the session with a new issue time when the current cookie is
/// still authorized; otherwise clears it and answers 401.
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<IssuedSession, (CookieJar, ApiError)> {
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned());
    let now_ms = now_millis();

    match state.gate.authenticate(token.as_deref(), now_ms).await {
        Ok(_) => issue_session(&state, jar, now_ms).map_err(|e| (CookieJar::new(), e)),
        Err(reason) => {
            info!(reason = reason.as_str(), "Session refresh rejected");
            let jar = jar.add(cleared_session_cookie(state.secure_cookies()));
            Err((jar, AppError::authentication("Session expired or invalid").into()))
        }
    }
}
