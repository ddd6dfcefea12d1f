//! Session cookie construction.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use admingate_auth::gate::SESSION_COOKIE;
use admingate_auth::policy::MAX_SESSION_AGE_MS;

/// Cookie lifetime in seconds; matches the session policy (8 hours).
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = MAX_SESSION_AGE_MS / 1000;

/// Session cookie carrying `token`.
///
/// `HttpOnly`, `SameSite=Lax`, `Path=/`, `Max-Age=28800`, and `Secure` when
/// `secure` is set (production).
pub fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(SESSION_COOKIE_MAX_AGE_SECS))
        .build()
}

/// Empty session cookie with `Max-Age=0`, overwriting any existing one.
pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
