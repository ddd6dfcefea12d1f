//! Admin route gate middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;

use admingate_auth::GateDecision;
use admingate_auth::gate::SESSION_COOKIE;
use admingate_auth::policy::now_millis;

use crate::state::AppState;

/// Gates every request under `/admin`.
///
/// Public routes pass untouched. Protected routes need a session cookie that
/// verifies and passes the session policy; the resulting
/// [`admingate_auth::AdminSession`] is inserted into the request extensions.
/// Every failure redirects to the login page with the original path as
/// `?next=`.
pub async fn admin_gate(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned());

    let decision = state
        .gate
        .evaluate(
            request.method().as_str(),
            request.uri().path(),
            token.as_deref(),
            now_millis(),
        )
        .await;

    match decision {
        GateDecision::Allow(session) => {
            if let Some(session) = session {
                request.extensions_mut().insert(session);
            }
            next.run(request).await
        }
        GateDecision::Redirect { location, .. } => Redirect::to(&location).into_response(),
    }
}
