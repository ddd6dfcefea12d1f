//! Pass-through to the backend API.
//!
//! Requests under `/admin/api/proxy/` are forwarded to `proxy.backend_url`
//! with their method, query, body, and only the `Authorization` and
//! `Content-Type` headers. The session cookie is never forwarded.

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, Method, Uri, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::{debug, warn};

use admingate_auth::gate::{PROXY_PREFIX, has_dot_segment};
use admingate_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Headers copied from the incoming request.
const FORWARDED_HEADERS: [header::HeaderName; 2] = [header::AUTHORIZATION, header::CONTENT_TYPE];

/// Joins the backend base URL with the still-encoded tail and query.
pub fn upstream_url(base: &str, tail: &str, query: Option<&str>) -> String {
    let mut url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        tail.trim_start_matches('/')
    );
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    url
}

/// ANY /admin/api/proxy/{*path}
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let base = state
        .config
        .proxy
        .backend_url
        .as_deref()
        .ok_or_else(|| AppError::service_unavailable("Backend API is not configured"))?;

    let tail = uri.path().strip_prefix(PROXY_PREFIX).unwrap_or_default();
    if has_dot_segment(tail) {
        return Err(AppError::validation("Invalid proxy path").into());
    }

    let url = upstream_url(base, tail, query.as_deref());
    debug!(method = %method, path = tail, "Forwarding to backend");

    let mut request = state.http.request(method, &url).body(body);
    for name in FORWARDED_HEADERS {
        if let Some(value) = headers.get(&name) {
            request = request.header(name, value.clone());
        }
    }

    let upstream = request.send().await.map_err(|e| {
        warn!(error = %e, "Backend request failed");
        AppError::external_service(format!("Backend request failed: {e}"))
    })?;

    let status = upstream.status();
    let content_type = upstream.headers().get(header::CONTENT_TYPE).cloned();
    let bytes = upstream
        .bytes()
        .await
        .map_err(|e| AppError::external_service(format!("Backend response unreadable: {e}")))?;

    let mut response = (status, bytes).into_response();
    match content_type {
        Some(value) => {
            response.headers_mut().insert(header::CONTENT_TYPE, value);
        }
        None => {
            response.headers_mut().remove(header::CONTENT_TYPE);
        }
    }
    Ok(response)
}
