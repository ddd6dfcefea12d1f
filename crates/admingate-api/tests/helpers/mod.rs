//! Shared test helpers for API integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::header::{COOKIE, LOCATION, SET_COOKIE};
use http::{HeaderMap, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use admingate_api::{AppState, build_app};
use admingate_auth::SessionSecret;
use admingate_auth::token::sync;
use admingate_core::config::AppConfig;

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const ADMIN_USERNAME: &str = "root";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
}

/// Config used by every test app.
pub fn test_config(backend_url: Option<&str>) -> AppConfig {
    let backend = backend_url
        .map(|url| format!("backend_url = \"{url}\"\n"))
        .unwrap_or_default();
    let toml = format!(
        r#"
[server]
environment = "test"

[auth]
session_secret = "{SECRET}"
admin_username = "{ADMIN_USERNAME}"
admin_password = "{ADMIN_PASSWORD}"

[proxy]
timeout_seconds = 5
{backend}
"#
    );
    AppConfig::from_toml_str(&toml).expect("Failed to parse test config")
}

impl TestApp {
    /// Create a test application without a backend.
    pub async fn new() -> Self {
        Self::with_config(test_config(None)).await
    }

    /// Create a test application proxying to `backend_url`.
    pub async fn with_backend(backend_url: &str) -> Self {
        Self::with_config(test_config(Some(backend_url))).await
    }

    pub async fn with_config(config: AppConfig) -> Self {
        let state = AppState::new(config.clone())
            .await
            .expect("Failed to build app state");
        Self {
            router: build_app(state),
            config,
        }
    }

    /// Token signed with the test secret for an admin session issued at `issued_at_ms`.
    pub fn admin_token(&self, issued_at_ms: i64) -> String {
        sync::issue_admin_token(&secret(), issued_at_ms).expect("Failed to sign token")
    }

    /// Send a request, optionally with a JSON body and a session cookie.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = session {
            req = req.header(COOKIE, format!("admin_session={token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let text = String::from_utf8_lossy(&body_bytes).into_owned();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }
}

pub fn secret() -> SessionSecret {
    SessionSecret::new(SECRET).expect("Failed to build secret")
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body
    pub text: String,
    /// Parsed JSON body (`Null` when not JSON)
    pub body: Value,
}

impl TestResponse {
    /// The `Set-Cookie` header for the session cookie, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("admin_session="))
            .map(str::to_owned)
    }

    /// Decoded token value of the session cookie, if one was set.
    pub fn session_token(&self) -> Option<String> {
        let cookie = self.session_cookie()?;
        let value = cookie.strip_prefix("admin_session=")?;
        let value = value.split(';').next()?;
        urlencoding::decode(value).ok().map(|v| v.into_owned())
    }

    /// The `Location` header.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }
}
