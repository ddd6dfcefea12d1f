//! Integration tests for the admin route gate.

mod helpers;

use http::StatusCode;

use admingate_auth::MAX_SESSION_AGE_MS;
use admingate_auth::policy::now_millis;
use admingate_auth::token::sync;

use helpers::TestApp;

fn next_param(location: &str) -> String {
    let encoded = location
        .strip_prefix("/admin/login?next=")
        .expect("redirect to login page");
    urlencoding::decode(encoded).unwrap().into_owned()
}

#[tokio::test]
async fn test_protected_without_cookie_redirects_to_login() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/admin", None, None).await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(next_param(response.location().unwrap()), "/admin");
}

#[tokio::test]
async fn test_redirect_carries_original_path() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/admin/api/session?verbose=1", None, None)
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(next_param(response.location().unwrap()), "/admin/api/session");
}

#[tokio::test]
async fn test_unknown_admin_path_is_still_gated() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/admin/reports", None, None).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    let token = app.admin_token(now_millis());
    let response = app
        .request("GET", "/admin/reports", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_valid_session_reaches_dashboard() {
    let app = TestApp::new().await;
    let token = app.admin_token(now_millis() - 1000);

    let response = app.request("GET", "/admin", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.text.contains("Admin dashboard"));
}

#[tokio::test]
async fn test_session_endpoint_reports_expiry() {
    let app = TestApp::new().await;
    let issued_at = now_millis() - 1000;
    let token = app.admin_token(issued_at);

    let response = app
        .request("GET", "/admin/api/session", None, Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["role"], "admin");
    let issued: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(data["issued_at"].clone()).unwrap();
    let expires: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(data["expires_at"].clone()).unwrap();
    assert_eq!(issued.timestamp_millis(), issued_at);
    assert_eq!((expires - issued).num_milliseconds(), MAX_SESSION_AGE_MS);
}

#[tokio::test]
async fn test_rejected_tokens_redirect() {
    let app = TestApp::new().await;
    let now = now_millis();

    let tampered = {
        let token = app.admin_token(now);
        let (payload, sig) = token.rsplit_once('.').unwrap();
        let flipped = if sig.starts_with('0') { "1" } else { "0" };
        format!("{payload}.{flipped}{}", &sig[1..])
    };
    let expired = app.admin_token(now - MAX_SESSION_AGE_MS - 1000);
    let wrong_role = sync::sign(&format!("user|{now}"), &helpers::secret()).unwrap();
    let future = app.admin_token(now + 60 * 60 * 1000);
    let non_numeric = sync::sign("admin|soon", &helpers::secret()).unwrap();

    for token in [
        tampered.as_str(),
        expired.as_str(),
        wrong_role.as_str(),
        future.as_str(),
        non_numeric.as_str(),
        "garbage",
    ] {
        let response = app.request("GET", "/admin", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{token}");
        assert_eq!(next_param(response.location().unwrap()), "/admin");
    }
}

#[tokio::test]
async fn test_public_routes_need_no_cookie() {
    let app = TestApp::new().await;

    let login_page = app.request("GET", "/admin/login", None, None).await;
    assert_eq!(login_page.status, StatusCode::OK);
    assert!(login_page.text.contains("<form"));

    let logout = app
        .request("POST", "/admin/api/auth/logout", None, None)
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    let health = app.request("GET", "/health", None, None).await;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["data"]["status"], "ok");
}

#[tokio::test]
async fn test_preflight_is_not_redirected() {
    let app = TestApp::new().await;

    let response = app.request("OPTIONS", "/admin", None, None).await;

    assert_ne!(response.status, StatusCode::SEE_OTHER);
    assert!(response.location().is_none());
}

#[tokio::test]
async fn test_login_page_sanitizes_return_path() {
    let app = TestApp::new().await;

    let ok = app
        .request("GET", "/admin/login?next=%2Fadmin%2Freports", None, None)
        .await;
    assert!(ok.text.contains("data-next=\"%2Fadmin%2Freports\""));

    let foreign = app
        .request(
            "GET",
            "/admin/login?next=https%3A%2F%2Fevil.example%2F",
            None,
            None,
        )
        .await;
    assert!(foreign.text.contains("data-next=\"%2Fadmin\""));
}

#[tokio::test]
async fn test_dot_segments_do_not_bypass_gate() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/admin/api/proxy/../session", None, None)
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
}
