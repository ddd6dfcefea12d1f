//! Admin pages: login form, dashboard landing, current session.

use axum::Json;
use axum::Extension;
use axum::extract::Query;
use axum::response::Html;

use admingate_auth::AdminSession;
use admingate_auth::gate::{ADMIN_PREFIX, LOGIN_PATH, is_admin_path};

use crate::dto::request::LoginPageQuery;
use crate::dto::response::{ApiResponse, SessionResponse};

/// Where to send the browser after login.
///
/// Only local admin paths are honored; anything else falls back to the
/// dashboard so the login page cannot be used as an open redirect.
pub fn safe_return_path(next: Option<&str>) -> &str {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && is_admin_path(path)
                && path != LOGIN_PATH =>
        {
            path
        }
        _ => ADMIN_PREFIX,
    }
}

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Admin sign in</title>
</head>
<body>
<form id="login" data-next="{{NEXT}}">
  <label>Username <input name="username" autocomplete="username" required></label>
  <label>Password <input name="password" type="password" autocomplete="current-password" required></label>
  <button type="submit">Sign in</button>
  <p id="error" hidden>Invalid credentials</p>
</form>
<script>
const form = document.getElementById("login");
form.addEventListener("submit", async (event) => {
  event.preventDefault();
  const data = new FormData(form);
  const res = await fetch("/admin/api/auth/login", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    credentials: "same-origin",
    body: JSON.stringify({ username: data.get("username"), password: data.get("password") }),
  });
  if (res.ok) {
    window.location.assign(decodeURIComponent(form.dataset.next));
  } else {
    document.getElementById("error").hidden = false;
  }
});
</script>
</body>
</html>
"#;

/// GET /admin/login
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Html<String> {
    let next = safe_return_path(query.next.as_deref());
    // Percent-encoded output is attribute-safe.
    let encoded = urlencoding::encode(next);
    Html(LOGIN_PAGE.replace("{{NEXT}}", &encoded))
}

/// GET /admin
pub async fn dashboard(Extension(session): Extension<AdminSession>) -> Html<String> {
    Html(format!(
        "<!doctype html><title>Admin</title><h1>Admin dashboard</h1><p>Signed in as {}.</p>",
        session.role
    ))
}

/// GET /admin/api/session
pub async fn session_info(
    Extension(session): Extension<AdminSession>,
) -> Json<ApiResponse<SessionResponse>> {
    Json(ApiResponse::ok(SessionResponse::from(&session)))
}
