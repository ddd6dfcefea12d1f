//! Admin route gate.
//!
//! Every request is classified on its own as [`RouteClass::Public`] or
//! [`RouteClass::Protected`]. Protected requests must carry a session token
//! that verifies and passes the [`SessionPolicy`]; anything else is sent to
//! the login page with the original path as a return hint.

use tracing::debug;

use crate::policy::{AdminSession, Denial, SessionPolicy};
use crate::token::edge::{EdgeCrypto, EdgeTokenCodec, Sha256Subtle};

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "admin_session";

/// Root of the gated namespace.
pub const ADMIN_PREFIX: &str = "/admin";

/// Login page.
pub const LOGIN_PATH: &str = "/admin/login";

/// Auth transition endpoints (login, logout, refresh) live under this prefix.
pub const AUTH_API_PREFIX: &str = "/admin/api/auth";

/// Auth transition endpoint names.
pub const AUTH_TRANSITIONS: [&str; 3] = ["login", "logout", "refresh"];

/// Pass-through to the separate backend API.
pub const PROXY_PREFIX: &str = "/admin/api/proxy";

/// Query parameter carrying the originally requested path on redirect.
pub const RETURN_PARAM: &str = "next";

/// Gate classification of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Allowed without looking at the cookie.
    Public,
    /// Requires an authorized admin session.
    Protected,
}

/// Why a protected request was turned away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No session cookie, or an empty one.
    MissingToken,
    /// Malformed token or signature mismatch.
    InvalidSignature,
    /// Signature fine, policy said no.
    Policy(Denial),
}

impl DenyReason {
    /// Short tag for structured logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingToken => "missing_token",
            Self::InvalidSignature => "invalid_signature",
            Self::Policy(denial) => denial.as_str(),
        }
    }
}

/// Outcome of gating one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through. Carries the session for protected routes.
    Allow(Option<AdminSession>),
    /// Send the client to `location`.
    Redirect {
        location: String,
        reason: DenyReason,
    },
}

/// True when `path` equals `prefix` or is below it.
fn is_under(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// True when any segment is `.` or `..`, literally or percent-encoded.
pub fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| {
        let lowered = segment.to_ascii_lowercase();
        let decoded = lowered.replace("%2e", ".");
        decoded == "." || decoded == ".."
    })
}

/// Whether `path` belongs to the gated admin namespace.
pub fn is_admin_path(path: &str) -> bool {
    is_under(path, ADMIN_PREFIX)
}

/// Classifies a request by method and path.
///
/// Paths outside the admin namespace are not gated. Inside it, preflight
/// requests, the login page, the auth transition endpoints, and the backend
/// proxy are public. Paths with dot segments are always protected.
pub fn classify(method: &str, path: &str) -> RouteClass {
    if !is_admin_path(path) {
        return RouteClass::Public;
    }
    if method.eq_ignore_ascii_case("OPTIONS") {
        return RouteClass::Public;
    }
    if has_dot_segment(path) {
        return RouteClass::Protected;
    }
    if path == LOGIN_PATH || path.strip_suffix('/') == Some(LOGIN_PATH) {
        return RouteClass::Public;
    }
    if let Some(endpoint) = path
        .strip_prefix(AUTH_API_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))
    {
        let endpoint = endpoint.strip_suffix('/').unwrap_or(endpoint);
        if AUTH_TRANSITIONS.contains(&endpoint) {
            return RouteClass::Public;
        }
    }
    if is_under(path, PROXY_PREFIX) {
        return RouteClass::Public;
    }
    RouteClass::Protected
}

/// Login URL carrying `original_path` as the return hint.
pub fn login_redirect(original_path: &str) -> String {
    format!(
        "{LOGIN_PATH}?{RETURN_PARAM}={}",
        urlencoding::encode(original_path)
    )
}

/// Request-scoped gate: verifier plus policy.
#[derive(Debug)]
pub struct RouteGate<C: EdgeCrypto = Sha256Subtle> {
    codec: EdgeTokenCodec<C>,
    policy: SessionPolicy,
}

impl<C: EdgeCrypto> RouteGate<C> {
    /// Builds a gate from a ready codec and a policy.
    pub fn new(codec: EdgeTokenCodec<C>, policy: SessionPolicy) -> Self {
        Self { codec, policy }
    }

    /// The session policy.
    pub fn policy(&self) -> &SessionPolicy {
        &self.policy
    }

    /// Verifies `token` and applies the policy at `now_ms`.
    pub async fn authenticate(
        &self,
        token: Option<&str>,
        now_ms: i64,
    ) -> Result<AdminSession, DenyReason> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(DenyReason::MissingToken)?;

        let payload = self
            .codec
            .verify(token)
            .await
            .into_payload()
            .ok_or(DenyReason::InvalidSignature)?;

        self.policy
            .check_raw(&payload, now_ms)
            .map_err(DenyReason::Policy)
    }

    /// Gates one request.
    pub async fn evaluate(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        now_ms: i64,
    ) -> GateDecision {
        if classify(method, path) == RouteClass::Public {
            return GateDecision::Allow(None);
        }

        match self.authenticate(token, now_ms).await {
            Ok(session) => GateDecision::Allow(Some(session)),
            Err(reason) => {
                debug!(path, reason = reason.as_str(), "Admin gate denied request");
                GateDecision::Redirect {
                    location: login_redirect(path),
                    reason,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::MAX_SESSION_AGE_MS;
    use crate::secret::SessionSecret;
    use crate::token::sync;

    const NOW: i64 = 1_700_000_000_000;

    fn secret() -> SessionSecret {
        SessionSecret::new("gate-test-secret-0123456789abcdef").unwrap()
    }

    async fn gate() -> RouteGate {
        let codec = EdgeTokenCodec::from_secret(&secret()).await.unwrap();
        RouteGate::new(codec, SessionPolicy::default())
    }

    fn decoded_next(location: &str) -> String {
        let query = location
            .strip_prefix(&format!("{LOGIN_PATH}?{RETURN_PARAM}="))
            .unwrap();
        urlencoding::decode(query).unwrap().into_owned()
    }

    #[test]
    fn test_classify_public_paths() {
        for path in [
            "/admin/login",
            "/admin/login/",
            "/admin/api/auth/login",
            "/admin/api/auth/logout",
            "/admin/api/auth/refresh",
            "/admin/api/proxy",
            "/admin/api/proxy/orders/42",
        ] {
            assert_eq!(classify("GET", path), RouteClass::Public, "{path}");
        }
    }

    #[test]
    fn test_classify_protected_paths() {
        for path in [
            "/admin",
            "/admin/",
            "/admin/dashboard",
            "/admin/api/session",
            "/admin/api/auth/whoami",
            "/admin/api/auth",
            "/admin/login/extra",
            "/admin/api/proxyish",
        ] {
            assert_eq!(classify("GET", path), RouteClass::Protected, "{path}");
        }
    }

    #[test]
    fn test_classify_outside_namespace() {
        assert_eq!(classify("GET", "/"), RouteClass::Public);
        assert_eq!(classify("GET", "/health"), RouteClass::Public);
        assert_eq!(classify("GET", "/administrator"), RouteClass::Public);
    }

    #[test]
    fn test_classify_preflight() {
        assert_eq!(classify("OPTIONS", "/admin/dashboard"), RouteClass::Public);
        assert_eq!(classify("options", "/admin"), RouteClass::Public);
    }

    #[test]
    fn test_dot_segments_stay_protected() {
        for path in [
            "/admin/api/proxy/../session",
            "/admin/login/../dashboard",
            "/admin/api/proxy/%2e%2e/session",
            "/admin/api/proxy/.%2E/session",
            "/admin/api/auth/./login",
        ] {
            assert_eq!(classify("GET", path), RouteClass::Protected, "{path}");
        }
    }

    #[test]
    fn test_login_redirect_encodes_path() {
        let location = login_redirect("/admin/reports/q3 summary");
        assert!(location.starts_with("/admin/login?next="));
        assert_eq!(decoded_next(&location), "/admin/reports/q3 summary");
    }

    #[tokio::test]
    async fn test_protected_without_cookie_redirects() {
        let decision = gate().await.evaluate("GET", "/admin/dashboard", None, NOW).await;
        match decision {
            GateDecision::Redirect { location, reason } => {
                assert_eq!(reason, DenyReason::MissingToken);
                assert_eq!(decoded_next(&location), "/admin/dashboard");
            }
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_public_without_cookie_allowed() {
        let gate = gate().await;
        assert_eq!(
            gate.evaluate("GET", "/admin/login", None, NOW).await,
            GateDecision::Allow(None)
        );
        assert_eq!(
            gate.evaluate("OPTIONS", "/admin/dashboard", None, NOW).await,
            GateDecision::Allow(None)
        );
    }

    #[tokio::test]
    async fn test_valid_session_allowed() {
        let token = sync::issue_admin_token(&secret(), NOW - 60_000).unwrap();
        let decision = gate()
            .await
            .evaluate("GET", "/admin/dashboard", Some(&token), NOW)
            .await;
        match decision {
            GateDecision::Allow(Some(session)) => {
                assert_eq!(session.issued_at_ms, NOW - 60_000);
            }
            other => panic!("expected allow, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_denials_carry_reason() {
        let gate = gate().await;

        let tampered = {
            let token = sync::issue_admin_token(&secret(), NOW).unwrap();
            let mut bytes = token.into_bytes();
            let last = bytes.len() - 1;
            bytes[last] = if bytes[last] == b'0' { b'1' } else { b'0' };
            String::from_utf8(bytes).unwrap()
        };
        let expired = sync::issue_admin_token(&secret(), NOW - MAX_SESSION_AGE_MS - 1).unwrap();
        let user = sync::sign(&format!("user|{NOW}"), &secret()).unwrap();

        let cases = [
            (Some(""), DenyReason::MissingToken),
            (Some("garbage"), DenyReason::InvalidSignature),
            (Some(tampered.as_str()), DenyReason::InvalidSignature),
            (Some(expired.as_str()), DenyReason::Policy(Denial::Expired)),
            (Some(user.as_str()), DenyReason::Policy(Denial::WrongRole)),
        ];

        for (token, expected) in cases {
            match gate.evaluate("GET", "/admin", token, NOW).await {
                GateDecision::Redirect { reason, .. } => assert_eq!(reason, expected),
                other => panic!("expected redirect for {token:?}, got {other:?}"),
            }
        }
    }
}
