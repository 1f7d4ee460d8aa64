//! # Authentication & Authorization Middleware
//!
//! Bearer token middleware for the Placard API.
//!
//! ## Token Format
//!
//! ```text
//! Bearer {email}:{secret}
//! ```
//!
//! The secret is compared in constant time. The email identifies the
//! caller and is checked against the configured admin domain by the
//! admin console routes; resolution endpoints only require a valid
//! secret.
//!
//! ## OperatorIdentity
//!
//! Every authenticated request gets an [`OperatorIdentity`] injected into
//! the request extensions. Handlers extract it via the
//! `FromRequestParts` impl.

use axum::extract::Request;
use axum::http::request::Parts;
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::{AppError, ErrorBody, ErrorDetail};

// ── OperatorIdentity ────────────────────────────────────────────────────────

/// Identity of the authenticated caller, extracted from the bearer token
/// and available to all route handlers via Axum's `FromRequestParts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorIdentity {
    /// The caller's email address, as carried in the token.
    pub email: String,
}

impl OperatorIdentity {
    /// Check whether this caller belongs to the given admin domain.
    ///
    /// The comparison is on the full `@domain` suffix, case-insensitive,
    /// so `chef@notplacardhq.com` does not pass for `placardhq.com`.
    pub fn in_domain(&self, domain: &str) -> bool {
        let at = match self.email.rfind('@') {
            Some(at) => at,
            None => return false,
        };
        self.email[at + 1..].eq_ignore_ascii_case(domain)
    }
}

/// Axum `FromRequestParts` implementation for `OperatorIdentity`.
///
/// Extracts the identity that the auth middleware injected into
/// extensions. Returns 401 if no identity is present.
#[axum::async_trait]
impl<S: Send + Sync> axum::extract::FromRequestParts<S> for OperatorIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<OperatorIdentity>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("no caller identity in request context".into()))
    }
}

/// Check that the caller belongs to the admin domain.
/// Returns 403 Forbidden otherwise.
pub fn require_admin_domain(caller: &OperatorIdentity, domain: &str) -> Result<(), AppError> {
    if caller.in_domain(domain) {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "admin access requires a @{domain} account"
        )))
    }
}

// ── Auth Configuration ──────────────────────────────────────────────────────

/// Auth configuration injected into request extensions.
///
/// Custom `Debug` redacts the secret to prevent credential leakage in logs.
#[derive(Clone)]
pub struct AuthConfig {
    /// Shared secret all tokens must carry. `None` disables auth
    /// (development mode).
    pub secret: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

// ── Token Validation ────────────────────────────────────────────────────────

/// Constant-time comparison of token secrets.
///
/// Prevents timing side-channels that could reveal secret length or
/// prefix. When lengths differ, performs a dummy comparison to avoid
/// leaking length information through timing variance.
fn constant_time_secret_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        // Dummy comparison to keep timing constant regardless of length match.
        let _ = expected.ct_eq(expected);
        return false;
    }
    provided.ct_eq(expected).into()
}

/// Parse a bearer token in format `{email}:{secret}`.
///
/// The email may not contain a colon; everything after the first colon is
/// the secret, so secrets containing colons survive the split.
pub fn parse_bearer_token(
    provided: &str,
    expected_secret: &str,
) -> Result<OperatorIdentity, String> {
    let (email, secret) = provided
        .split_once(':')
        .ok_or_else(|| "invalid token format, expected {email}:{secret}".to_string())?;

    if !constant_time_secret_eq(secret, expected_secret) {
        return Err("invalid bearer token".into());
    }
    if email.is_empty() || !email.contains('@') {
        return Err("token email must be a valid address".into());
    }

    Ok(OperatorIdentity {
        email: email.to_string(),
    })
}

// ── Middleware ──────────────────────────────────────────────────────────────

/// Extract and validate the Bearer token from the Authorization header.
///
/// Parses the token to extract [`OperatorIdentity`] and injects it into
/// request extensions for downstream handlers.
///
/// When `AuthConfig.secret` is `None`, all requests are allowed with a
/// development identity (auth disabled / development mode).
pub async fn auth_middleware(mut request: Request, next: Next) -> Response {
    let expected = request.extensions().get::<AuthConfig>().cloned();

    match expected {
        Some(AuthConfig {
            secret: Some(ref expected),
        }) => {
            let auth_header = request
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok());

            match auth_header {
                Some(header_value) if header_value.starts_with("Bearer ") => {
                    let provided = &header_value[7..];
                    match parse_bearer_token(provided, expected) {
                        Ok(identity) => {
                            request.extensions_mut().insert(identity);
                            next.run(request).await
                        }
                        Err(msg) => {
                            tracing::warn!(reason = %msg, "authentication failed: invalid bearer token");
                            unauthorized_response(&msg)
                        }
                    }
                }
                Some(_) => {
                    tracing::warn!("authentication failed: non-Bearer authorization scheme");
                    unauthorized_response("authorization header must use Bearer scheme")
                }
                None => {
                    tracing::warn!("authentication failed: missing authorization header");
                    unauthorized_response("missing authorization header")
                }
            }
        }
        _ => {
            // Auth disabled — inject a development identity.
            request.extensions_mut().insert(OperatorIdentity {
                email: "dev@localhost".to_string(),
            });
            next.run(request).await
        }
    }
}

fn unauthorized_response(message: &str) -> Response {
    let body = ErrorBody {
        error: ErrorDetail {
            code: "UNAUTHORIZED".to_string(),
            message: message.to_string(),
        },
    };
    (StatusCode::UNAUTHORIZED, Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::middleware::from_fn;
    use axum::routing::get;
    use axum::Router;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    /// Build a minimal router with the auth middleware and a simple handler.
    fn test_app(secret: Option<String>) -> Router {
        let auth_config = AuthConfig { secret };
        Router::new()
            .route(
                "/test",
                get(|identity: OperatorIdentity| async move { identity.email }),
            )
            .layer(from_fn(auth_middleware))
            .layer(axum::Extension(auth_config))
    }

    #[tokio::test]
    async fn valid_bearer_token_accepted() {
        let app = test_app(Some("my-secret".to_string()));

        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer sarah@placardhq.com:my-secret")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"sarah@placardhq.com");
    }

    #[tokio::test]
    async fn missing_authorization_header_rejected() {
        let app = test_app(Some("my-secret".to_string()));

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(err["error"]["code"], "UNAUTHORIZED");
        assert!(err["error"]["message"].as_str().unwrap().contains("missing"));
    }

    #[tokio::test]
    async fn wrong_secret_rejected() {
        let app = test_app(Some("my-secret".to_string()));

        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Bearer sarah@placardhq.com:wrong")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_bearer_scheme_rejected() {
        let app = test_app(Some("my-secret".to_string()));

        let request = Request::builder()
            .uri("/test")
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(err["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Bearer scheme"));
    }

    #[tokio::test]
    async fn auth_disabled_allows_all_requests() {
        let app = test_app(None);

        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"dev@localhost");
    }

    #[test]
    fn constant_time_eq_rejects_prefix() {
        assert!(constant_time_secret_eq("secret-token-123", "secret-token-123"));
        assert!(!constant_time_secret_eq("secret", "secret-token-123"));
        assert!(!constant_time_secret_eq("", "secret-token-123"));
    }

    // ── parse_bearer_token tests ─────────────────────────────────

    #[test]
    fn parse_bearer_token_extracts_the_email() {
        let identity = parse_bearer_token("sarah@placardhq.com:my-secret", "my-secret").unwrap();
        assert_eq!(identity.email, "sarah@placardhq.com");
    }

    #[test]
    fn parse_bearer_token_secret_may_contain_colons() {
        let identity = parse_bearer_token("sarah@placardhq.com:a:b:c", "a:b:c").unwrap();
        assert_eq!(identity.email, "sarah@placardhq.com");
    }

    #[test]
    fn parse_bearer_token_missing_colon_rejected() {
        let result = parse_bearer_token("just-a-secret", "just-a-secret");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("format"));
    }

    #[test]
    fn parse_bearer_token_non_email_rejected() {
        let result = parse_bearer_token("not-an-email:my-secret", "my-secret");
        assert!(result.is_err());
    }

    #[test]
    fn parse_bearer_token_wrong_secret() {
        let result = parse_bearer_token("sarah@placardhq.com:wrong", "my-secret");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("invalid bearer token"));
    }

    // ── domain check tests ───────────────────────────────────────

    #[test]
    fn in_domain_matches_full_suffix_only() {
        let ok = OperatorIdentity {
            email: "sarah@placardhq.com".to_string(),
        };
        let spoof = OperatorIdentity {
            email: "chef@notplacardhq.com".to_string(),
        };
        assert!(ok.in_domain("placardhq.com"));
        assert!(ok.in_domain("PLACARDHQ.COM"));
        assert!(!spoof.in_domain("placardhq.com"));
    }

    #[test]
    fn require_admin_domain_forbids_outsiders() {
        let outsider = OperatorIdentity {
            email: "chef@gmail.com".to_string(),
        };
        let err = require_admin_domain(&outsider, "placardhq.com").unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
