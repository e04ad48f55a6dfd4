//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (401 credential clearing, 429 rate limiting
//! with `Retry-After` parsing, non-success → [`ApiError::Api`]) and envelope
//! decoding so endpoint modules stay focused on paths and bodies.

use iv_auth::CredentialProvider;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **401 Unauthorized** → clears the provider's credentials and returns
///   [`ApiError::Unauthorized`] with the provider's redirect.
/// - **429 Too Many Requests** → [`ApiError::RateLimited`] (`Retry-After`
///   falls back to 60 s if absent or unparseable).
/// - **Non-success status** → [`ApiError::Api`] with the server message.
pub async fn check_response(
    resp: reqwest::Response,
    credentials: &dyn CredentialProvider,
) -> Result<reqwest::Response, ApiError> {
    if resp.status() == StatusCode::UNAUTHORIZED {
        let redirect = credentials.on_unauthorized();
        return Err(ApiError::Unauthorized { redirect });
    }
    if resp.status() == StatusCode::TOO_MANY_REQUESTS {
        return Err(ApiError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status,
            message: error_message(&body),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(60)
}

/// Pull `message` or `error` out of a JSON error body; otherwise the raw text.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
        error: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Decode a JSON body that arrives either bare or as `{"data": ...}`.
///
/// Only an object whose sole key is `data` counts as an envelope; free-form
/// documents that merely contain a `data` field are decoded as they are.
pub fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    let payload = match value {
        Value::Object(mut map) if map.len() == 1 && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(payload).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Read and decode a successful response.
pub async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let body = resp.text().await?;
    decode_body(&body)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use iv_auth::{SessionState, SessionStore, StoreCredentials};
    use iv_core::entities::Interview;
    use iv_core::routes::Redirect;

    use super::*;

    fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body(String::new())
                .unwrap(),
        )
    }

    fn admin_credentials() -> (Arc<SessionStore>, StoreCredentials) {
        let store = Arc::new(SessionStore::in_memory(SessionState {
            admin_token: Some("admin-jwt".into()),
            is_admin: true,
            ..Default::default()
        }));
        let creds = StoreCredentials::admin(store.clone());
        (store, creds)
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_non_numeric() {
        let resp = mock_response_with_retry_after(429, "Wed, 21 Oct 2026 07:28:00 GMT");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn unauthorized_clears_credentials_and_redirects() {
        let (store, creds) = admin_credentials();
        let err = check_response(mock_response(401, ""), &creds)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::Unauthorized {
                redirect: Redirect::AdminLogin
            }
        ));
        assert!(store.admin_token().is_none());
        assert!(!store.is_admin());
    }

    #[tokio::test]
    async fn rate_limited_with_header() {
        let (_, creds) = admin_credentials();
        let resp = mock_response_with_retry_after(429, "30");
        let err = check_response(resp, &creds).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn api_error_uses_server_message() {
        let (store, creds) = admin_credentials();
        let resp = mock_response(422, r#"{"message": "title is required"}"#);
        let err = check_response(resp, &creds).await.unwrap_err();
        match err {
            ApiError::Api { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "title is required");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(store.admin_token().is_some(), "non-401 must not clear credentials");
    }

    #[tokio::test]
    async fn api_error_falls_back_to_raw_body() {
        let (_, creds) = admin_credentials();
        let err = check_response(mock_response(502, "Bad Gateway\n"), &creds)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Api { status: 502, ref message } if message == "Bad Gateway"));
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn success_passes_through() {
        let (_, creds) = admin_credentials();
        assert!(check_response(mock_response(204, ""), &creds).await.is_ok());
    }

    #[test]
    fn decode_accepts_wrapped_and_bare() {
        let wrapped: Vec<Interview> =
            decode_body(r#"{"data": [{"id": 1, "title": "A"}]}"#).unwrap();
        let bare: Vec<Interview> = decode_body(r#"[{"id": 1, "title": "A"}]"#).unwrap();
        assert_eq!(wrapped, bare);
    }

    #[test]
    fn data_field_in_a_larger_object_is_not_an_envelope() {
        let settings: iv_core::entities::AdminSettings =
            decode_body(r#"{"data": {"retention": 30}, "maintenance": false}"#).unwrap();
        assert_eq!(settings.len(), 2);
        assert_eq!(settings["maintenance"], serde_json::json!(false));
        assert_eq!(settings["data"], serde_json::json!({"retention": 30}));

        let wrapped: iv_core::entities::AdminSettings =
            decode_body(r#"{"data": {"retention": 30}}"#).unwrap();
        assert_eq!(wrapped["retention"], serde_json::json!(30));
    }

    #[test]
    fn decode_reports_parse_errors() {
        let err = decode_body::<Interview>(r#"{"title": 5}"#).unwrap_err();
        assert!(matches!(err, ApiError::Parse(_)));
    }
}
