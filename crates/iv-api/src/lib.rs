//! # iv-api
//!
//! REST client for the interview backend.
//!
//! One [`ApiClient`] type serves every surface; the credential provider it is
//! built with decides which bearer token is attached and what happens on 401
//! (see [`iv_auth::CredentialProvider`]). Endpoint groups live in their own
//! modules as `impl ApiClient` blocks:
//! - auth (user and admin login)
//! - interviews, questions, tokens, results (recruiter surface)
//! - sessions (candidate start / recording upload / completion)
//! - profile, payments
//! - admin (settings, users, system health)

pub mod admin;
pub mod auth;
pub mod interviews;
pub mod payments;
pub mod profile;
pub mod questions;
pub mod results;
pub mod sessions;
pub mod tokens;

mod error;
mod http;

pub use error::ApiError;

use std::sync::Arc;
use std::time::Duration;

use iv_auth::{CredentialProvider, CredentialScope};
use iv_config::ApiConfig;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// HTTP client bound to one base URL and one credential provider.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    upload_timeout: Duration,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Build a client from config.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` fails to
    /// build (e.g. TLS backend initialisation).
    pub fn new(
        config: &ApiConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
            upload_timeout: timeout * 4,
            credentials,
        })
    }

    /// A client sharing this one's connection pool but speaking for other
    /// credentials.
    #[must_use]
    pub fn with_credentials(&self, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            credentials,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn scope(&self) -> CredentialScope {
        self.credentials.scope()
    }

    /// Absolute URL for an endpoint path (`/interviews`).
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Start a request with the provider's bearer token attached.
    pub(crate) fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match self.credentials.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and run the shared status checks.
    pub(crate) async fn send(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ApiError> {
        let resp = builder.send().await?;
        tracing::debug!(
            scope = %self.credentials.scope(),
            status = resp.status().as_u16(),
            url = %resp.url(),
            "api response"
        );
        http::check_response(resp, self.credentials.as_ref()).await
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = self.send(self.request(Method::GET, path)).await?;
        http::decode(resp).await
    }

    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self.send(self.request(method, path).json(body)).await?;
        http::decode(resp).await
    }

    /// For endpoints whose reply body is irrelevant (deletes, completions).
    pub(crate) async fn send_discard<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.request(method, path);
        let builder = match body {
            Some(body) => builder.json(body),
            None => builder,
        };
        self.send(builder).await.map(drop)
    }
}

/// Percent-encode one path segment.
pub(crate) fn seg(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

/// `?interviewId=...` when filtering by interview, empty otherwise.
pub(crate) fn interview_filter(interview_id: Option<&str>) -> String {
    interview_id.map_or_else(String::new, |id| {
        format!("?interviewId={}", urlencoding::encode(id))
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use iv_auth::StaticCredentials;
    use iv_config::ApiConfig;

    use super::ApiClient;

    pub fn client(token: Option<&str>) -> ApiClient {
        let config = ApiConfig {
            base_url: "https://hire.example.com/api/".into(),
            ..Default::default()
        };
        ApiClient::new(
            &config,
            Arc::new(StaticCredentials::new(token.map(String::from))),
        )
        .expect("client builds")
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::client;
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let client = client(None);
        assert_eq!(client.url("/interviews"), "https://hire.example.com/api/interviews");
        assert_eq!(client.url("profile"), "https://hire.example.com/api/profile");
    }

    #[test]
    fn bearer_is_attached_when_present() {
        let request = client(Some("jwt-abc"))
            .request(Method::GET, "/interviews")
            .build()
            .unwrap();
        assert_eq!(
            request.headers()[reqwest::header::AUTHORIZATION],
            "Bearer jwt-abc"
        );
    }

    #[test]
    fn anonymous_request_has_no_authorization() {
        let request = client(None)
            .request(Method::POST, "/sessions/start")
            .build()
            .unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn interview_filter_encodes() {
        assert_eq!(interview_filter(None), "");
        assert_eq!(interview_filter(Some("a b")), "?interviewId=a%20b");
    }
}
