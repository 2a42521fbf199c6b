//! HTTP plumbing for the Gradia candidate API smoke test.
//!
//! # Architecture
//!
//! - [`http_client`] - Shared `reqwest` client used by every scenario request
//! - [`http_client_with_timeout`] - Short-timeout client for the connectivity probe
//! - [`CandidateClient`] - Thin wrapper binding the shared client to a base URL
//!   and exposing one method per candidate endpoint
//! - [`probe`] - Reachability check that ignores the response status
//!
//! # Error Handling
//!
//! Non-2xx statuses are returned as an ordinary [`HttpReply`] so the caller can
//! decide what counts as success (the negative login test expects a 401).
//! Only transport failures and JSON decode failures become [`RequestError`].

mod error;

pub use error::RequestError;

use std::borrow::Cow;
use std::sync::OnceLock;
use std::time::Duration;

use gradia_smoke_types::{BearerToken, Credentials, ProfilePayload};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

/// Root of a locally running backend.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8081";
/// Candidate API mount point, relative to the server root.
pub const CANDIDATES_PATH: &str = "/api/candidates";
/// Spring actuator health endpoint, relative to the server root.
pub const HEALTH_PATH: &str = "/actuator/health";

pub const REGISTER_PATH: &str = "/register";
pub const LOGIN_PATH: &str = "/login";
pub const PROFILE_PATH: &str = "/profile";

/// Bodies are read up to this many bytes.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        base_client_builder().build().unwrap_or_else(|e| {
            tracing::error!("Failed to build HTTP client: {e}. Falling back to reqwest defaults.");
            reqwest::Client::new()
        })
    })
}

fn base_client_builder() -> reqwest::ClientBuilder {
    let mut default_headers = HeaderMap::new();
    default_headers.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("gradia-smoke/", env!("CARGO_PKG_VERSION"))),
    );

    reqwest::Client::builder().default_headers(default_headers)
}

/// Client whose connect phase and whole request are both bounded by `timeout`.
///
/// Without the connect bound, a stalled handshake surfaces as a plain request
/// timeout instead of a connect error.
pub fn http_client_with_timeout(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    base_client_builder()
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
}

/// Status and body text of a completed request.
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: StatusCode,
    pub body: String,
    /// Body exceeded the read cap and was cut short.
    pub truncated: bool,
}

impl HttpReply {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK
    }

    /// Decode the body. A decode failure on a truncated body is reported as
    /// [`RequestError::Truncated`].
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, RequestError> {
        serde_json::from_str(&self.body).map_err(|source| {
            if self.truncated {
                RequestError::Truncated {
                    limit: MAX_BODY_BYTES,
                    source,
                }
            } else {
                RequestError::Decode(source)
            }
        })
    }

    /// Body text for display, marked when it was cut short.
    #[must_use]
    pub fn display_body(&self) -> Cow<'_, str> {
        if self.truncated {
            Cow::Owned(format!("{}...(truncated)", self.body))
        } else {
            Cow::Borrowed(&self.body)
        }
    }

    /// Body re-rendered as two-space indented JSON, keys in server order.
    pub fn pretty_json(&self) -> Result<String, RequestError> {
        let value: serde_json::Value = self.json()?;
        Ok(serde_json::to_string_pretty(&value)?)
    }
}

/// Read the body up to [`MAX_BODY_BYTES`].
async fn read_capped_body(
    url: &str,
    response: reqwest::Response,
) -> Result<(String, bool), RequestError> {
    use futures_util::StreamExt;

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| RequestError::from_reqwest(url, e))?;
        body.extend_from_slice(&chunk);
        if body.len() > MAX_BODY_BYTES {
            body.truncate(MAX_BODY_BYTES);
            return Ok((String::from_utf8_lossy(&body).into_owned(), true));
        }
    }
    Ok((String::from_utf8_lossy(&body).into_owned(), false))
}

/// Candidate endpoints under one base URL.
#[derive(Debug, Clone)]
pub struct CandidateClient {
    http: reqwest::Client,
    base_url: String,
}

impl CandidateClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(http_client().clone(), base_url)
    }

    #[must_use]
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<HttpReply, RequestError> {
        let url = self.endpoint(REGISTER_PATH);
        let request = self.http.post(&url).json(credentials);
        self.send(Method::POST, &url, request).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<HttpReply, RequestError> {
        let url = self.endpoint(LOGIN_PATH);
        let request = self.http.post(&url).json(credentials);
        self.send(Method::POST, &url, request).await
    }

    pub async fn save_profile(
        &self,
        token: &BearerToken,
        profile: &ProfilePayload,
    ) -> Result<HttpReply, RequestError> {
        let url = self.endpoint(PROFILE_PATH);
        let request = self
            .http
            .post(&url)
            .header(AUTHORIZATION, token.header_value())
            .json(profile);
        self.send(Method::POST, &url, request).await
    }

    pub async fn get_profile(&self, token: &BearerToken) -> Result<HttpReply, RequestError> {
        let url = self.endpoint(PROFILE_PATH);
        let request = self
            .http
            .get(&url)
            .header(AUTHORIZATION, token.header_value());
        self.send(Method::GET, &url, request).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        request: RequestBuilder,
    ) -> Result<HttpReply, RequestError> {
        tracing::debug!(%method, url, "Sending request");

        let response = request.send().await.map_err(|e| {
            let err = RequestError::from_reqwest(url, e);
            tracing::warn!(%method, url, kind = err.kind(), "Request failed");
            err
        })?;

        let status = response.status();
        let (body, truncated) = read_capped_body(url, response).await?;
        tracing::debug!(
            %method,
            url,
            status = status.as_u16(),
            body_bytes = body.len(),
            truncated,
            "Received response"
        );

        Ok(HttpReply {
            status,
            body,
            truncated,
        })
    }
}

/// Issue a `GET` and report whether anything answered.
///
/// Any HTTP status counts as reachable; only transport failures are errors.
pub async fn probe(http: &reqwest::Client, url: &str) -> Result<StatusCode, RequestError> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| RequestError::from_reqwest(url, e))?;
    let status = response.status();
    tracing::debug!(url, status = status.as_u16(), "Probe answered");
    Ok(status)
}
