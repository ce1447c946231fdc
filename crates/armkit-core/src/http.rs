//! Request/response plumbing
//!
//! [`Invoker`] is the only seam between this crate and the network. The poller
//! and the pager issue every request through it, so tests can substitute a
//! mock server (or a hand-written invoker) without touching either algorithm.
//!
//! HTTP error statuses are *not* errors at this layer: `invoke` returns
//! `Ok(RawResponse)` for any status and `Err` only when no response arrived.
//! Callers classify statuses with [`RawResponse::expect_status`].

use crate::config::HttpConfig;
use crate::error::{CoreError, Result};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace};
use url::Url;

pub use reqwest::Method;

/// Query parameter carrying the service API version
pub const API_VERSION: &str = "api-version";

/// User agent string for armkit HTTP requests
const ARMKIT_USER_AGENT: &str = concat!("armkit/", env!("CARGO_PKG_VERSION"));

/// A request descriptor: everything needed to (re)issue a call
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl Request {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Add a header, rejecting values that are not valid header text
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| CoreError::invalid_argument(name, e.to_string()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| CoreError::invalid_argument(name.as_str(), e.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Replace all headers
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Serialize `body` as the JSON payload
    pub fn with_json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| CoreError::invalid_argument("body", e.to_string()))?;
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body = Some(bytes);
        Ok(self)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn url_mut(&mut self) -> &mut Url {
        &mut self.url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

/// One raw HTTP response
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: u16,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Header value as text; header names are case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body as (lossy) UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True when the body is empty or only whitespace
    pub fn is_body_empty(&self) -> bool {
        self.body.iter().all(u8::is_ascii_whitespace)
    }

    /// Deserialize the body, treating a mismatch as a contract violation
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| {
            CoreError::UnexpectedResponseShape(format!(
                "HTTP {} body does not match the expected type: {}",
                self.status, e
            ))
        })
    }

    /// Body as a JSON value, or `None` when it is empty or not JSON
    pub fn json_value(&self) -> Option<serde_json::Value> {
        if self.is_body_empty() {
            return None;
        }
        serde_json::from_slice(&self.body).ok()
    }

    /// Pass the response through if its status is listed, otherwise turn it into `CoreError::Http`
    pub fn expect_status(self, expected: &[u16]) -> Result<Self> {
        if expected.contains(&self.status) {
            Ok(self)
        } else {
            Err(CoreError::from_response(&self))
        }
    }
}

/// Issues one request and returns one response
///
/// Transport failures must surface as [`CoreError::Transport`] so callers can
/// tell them apart from HTTP error statuses.
#[async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, request: &Request) -> Result<RawResponse>;
}

/// `reqwest`-backed invoker
///
/// Authentication, retries and connection pooling belong to the wrapped
/// `reqwest::Client`; supply a preconfigured one with [`HttpInvoker::from_client`].
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    client: reqwest::Client,
}

impl HttpInvoker {
    /// Create an invoker with default settings
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create an invoker with an optional request timeout and user agent
    pub fn with_options(timeout: Option<Duration>, user_agent: Option<&str>) -> Result<Self> {
        let mut builder =
            reqwest::Client::builder().user_agent(user_agent.unwrap_or(ARMKIT_USER_AGENT));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(CoreError::transport)?;
        Ok(Self { client })
    }

    /// Create an invoker from a profile's `[http]` table
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        Self::with_options(
            config.timeout_secs.map(Duration::from_secs),
            config.user_agent.as_deref(),
        )
    }

    /// Wrap an existing client
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Invoker for HttpInvoker {
    async fn invoke(&self, request: &Request) -> Result<RawResponse> {
        debug!(method = %request.method(), url = %request.url(), "Sending request");

        let mut builder = self
            .client
            .request(request.method().clone(), request.url().clone())
            .headers(request.headers().clone());
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder.send().await.map_err(CoreError::transport)?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(CoreError::transport)?.to_vec();

        trace!(status, bytes = body.len(), "Received response");
        Ok(RawResponse::new(status, headers, body))
    }
}

/// Validate and percent-encode a mandatory path parameter
///
/// Called while a request is being built, so a missing value fails before
/// any network activity.
pub fn path_param(name: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid_argument(name, "must not be empty"));
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// Append `key=value` to the query string unless `key` is already present
pub fn ensure_query_param(url: &mut Url, key: &str, value: &str) {
    let present = url.query_pairs().any(|(k, _)| k == key);
    if !present {
        url.query_pairs_mut().append_pair(key, value);
    }
}
