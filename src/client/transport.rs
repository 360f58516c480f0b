//! The HTTP transport the client sends every request through.
//!
//! [`Transport`] issues exactly one HTTP request and hands back the status
//! code and decoded JSON body. It knows nothing about authentication or the
//! Behave response envelope; both are handled by the client on top of it.
//! [`ReqwestTransport`] is the default implementation; tests and callers
//! with special needs can supply their own.

use std::borrow::Cow;
use std::fmt;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use url::Url;

use super::config::ClientConfig;
use crate::{Error, Result};

/// Percent-encode `id` so it travels as exactly one URL path segment.
///
/// `/`, `?` and `#` inside the id are escaped. Empty ids and the dot
/// segments `.` and `..` cannot be sent as a segment and are rejected.
pub(crate) fn path_segment<'a>(what: &str, id: &'a str) -> Result<Cow<'a, str>> {
    if id.trim().is_empty() {
        return Err(Error::config(format!("{what} must not be empty")));
    }
    if id == "." || id == ".." {
        return Err(Error::config(format!("{what} cannot be `{id}`")));
    }
    Ok(urlencoding::encode(id))
}

/// A fully built request, ready to be sent.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: Method,
    /// Path relative to the API root, always starting with `/`
    pub path: String,
    /// Query string parameters, in order
    pub query: Vec<(String, String)>,
    /// Request headers, including authentication
    pub headers: HeaderMap,
    /// JSON body, if any
    pub body: Option<Value>,
}

impl ApiRequest {
    /// Create a request for `path`, adding the leading slash if missing.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Self {
            method,
            path,
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Append a query string parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Set the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a query parameter by name.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// The raw outcome of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Decoded JSON body (`Null` when the body was empty)
    pub body: Value,
}

impl RawResponse {
    /// Create a response from a status and body.
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one HTTP request and returns its status and decoded body.
///
/// Implementations must not retry; errors are reported to the caller as is.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse>;
}

/// [`Transport`] backed by a `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Self::with_client(http, config)
    }

    /// Use an existing `reqwest::Client` (timeouts and user agent are then
    /// whatever that client was built with).
    pub fn with_client(http: reqwest::Client, config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            http,
            base_url: config.parsed_base_url()?,
        })
    }

    fn url_for(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse> {
        let url = self.url_for(&request.path)?;

        let mut builder = self
            .http
            .request(request.method, url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            Value::Null
        } else if status.is_success() {
            serde_json::from_slice(&bytes)?
        } else {
            // Error pages are not always JSON; keep the text for the error message.
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };

        Ok(RawResponse::new(status.as_u16(), body))
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}
