//! Client configuration options.

use std::time::Duration;

use url::Url;

use crate::{Error, Result};

/// Root URL of the hosted Behave API.
pub const DEFAULT_BASE_URL: &str = "http://api.behave.io";

/// Environment variable holding the app token, read by `BehaveClient::from_env`.
pub const TOKEN_ENV_VAR: &str = "BEHAVE_API_TOKEN";

/// Environment variable overriding the API root URL.
pub const BASE_URL_ENV_VAR: &str = "BEHAVE_API_URL";

/// Configuration for the Behave client.
///
/// # Example
///
/// ```
/// use behave_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(10))
///     .with_user_agent("my-game/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root URL; request paths are resolved against it
    pub base_url: String,
    /// Request timeout, enforced by the transport
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: format!("behave-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default configuration, with the base URL taken from
    /// `BEHAVE_API_URL` when it is set.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV_VAR) {
            Ok(url) if !url.trim().is_empty() => Self::default().with_base_url(url),
            _ => Self::default(),
        }
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Parse and check the base URL.
    pub(crate) fn parsed_base_url(&self) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "base URL {} cannot be used as a base",
                self.base_url
            )));
        }
        // Paths are joined relative to the root, so keep a trailing slash.
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(url)
    }
}
