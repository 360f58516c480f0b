//! API token holder and header injection.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::{Error, Result};

/// Header carrying the application token on every request.
pub const TOKEN_HEADER: &str = "X-Behave-Api-Token";

/// The application token used to authenticate every request.
///
/// The token is kept in a [`SecretString`] so it never shows up in `Debug`
/// output or logs.
///
/// # Example
///
/// ```
/// use behave_rs::ApiToken;
///
/// let token = ApiToken::new("app-secret").unwrap();
/// assert!(!format!("{:?}", token).contains("app-secret"));
/// ```
#[derive(Clone)]
pub struct ApiToken {
    secret: SecretString,
}

impl ApiToken {
    /// Wrap a token, rejecting empty values and values that cannot be sent
    /// as an HTTP header.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(Error::config("a valid app token is required"));
        }
        HeaderValue::from_str(&token)
            .map_err(|_| Error::config("app token contains invalid header characters"))?;

        Ok(Self {
            secret: SecretString::from(token),
        })
    }

    /// Read the token from an environment variable.
    pub fn from_env(var: &str) -> Result<Self> {
        let token = std::env::var(var)
            .map_err(|_| Error::config(format!("environment variable {var} is not set")))?;
        Self::new(token)
    }

    /// Attach the token header to an outgoing request's headers.
    ///
    /// Any value already present under the token header is replaced.
    pub fn inject(&self, headers: &mut HeaderMap) -> Result<()> {
        let mut value = HeaderValue::from_str(self.secret.expose_secret())
            .map_err(|_| Error::config("Invalid token format"))?;
        value.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-behave-api-token"), value);
        Ok(())
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiToken").field("secret", &"[REDACTED]").finish()
    }
}
