//! HTTP client implementation for the Behave API.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::api::{BadgesService, LeaderboardsService, PlayersService};
use crate::auth::ApiToken;
use crate::{Error, Result};

use super::config::{ClientConfig, TOKEN_ENV_VAR};
use super::transport::{ApiRequest, RawResponse, ReqwestTransport, Transport};

/// The main client for interacting with the Behave API.
///
/// The client holds the app token and the transport; every service it hands
/// out shares them. Cloning is cheap and clones share the same transport.
///
/// # Example
///
/// ```no_run
/// use behave_rs::{BehaveClient, PlayerId};
///
/// # async fn example() -> behave_rs::Result<()> {
/// let client = BehaveClient::new("your-app-token")?;
///
/// let player = PlayerId::new("user-42");
/// client.players().track(&player, "level-up", None).await?;
///
/// let badges = client.players().badges(&player).await?;
/// println!("{} badges unlocked", badges.len());
/// # Ok(())
/// # }
/// ```
pub struct BehaveClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) token: ApiToken,
    pub(crate) config: ClientConfig,
}

impl BehaveClient {
    /// Create a client for the hosted API with the default configuration.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_config(ApiToken::new(token)?, ClientConfig::default())
    }

    /// Create a client from `BEHAVE_API_TOKEN` and, when set, `BEHAVE_API_URL`.
    pub fn from_env() -> Result<Self> {
        let token = ApiToken::from_env(TOKEN_ENV_VAR)?;
        Self::with_config(token, ClientConfig::from_env())
    }

    /// Create a client with a custom configuration.
    pub fn with_config(token: ApiToken, config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(token, config, transport))
    }

    /// Create a client that sends requests through the given transport.
    ///
    /// `config.base_url` and `config.timeout` are only honored if the
    /// transport uses them.
    pub fn with_transport(
        token: ApiToken,
        config: ClientConfig,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport: Arc::new(transport),
                token,
                config,
            }),
        }
    }

    /// Get the players service (tracking, identification, unlocked badges).
    pub fn players(&self) -> PlayersService {
        PlayersService::new(self.inner.clone())
    }

    /// Get the badges service.
    pub fn badges(&self) -> BadgesService {
        BadgesService::new(self.inner.clone())
    }

    /// Get the leaderboards service.
    pub fn leaderboards(&self) -> LeaderboardsService {
        LeaderboardsService::new(self.inner.clone())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }
}

impl ClientInner {
    /// Build request headers with authentication.
    pub(crate) fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.token.inject(&mut headers)?;
        Ok(headers)
    }

    /// Authenticate and send a request, returning the envelope's `data`.
    pub(crate) async fn execute<T: DeserializeOwned>(&self, mut request: ApiRequest) -> Result<T> {
        let headers = self.build_headers()?;
        request.headers.extend(headers);

        let method = request.method.clone();
        let path = request.path.clone();
        tracing::debug!(%method, %path, query = ?request.query, "sending request");

        let response = self.transport.send(request).await?;
        self.handle_response(&method, &path, response)
    }

    /// Make a GET request.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(ApiRequest::new(Method::GET, path)).await
    }

    /// Make a POST request.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = ApiRequest::new(Method::POST, path).with_body(serde_json::to_value(body)?);
        self.execute(request).await
    }

    /// Make a PUT request.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = ApiRequest::new(Method::PUT, path).with_body(serde_json::to_value(body)?);
        self.execute(request).await
    }

    /// Make a DELETE request.
    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(ApiRequest::new(Method::DELETE, path)).await
    }

    /// Unwrap the `{"data": ..., "error": ...}` envelope.
    ///
    /// A non-null `error` is a failure even on a 2xx status.
    fn handle_response<T: DeserializeOwned>(
        &self,
        method: &Method,
        path: &str,
        response: RawResponse,
    ) -> Result<T> {
        let success = response.is_success();
        let RawResponse { status, mut body } = response;

        let has_error = body.get("error").is_some_and(|e| !e.is_null());
        if success && !has_error {
            let data = body
                .as_object_mut()
                .and_then(|envelope| envelope.remove("data"))
                .unwrap_or(Value::Null);
            return Ok(serde_json::from_value(data)?);
        }

        tracing::warn!(%method, %path, status, "API request failed");

        let message = |fallback: &str| {
            body.get("error")
                .and_then(|e| e.as_str().or_else(|| e.get("message").and_then(|m| m.as_str())))
                .unwrap_or(fallback)
                .to_string()
        };

        match status {
            401 => Err(Error::Unauthorized(message("Invalid app token"))),
            404 => Err(Error::NotFound(message("Resource not found"))),
            _ => Err(Error::from_api_response(status, body)),
        }
    }
}

impl Clone for BehaveClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for BehaveClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaveClient")
            .field("config", &self.inner.config)
            .field("token", &self.inner.token)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TOKEN_HEADER;
    use async_trait::async_trait;
    use serde_json::json;

    struct Canned(RawResponse);

    #[async_trait]
    impl Transport for Canned {
        async fn send(&self, _request: ApiRequest) -> Result<RawResponse> {
            Ok(self.0.clone())
        }
    }

    fn inner_with(status: u16, body: Value) -> ClientInner {
        ClientInner {
            transport: Arc::new(Canned(RawResponse::new(status, body))),
            token: ApiToken::new("tok-123").unwrap(),
            config: ClientConfig::default(),
        }
    }

    #[test]
    fn test_headers_carry_token_and_content_type() {
        let inner = inner_with(200, json!({}));
        let headers = inner.build_headers().unwrap();
        assert_eq!(headers.get(TOKEN_HEADER).unwrap(), "tok-123");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[tokio::test]
    async fn test_data_is_unwrapped() {
        let inner = inner_with(200, json!({ "data": [1, 2, 3] }));
        let data: Vec<u32> = inner.get("players/p/badges").await.unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_missing_data_decodes_as_null() {
        let inner = inner_with(200, json!({}));
        let data: Option<Vec<u32>> = inner.get("leaderboards/x/reset").await.unwrap();
        assert_eq!(data, None);
    }

    #[tokio::test]
    async fn test_error_field_fails_even_on_success_status() {
        let inner = inner_with(200, json!({ "error": "Leaderboard not found", "data": null }));
        let err = inner.get::<Value>("leaderboards/x").await.unwrap_err();
        match err {
            Error::Api { status, message, .. } => {
                assert_eq!(status, 200);
                assert_eq!(message, "Leaderboard not found");
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let inner = inner_with(401, json!({ "error": "bad token" }));
        assert!(matches!(
            inner.get::<Value>("x").await,
            Err(Error::Unauthorized(m)) if m == "bad token"
        ));

        let inner = inner_with(404, Value::Null);
        assert!(matches!(inner.get::<Value>("x").await, Err(Error::NotFound(_))));

        let inner = inner_with(503, Value::String("upstream down".into()));
        let err = inner.get::<Value>("x").await.unwrap_err();
        assert!(err.is_server_error());
        assert!(err.is_request_error());
    }
}
