//! Main client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER};
use url::Url;

use iol_types::{IolError, Result};

pub use iol_types::BASE_URL;

use crate::response;

/// Fixed per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// IOL API client.
///
/// Holds one access token for its whole lifetime. Cloning is cheap and
/// shares the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use iol_client::IolClient;
///
/// # async fn example() -> iol_client::Result<()> {
/// let client = IolClient::builder()
///     .base_url("https://api.invertironline.com")
///     .token("access-token")
///     .build()?;
///
/// let status = client.get_account_status().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct IolClient {
    inner: Arc<ClientInner>,
}

/// Inner client state (shared across clones).
struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: String,
    timeout: Duration,
}

impl std::fmt::Debug for IolClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IolClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("timeout", &self.inner.timeout)
            .finish_non_exhaustive()
    }
}

impl IolClient {
    /// Create a client for the production API with the given access token.
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::builder().token(token).build()
    }

    /// Create a new client builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The access token sent with every request.
    pub fn token(&self) -> &str {
        &self.inner.token
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// Build a URL from path segments, percent-encoding each one.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| IolError::Config("base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Make a GET request and classify the response.
    pub(crate) async fn get(&self, segments: &[&str]) -> Result<serde_json::Value> {
        let url = self.url(segments)?;
        tracing::debug!(%url, "GET");

        let response = self
            .inner
            .http
            .get(url.clone())
            .timeout(self.inner.timeout)
            .send()
            .await
            .map_err(IolError::Network)?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await.map_err(IolError::Network)?;

        response::classify(status, retry_after.as_deref(), &body).inspect_err(|e| {
            tracing::warn!(%url, status, error = %e, "Request failed");
        })
    }
}

/// Builder for creating an [`IolClient`].
#[derive(Debug)]
pub struct ClientBuilder {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Create a new builder with defaults.
    pub fn new() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Set the API origin.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the bearer access token.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<IolClient> {
        let token = self
            .token
            .ok_or_else(|| IolError::Config("access token is required".to_string()))?;

        let mut base_url = Url::parse(&self.base_url)
            .map_err(|e| IolError::Config(format!("invalid base URL '{}': {}", self.base_url, e)))?;
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| IolError::Config("invalid access token".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("iol-client/{}", env!("CARGO_PKG_VERSION")));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(user_agent)
            .build()
            .map_err(|e| IolError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(IolClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                token,
                timeout: self.timeout,
            }),
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_token() {
        let client = IolClient::new("test_access_token").unwrap();
        assert_eq!(client.token(), "test_access_token");
        assert_eq!(client.base_url().as_str(), "https://api.invertironline.com/");
    }

    #[test]
    fn test_builder_requires_token() {
        let result = ClientBuilder::new().build();
        assert!(matches!(result, Err(IolError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_invalid_base_url() {
        let result = ClientBuilder::new().token("t").base_url("not a url").build();
        assert!(matches!(result, Err(IolError::Config(_))));
    }

    #[test]
    fn test_builder_rejects_token_with_newline() {
        let result = ClientBuilder::new().token("bad\ntoken").build();
        assert!(matches!(result, Err(IolError::Config(_))));
    }

    #[test]
    fn test_builder_normalizes_trailing_slash() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:8080")
            .token("t")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_url_building() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:8080")
            .token("t")
            .build()
            .unwrap();

        let url = client.url(&["api", "v2", "portafolio", "argentina"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v2/portafolio/argentina");
    }

    #[test]
    fn test_url_building_with_prefix_and_escaping() {
        let client = ClientBuilder::new()
            .base_url("http://localhost:8080/proxy")
            .token("t")
            .build()
            .unwrap();

        let url = client.url(&["api", "v2", "bCBA", "Titulos", "AL30 D"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/proxy/api/v2/bCBA/Titulos/AL30%20D"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client = IolClient::new("secret-token").unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret-token"));
    }
}
