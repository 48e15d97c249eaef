//! Password login and refresh-token exchange against the IOL token endpoint.

use std::time::Duration;

use chrono::Utc;

use iol_types::{IolError, Result};

pub use iol_types::BASE_URL;

use crate::token::{self, ExpiresAt, RawTokenResponse, TokenData};

/// Token endpoint path. Lives at the root, not under `/api/v2`.
pub const TOKEN_ENDPOINT: &str = "/token";

/// Fixed per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where and how to reach the token endpoint.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub base_url: String,
    pub token_path: String,
    pub timeout: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::iol()
    }
}

impl AuthConfig {
    /// Production IOL token endpoint.
    pub fn iol() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            token_path: TOKEN_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Same endpoint layout on a different origin.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::iol()
        }
    }

    /// Full URL of the token endpoint.
    pub fn token_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.token_path)
    }
}

/// Exchanges credentials or a refresh token for [`TokenData`].
///
/// Keeps the most recent successful result; each login or refresh replaces it.
#[derive(Debug)]
pub struct Authenticator {
    http: reqwest::Client,
    config: AuthConfig,
    token_data: Option<TokenData>,
}

impl Authenticator {
    /// Authenticator for the production IOL endpoint.
    pub fn new() -> Result<Self> {
        Self::with_config(AuthConfig::default())
    }

    /// Authenticator with a custom configuration.
    pub fn with_config(config: AuthConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("iol-auth/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IolError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            config,
            token_data: None,
        })
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Token data from the last successful login or refresh.
    pub fn token_data(&self) -> Option<&TokenData> {
        self.token_data.as_ref()
    }

    /// Log in with username and password.
    ///
    /// A 401, or a 400 whose body reports `invalid_grant`, means the
    /// credentials were rejected.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<TokenData> {
        let form = [
            ("username", username),
            ("password", password),
            ("grant_type", "password"),
        ];
        let (status, body) = self.post_token(&form).await?;

        if status == 401 || (status == 400 && is_invalid_grant(&body)) {
            tracing::warn!(status, "Login rejected");
            return Err(IolError::InvalidCredentials);
        }

        let token = self.accept(status, &body)?;
        tracing::info!(expires_in = token.expires_in, "Login successful");
        Ok(token)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// Any 400 or 401 means the refresh token itself is no longer usable and
    /// the caller has to log in again.
    pub async fn refresh_token(&mut self, refresh_token: &str) -> Result<TokenData> {
        let form = [
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ];
        let (status, body) = self.post_token(&form).await?;

        if status == 400 || status == 401 {
            tracing::warn!(status, "Token refresh rejected");
            return Err(IolError::TokenExpired);
        }

        let token = self.accept(status, &body)?;
        tracing::info!(expires_in = token.expires_in, "Token refreshed");
        Ok(token)
    }

    /// Check whether a token is still usable, with a 30 second margin.
    ///
    /// Works on any token data, not only on what this authenticator issued.
    pub fn is_token_valid<T: ExpiresAt + ?Sized>(token_data: &T) -> bool {
        token::is_valid_at(token_data.expires_at(), Utc::now())
    }

    async fn post_token(&self, form: &[(&str, &str)]) -> Result<(u16, Vec<u8>)> {
        let url = self.config.token_url();
        tracing::debug!(%url, "POST token");

        let response = self
            .http
            .post(&url)
            .form(form)
            .send()
            .await
            .map_err(IolError::Network)?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(IolError::Network)?;
        Ok((status, body.to_vec()))
    }

    /// Turn a non-rejected response into token data and remember it.
    fn accept(&mut self, status: u16, body: &[u8]) -> Result<TokenData> {
        if !(200..300).contains(&status) {
            tracing::warn!(status, "Token endpoint error");
            return Err(IolError::http(status));
        }

        let raw: RawTokenResponse = serde_json::from_slice(body).map_err(|e| {
            IolError::api(Some(status), format!("Respuesta de token inválida: {}", e))
        })?;

        let token = TokenData::from_response(raw, Utc::now());
        self.token_data = Some(token.clone());
        Ok(token)
    }
}

fn is_invalid_grant(body: &[u8]) -> bool {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(|e| e == "invalid_grant"))
        .unwrap_or(false)
}
