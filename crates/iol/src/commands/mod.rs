//! CLI command handlers.

pub mod account;
pub mod auth;
pub mod instrument;
pub mod portfolio;
pub mod quotes;

use std::future::Future;

use anyhow::{Result, bail};
use iol_auth::{AuthConfig, Authenticator, IolError, TokenData};
use iol_client::IolClient;
use iol_config::IolConfig;

use crate::session::SessionStore;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// API origin for both the token and data endpoints.
    pub base_url: String,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
    /// Merged configuration.
    pub config: IolConfig,
    /// Where the current session is persisted.
    pub sessions: SessionStore,
}

impl Context {
    pub fn authenticator(&self) -> Result<Authenticator> {
        Ok(Authenticator::with_config(AuthConfig::with_base_url(
            &self.base_url,
        ))?)
    }

    pub fn client(&self, token: &TokenData) -> Result<IolClient> {
        Ok(IolClient::builder()
            .base_url(&self.base_url)
            .token(&token.access_token)
            .build()?)
    }

    /// Exchange the stored refresh token and persist the result.
    pub async fn refresh(&self, token: &TokenData) -> Result<TokenData> {
        let mut auth = self.authenticator()?;
        match auth.refresh_token(&token.refresh_token).await {
            Ok(fresh) => {
                self.sessions.save(&fresh)?;
                Ok(fresh)
            }
            Err(e @ IolError::TokenExpired) => {
                bail!("{} Run 'iol auth login'.", e)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Stored token data, refreshed first when it is about to expire.
    pub async fn valid_token(&self) -> Result<TokenData> {
        let Some(token) = self.sessions.load()? else {
            bail!("Not logged in. Run 'iol auth login' first.");
        };

        if Authenticator::is_token_valid(&token) {
            return Ok(token);
        }

        tracing::info!("Stored token expired, refreshing");
        self.refresh(&token).await
    }

    /// Run an API call with a valid token.
    ///
    /// A call rejected with `TokenExpired` is retried once with a freshly
    /// refreshed token on a new client. Other errors are returned as-is.
    pub async fn with_client<T, F, Fut>(&self, call: F) -> Result<T>
    where
        F: Fn(IolClient) -> Fut,
        Fut: Future<Output = iol_client::Result<T>>,
    {
        let token = self.valid_token().await?;

        match call(self.client(&token)?).await {
            Err(IolError::TokenExpired) => {
                tracing::info!("Access token rejected, refreshing");
                let token = self.refresh(&token).await?;
                Ok(call(self.client(&token)?).await?)
            }
            other => Ok(other?),
        }
    }
}
