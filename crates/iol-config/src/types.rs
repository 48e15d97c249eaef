//! Configuration types.
//!
//! ```toml
//! [api]
//! base_url = "https://api.invertironline.com"
//!
//! [auth]
//! username = "me@example.com"
//!
//! [defaults]
//! country = "argentina"
//! instrument = "acciones"
//! market = "bCBA"
//! ```
//!
//! Every field is optional. Unset fields fall back to the built-in defaults
//! and are left out when saving, so layered files only carry overrides.

use iol_types::{BASE_URL, DEFAULT_COUNTRY, DEFAULT_INSTRUMENT, DEFAULT_MARKET};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{ConfigError, Result};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IolConfig {
    #[serde(default, skip_serializing_if = "ApiConfig::is_empty")]
    pub api: ApiConfig,

    #[serde(default, skip_serializing_if = "AuthConfig::is_empty")]
    pub auth: AuthConfig,

    #[serde(default, skip_serializing_if = "DefaultsConfig::is_empty")]
    pub defaults: DefaultsConfig,
}

/// `[api]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// API origin shared by the token and data endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// `[auth]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Username used by `login` when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instrument: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
}

impl ApiConfig {
    fn is_empty(&self) -> bool {
        self.base_url.is_none()
    }
}

impl AuthConfig {
    fn is_empty(&self) -> bool {
        self.username.is_none()
    }
}

impl DefaultsConfig {
    fn is_empty(&self) -> bool {
        self.country.is_none() && self.instrument.is_none() && self.market.is_none()
    }
}

impl IolConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(&mut self, other: IolConfig) {
        if other.api.base_url.is_some() {
            self.api.base_url = other.api.base_url;
        }
        if other.auth.username.is_some() {
            self.auth.username = other.auth.username;
        }
        if other.defaults.country.is_some() {
            self.defaults.country = other.defaults.country;
        }
        if other.defaults.instrument.is_some() {
            self.defaults.instrument = other.defaults.instrument;
        }
        if other.defaults.market.is_some() {
            self.defaults.market = other.defaults.market;
        }
    }

    /// Reject a `base_url` the HTTP clients could not use.
    pub fn validate(&self) -> Result<()> {
        let Some(raw) = self.api.base_url.as_deref() else {
            return Ok(());
        };
        let reason = match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => return Ok(()),
            Ok(url) => format!("unsupported scheme '{}'", url.scheme()),
            Err(e) => e.to_string(),
        };
        Err(ConfigError::BaseUrl {
            url: raw.to_string(),
            reason,
        })
    }

    /// Effective API origin.
    pub fn base_url(&self) -> &str {
        self.api.base_url.as_deref().unwrap_or(BASE_URL)
    }

    /// Effective default country.
    pub fn country(&self) -> &str {
        self.defaults.country.as_deref().unwrap_or(DEFAULT_COUNTRY)
    }

    /// Effective default instrument type.
    pub fn instrument(&self) -> &str {
        self.defaults.instrument.as_deref().unwrap_or(DEFAULT_INSTRUMENT)
    }

    /// Effective default market.
    pub fn market(&self) -> &str {
        self.defaults.market.as_deref().unwrap_or(DEFAULT_MARKET)
    }
}
