//! Errors from reading, validating and writing IOL config files.

use std::path::PathBuf;

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A config file or its directory could not be read or written.
    #[error("cannot access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid TOML for the IOL schema.
    #[error("{}: {source}", .path.display())]
    Syntax {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// In-memory TOML text did not parse.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    /// `[api] base_url` is not an http(s) URL.
    #[error("invalid base_url {url:?}: {reason}")]
    BaseUrl { url: String, reason: String },

    #[error("cannot render config: {0}")]
    Render(#[from] toml::ser::Error),
}
