//! Configuration for IOL tools.
//!
//! Provides TOML-based configuration with:
//! - API origin override (`[api]`)
//! - Default login username (`[auth]`)
//! - Default country, instrument type and market (`[defaults]`)
//!
//! [`ConfigPaths`] locates the user and project files and merges them.
//! Unset fields fall back to the shared defaults in `iol-types`.

pub mod discovery;
pub mod error;
pub mod types;

pub use discovery::{
    CONFIG_DIR_ENV, ConfigPaths, Layer, LayerOutcome, LayerStatus, LoadedConfig,
    default_config_dir, load_config_file, save_config,
};
pub use error::{ConfigError, Result};
pub use types::{ApiConfig, AuthConfig, DefaultsConfig, IolConfig};
