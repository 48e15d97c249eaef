//! Authentication against the IOL token endpoint.
//!
//! # Components
//!
//! - [`authenticator`] - password login and refresh-token exchange
//! - [`token`] - token data parsing and expiry checks
//!
//! Token persistence is left to the caller: the [`Authenticator`] only keeps
//! the most recent [`TokenData`] in memory.

pub mod authenticator;
pub mod token;

pub use authenticator::{AuthConfig, Authenticator, BASE_URL, DEFAULT_TIMEOUT, TOKEN_ENDPOINT};
pub use iol_types::{IolError, Result};
pub use token::{DEFAULT_EXPIRES_IN, ExpiresAt, RawTokenResponse, TokenData, VALIDITY_BUFFER_SECS};
