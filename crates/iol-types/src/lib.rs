//! Shared types for the IOL client crates.
//!
//! Both the authenticator (`iol-auth`) and the API client (`iol-client`)
//! report failures through the same flat [`IolError`] enum so callers can
//! branch on a single set of kinds. The endpoint and market defaults live
//! here too, so the client and the config layer agree on them.

pub mod defaults;
pub mod error;

pub use defaults::{BASE_URL, DEFAULT_COUNTRY, DEFAULT_INSTRUMENT, DEFAULT_MARKET};
pub use error::{DEFAULT_RETRY_AFTER_SECS, IolError, Result};
