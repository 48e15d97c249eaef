//! HTTP client for the IOL brokerage REST API.
//!
//! This crate provides a bearer-authenticated client for the read-only
//! market and account endpoints.
//!
//! # Example
//!
//! ```no_run
//! use iol_client::{IolClient, QuotesQuery, Result};
//!
//! # async fn example() -> Result<()> {
//! let client = IolClient::new("access-token")?;
//!
//! let portfolio = client.get_portfolio(iol_client::DEFAULT_COUNTRY).await?;
//! println!("Total: {} ARS / {} USD", portfolio.total, portfolio.total_usd);
//!
//! let quotes = client.get_quotes(&QuotesQuery::default()).await?;
//! println!("{} quotes", quotes.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every response goes through [`response::classify`], which maps it onto
//! the shared [`IolError`] kinds. The API sometimes reports errors inside a
//! 200 body; those are classified the same way as HTTP errors.
//!
//! The access token is fixed for the lifetime of a client. When a call
//! fails with [`IolError::TokenExpired`], refresh the token and build a new
//! client.

pub mod api;
pub mod client;
pub mod response;
pub mod types;

pub use api::{DEFAULT_COUNTRY, DEFAULT_INSTRUMENT, DEFAULT_MARKET, QuotesQuery};
pub use client::{BASE_URL, ClientBuilder, DEFAULT_TIMEOUT, IolClient};
pub use iol_types::{IolError, Result};
pub use types::{AccountStatus, InstrumentDetail, Portfolio, Quote};
