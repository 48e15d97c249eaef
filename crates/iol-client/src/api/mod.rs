//! API endpoint implementations.
//!
//! Each endpoint is a method on [`IolClient`](crate::IolClient); all of them
//! are `GET`s under `/api/v2` and share the same response classification.

mod account;
mod instruments;
mod portfolio;
mod quotes;

pub use quotes::QuotesQuery;

pub use iol_types::{DEFAULT_COUNTRY, DEFAULT_INSTRUMENT, DEFAULT_MARKET};
