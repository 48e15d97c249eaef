//! Quotes API.

use iol_types::Result;

use super::{DEFAULT_COUNTRY, DEFAULT_INSTRUMENT};
use crate::client::IolClient;
use crate::types::{Quote, quotes_from_payload};

/// Which quote panel to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotesQuery {
    /// Instrument type: `acciones`, `bonos`, `cedears`, `opciones`, ...
    pub instrument: String,
    /// Country of the market.
    pub country: String,
}

impl Default for QuotesQuery {
    fn default() -> Self {
        Self {
            instrument: DEFAULT_INSTRUMENT.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl QuotesQuery {
    /// Query for an instrument type in the default country.
    pub fn instrument(instrument: impl Into<String>) -> Self {
        Self {
            instrument: instrument.into(),
            ..Default::default()
        }
    }
}

impl IolClient {
    /// Fetch all quotes for an instrument type.
    ///
    /// `GET /api/v2/Cotizaciones/{instrument}/{country}/Todos`. The server
    /// may answer with a bare array or with the array under `titulos`;
    /// both come back as a plain list.
    pub async fn get_quotes(&self, query: &QuotesQuery) -> Result<Vec<Quote>> {
        let data = self
            .get(&[
                "api",
                "v2",
                "Cotizaciones",
                query.instrument.as_str(),
                query.country.as_str(),
                "Todos",
            ])
            .await?;
        Ok(quotes_from_payload(data))
    }
}
