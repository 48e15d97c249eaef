//! Portfolio API.

use iol_types::Result;

use crate::client::IolClient;
use crate::types::Portfolio;

impl IolClient {
    /// Fetch the portfolio for a country (usually [`DEFAULT_COUNTRY`](crate::DEFAULT_COUNTRY)).
    ///
    /// `GET /api/v2/portafolio/{country}`, normalized to `activos`, `total`
    /// and `total_usd`.
    pub async fn get_portfolio(&self, country: &str) -> Result<Portfolio> {
        let data = self.get(&["api", "v2", "portafolio", country]).await?;
        Ok(Portfolio::from_payload(&data))
    }
}
