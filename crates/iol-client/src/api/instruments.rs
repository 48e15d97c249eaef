//! Instrument detail API.

use iol_types::Result;

use crate::client::IolClient;
use crate::types::InstrumentDetail;

impl IolClient {
    /// Fetch details for one instrument, e.g. `GGAL` on
    /// [`DEFAULT_MARKET`](crate::DEFAULT_MARKET).
    ///
    /// `GET /api/v2/{market}/Titulos/{symbol}`, returned unchanged.
    pub async fn get_instrument_detail(
        &self,
        symbol: &str,
        market: &str,
    ) -> Result<InstrumentDetail> {
        self.get(&["api", "v2", market, "Titulos", symbol]).await
    }
}
