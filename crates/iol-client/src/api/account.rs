//! Account status API.

use iol_types::Result;

use crate::client::IolClient;
use crate::types::AccountStatus;

impl IolClient {
    /// Fetch account balances.
    ///
    /// `GET /api/v2/estadocuenta`, reduced to the `cuentas` list.
    pub async fn get_account_status(&self) -> Result<AccountStatus> {
        let data = self.get(&["api", "v2", "estadocuenta"]).await?;
        Ok(AccountStatus::from_payload(&data))
    }
}
