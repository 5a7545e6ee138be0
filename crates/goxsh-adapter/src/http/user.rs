/*
[INPUT]:  Stored credentials and withdrawal parameters
[OUTPUT]: Account balance and withdrawal confirmations
[POS]:    HTTP layer - account endpoints (require credentials)
[UPDATE]: When adding new account endpoints or changing parameters
*/

use crate::http::client::endpoints;
use crate::http::{GoxClient, Result};
use crate::types::{Balance, WithdrawResponse};

impl GoxClient {
    /// Fetch the account balance
    ///
    /// POST /code/getFunds.php
    pub async fn get_balance(&self) -> Result<Balance> {
        self.call(endpoints::BALANCE, &[], true).await
    }

    /// Withdraw bitcoins to an address, returning the status line and the
    /// updated balance
    ///
    /// POST /code/withdraw.php
    /// Params: group1=BTC, btca, amount
    pub async fn withdraw(&self, address: &str, amount: &str) -> Result<WithdrawResponse> {
        self.call(
            endpoints::WITHDRAW,
            &[("group1", "BTC"), ("btca", address), ("amount", amount)],
            true,
        )
        .await
    }
}
