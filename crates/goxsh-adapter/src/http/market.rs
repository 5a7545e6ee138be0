/*
[INPUT]:  No parameters (public market data)
[OUTPUT]: Ticker data
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use crate::http::client::endpoints;
use crate::http::{GoxClient, Result};
use crate::types::{Ticker, TickerResponse};

impl GoxClient {
    /// Fetch the public ticker
    ///
    /// POST /code/data/ticker.php (no credentials attached)
    pub async fn get_ticker(&self) -> Result<Ticker> {
        let response: TickerResponse = self.call(endpoints::TICKER, &[], false).await?;
        Ok(response.ticker)
    }
}
