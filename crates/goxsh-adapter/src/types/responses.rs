/*
[INPUT]:  Raw JSON success payloads
[OUTPUT]: Per-endpoint response envelopes
[POS]:    Data layer - response envelope definitions
[UPDATE]: When endpoints gain or lose response fields
*/

use serde::Deserialize;

use super::models::{Balance, Order, Ticker};

#[derive(Debug, Deserialize)]
pub struct TickerResponse {
    pub ticker: Ticker,
}

#[derive(Debug, Deserialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Reply to a buy/sell placement: human-readable status segments
/// separated by `<br>`, plus the refreshed open-order list.
#[derive(Debug, Deserialize)]
pub struct PlaceOrderResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub orders: Vec<Order>,
}

#[derive(Debug, Deserialize)]
pub struct CancelOrderResponse {
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Reply to a withdrawal: status line plus the updated balance carried in
/// the same object.
#[derive(Debug, Deserialize)]
pub struct WithdrawResponse {
    #[serde(default)]
    pub status: String,
    #[serde(flatten)]
    pub balance: Balance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn withdraw_response_carries_status_and_balance() {
        let info: WithdrawResponse = serde_json::from_value(json!({
            "status": "Queued.",
            "btcs": "3.1",
            "usds": "0.5",
        }))
        .expect("withdraw response");
        assert_eq!(info.status, "Queued.");
        assert_eq!(info.balance.btc.to_string(), "3.1");
    }

    #[test]
    fn placement_status_defaults_to_empty() {
        let placed: PlaceOrderResponse =
            serde_json::from_value(json!({"orders": []})).expect("placement response");
        assert!(placed.status.is_empty());
        assert!(placed.orders.is_empty());
    }
}
