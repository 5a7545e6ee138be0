/*
[INPUT]:  Validated amount/price/order-id strings and an order kind
[OUTPUT]: Open-order lists and placement confirmations
[POS]:    HTTP layer - trading endpoints (require credentials)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use crate::http::client::endpoints;
use crate::http::{GoxClient, Result};
use crate::types::{CancelOrderResponse, Order, OrderKind, OrdersResponse, PlaceOrderResponse};

impl GoxClient {
    /// Place a limit order
    ///
    /// POST /code/buyBTC.php or /code/sellBTC.php
    /// Params: amount, price (callers pass already-validated strings)
    pub async fn place_order(
        &self,
        kind: OrderKind,
        amount: &str,
        price: &str,
    ) -> Result<PlaceOrderResponse> {
        let endpoint = match kind {
            OrderKind::Buy => endpoints::BUY,
            OrderKind::Sell => endpoints::SELL,
        };
        self.call(endpoint, &[("amount", amount), ("price", price)], true)
            .await
    }

    /// Cancel an open order, returning the orders that remain
    ///
    /// POST /code/cancelOrder.php
    /// Params: oid, type (numeric kind code)
    pub async fn cancel_order(&self, kind: OrderKind, oid: &str) -> Result<Vec<Order>> {
        let code = kind.code().to_string();
        let response: CancelOrderResponse = self
            .call(endpoints::CANCEL, &[("oid", oid), ("type", &code)], true)
            .await?;
        Ok(response.orders)
    }

    /// List open orders
    ///
    /// POST /code/getOrders.php
    pub async fn get_orders(&self) -> Result<Vec<Order>> {
        let response: OrdersResponse = self.call(endpoints::ORDERS, &[], true).await?;
        Ok(response.orders)
    }
}

#[cfg(test)]
mod tests {
    use crate::http::{ClientConfig, GoxClient};
    use crate::types::{OrderKind, OrderStatus};
    use wiremock::matchers::{body_string, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn logged_in_client(server: &MockServer) -> GoxClient {
        let mut client =
            GoxClient::with_config_and_base_url(ClientConfig::default(), &server.uri())
                .expect("client init");
        client.set_credentials("alice", "hunter2").expect("credentials");
        client
    }

    #[tokio::test]
    async fn place_order_sends_params_then_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/code/buyBTC.php"))
            .and(body_string("amount=0.50000000&price=100&name=alice&pass=hunter2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "Order placed<br>",
                "orders": [],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let placed = logged_in_client(&server)
            .place_order(OrderKind::Buy, "0.50000000", "100")
            .await
            .expect("place_order failed");

        assert_eq!(placed.status, "Order placed<br>");
        assert!(placed.orders.is_empty());
    }

    #[tokio::test]
    async fn sell_uses_the_sell_endpoint() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/code/sellBTC.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "",
                "orders": [],
            })))
            .expect(1)
            .mount(&server)
            .await;

        logged_in_client(&server)
            .place_order(OrderKind::Sell, "1", "200")
            .await
            .expect("place_order failed");
    }

    #[tokio::test]
    async fn cancel_order_sends_numeric_kind_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/code/cancelOrder.php"))
            .and(body_string("oid=abc123&type=2&name=alice&pass=hunter2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "orders": [{
                    "oid": "def456",
                    "type": 1,
                    "amount": "2",
                    "price": "19.5",
                    "date": 1309140089,
                }],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let remaining = logged_in_client(&server)
            .cancel_order(OrderKind::Buy, "abc123")
            .await
            .expect("cancel_order failed");

        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].oid, "def456");
        assert_eq!(remaining[0].kind, OrderKind::Sell);
        assert_eq!(remaining[0].status, OrderStatus::Active);
    }

    #[tokio::test]
    async fn get_orders_unwraps_the_orders_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/code/getOrders.php"))
            .and(body_string("name=alice&pass=hunter2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "orders": [
                    {
                        "oid": "1",
                        "type": 2,
                        "amount": "0.1",
                        "price": "17",
                        "date": "1309140089",
                        "dark": "1",
                        "status": "2",
                    },
                ],
            })))
            .expect(1)
            .mount(&server)
            .await;

        let orders = logged_in_client(&server).get_orders().await.expect("get_orders");

        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].kind, OrderKind::Buy);
        assert!(orders[0].dark);
        assert_eq!(orders[0].status, OrderStatus::InsufficientFunds);
    }
}
