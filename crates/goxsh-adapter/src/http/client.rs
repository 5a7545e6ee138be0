/*
[INPUT]:  HTTP configuration (base URL, timeouts) and login credentials
[OUTPUT]: Configured client that sends authenticated form posts and
          classifies the JSON replies
[POS]:    HTTP layer - core client implementation
[UPDATE]: When changing endpoints, auth fields, or classification rules
*/

use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::http::{GoxError, Result};

/// Base URL for the Mt. Gox API
const BASE_URL: &str = "https://mtgox.com";

/// Display name used in user-facing messages
pub const EXCHANGE_NAME: &str = "Mt. Gox";

const USER_AGENT: &str = "goxsh";

/// Error string the server uses for stale or wrong credentials. It is the
/// only error message with its own classification.
const NOT_LOGGED_IN: &str = "Not logged in.";

/// Per-operation endpoint paths
pub(crate) mod endpoints {
    pub const TICKER: &str = "/code/data/ticker.php";
    pub const BALANCE: &str = "/code/getFunds.php";
    pub const ORDERS: &str = "/code/getOrders.php";
    pub const BUY: &str = "/code/buyBTC.php";
    pub const SELL: &str = "/code/sellBTC.php";
    pub const CANCEL: &str = "/code/cancelOrder.php";
    pub const WITHDRAW: &str = "/code/withdraw.php";
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Credentials for authenticated requests
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Main HTTP client for the Mt. Gox trading API
#[derive(Debug)]
pub struct GoxClient {
    http: Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl GoxClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_url(config, BASE_URL)
    }

    /// Create a client pointed at an arbitrary base URL (mock servers in tests)
    pub fn with_config_and_base_url(config: ClientConfig, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            credentials: None,
        })
    }

    /// Store credentials for authenticated requests.
    ///
    /// Fails with `EmptyField` if either field is zero-length; prior
    /// credentials are kept in that case, so the update is all-or-nothing.
    pub fn set_credentials(&mut self, username: &str, password: &str) -> Result<()> {
        if username.is_empty() {
            return Err(GoxError::EmptyField("username"));
        }
        if password.is_empty() {
            return Err(GoxError::EmptyField("password"));
        }
        self.credentials = Some(Credentials {
            username: username.to_owned(),
            password: password.to_owned(),
        });
        Ok(())
    }

    /// Drop stored credentials. Idempotent.
    pub fn clear_credentials(&mut self) {
        self.credentials = None;
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }

    /// Username of the stored credentials, for the prompt
    pub fn username(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.username.as_str())
    }

    /// Fixed per-trade commission charged by the exchange
    pub fn commission(&self) -> Decimal {
        Decimal::new(65, 4)
    }

    pub fn exchange_name(&self) -> &'static str {
        EXCHANGE_NAME
    }

    /// Send one form-encoded POST and classify the JSON reply.
    ///
    /// Logical params keep their insertion order; `name`/`pass` are
    /// appended last for authenticated calls. Authenticated calls fail
    /// with `NoCredentials` before any network activity. No retries.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
        auth: bool,
    ) -> Result<T> {
        let mut form: Vec<(&str, &str)> = params.to_vec();
        if auth {
            let credentials = self.credentials.as_ref().ok_or(GoxError::NoCredentials)?;
            form.push(("name", &credentials.username));
            form.push(("pass", &credentials.password));
        }

        let url = self.base_url.join(endpoint)?;
        debug!(endpoint, auth, "sending request");

        let response = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?;

        let value: Value = response.json().await.map_err(|err| {
            if err.is_decode() {
                GoxError::UnexpectedResponse(err.to_string())
            } else {
                GoxError::Transport(err)
            }
        })?;

        classify(value)
    }
}

/// A reply carrying an `error` field is never a success payload, whatever
/// else it contains.
fn classify<T: DeserializeOwned>(value: Value) -> Result<T> {
    if let Some(error) = value.get("error") {
        let message = match error.as_str() {
            Some(text) => text.to_owned(),
            None => error.to_string(),
        };
        if message == NOT_LOGGED_IN {
            return Err(GoxError::LoginRejected);
        }
        return Err(GoxError::Api(message));
    }
    serde_json::from_value(value).map_err(|err| GoxError::UnexpectedResponse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Balance;
    use serde_json::json;

    #[test]
    fn classify_rejects_error_field_even_with_other_fields() {
        let value = json!({"btcs": "1", "usds": "2", "error": "Order too small"});
        match classify::<Balance>(value) {
            Err(GoxError::Api(message)) => assert_eq!(message, "Order too small"),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn classify_distinguishes_not_logged_in() {
        let value = json!({"error": "Not logged in.", "token": "x"});
        assert!(matches!(
            classify::<Balance>(value),
            Err(GoxError::LoginRejected)
        ));
    }

    #[test]
    fn classify_deserializes_success_payload() {
        let value = json!({"btcs": "1.5", "usds": "10.25"});
        let balance: Balance = classify(value).expect("balance should classify as success");
        assert_eq!(balance.btc.to_string(), "1.5");
        assert_eq!(balance.usd.to_string(), "10.25");
    }

    #[test]
    fn classify_maps_schema_mismatch_to_unexpected_response() {
        let value = json!({"btcs": true, "usds": "10.25"});
        assert!(matches!(
            classify::<Balance>(value),
            Err(GoxError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn set_credentials_is_atomic() {
        let mut client = GoxClient::new().expect("client init");
        client.set_credentials("alice", "hunter2").expect("set");
        let err = client.set_credentials("bob", "").expect_err("empty password");
        assert!(matches!(err, GoxError::EmptyField("password")));
        assert_eq!(client.username(), Some("alice"));
    }
}
