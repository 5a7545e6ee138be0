/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with deserialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use rust_decimal::Decimal;
use serde::Deserialize;

use super::enums::{OrderKind, OrderStatus};

/// An open order as reported by the server. Parsed only from API
/// responses, never constructed locally.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub oid: String,
    #[serde(rename = "type")]
    pub kind: OrderKind,
    #[serde(deserialize_with = "serde_helpers::decimal_flexible")]
    pub amount: Decimal,
    #[serde(deserialize_with = "serde_helpers::decimal_flexible")]
    pub price: Decimal,
    /// Seconds since epoch
    #[serde(deserialize_with = "serde_helpers::epoch_seconds")]
    pub date: i64,
    /// Hidden from the public order book. Absent means false.
    #[serde(default, deserialize_with = "serde_helpers::flag")]
    pub dark: bool,
    #[serde(default)]
    pub status: OrderStatus,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Balance {
    #[serde(rename = "btcs", deserialize_with = "serde_helpers::decimal_flexible")]
    pub btc: Decimal,
    #[serde(rename = "usds", deserialize_with = "serde_helpers::decimal_flexible")]
    pub usd: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ticker {
    #[serde(deserialize_with = "serde_helpers::decimal_flexible")]
    pub last: Decimal,
    #[serde(deserialize_with = "serde_helpers::decimal_flexible")]
    pub buy: Decimal,
    #[serde(deserialize_with = "serde_helpers::decimal_flexible")]
    pub sell: Decimal,
    #[serde(deserialize_with = "serde_helpers::decimal_flexible")]
    pub high: Decimal,
    #[serde(deserialize_with = "serde_helpers::decimal_flexible")]
    pub low: Decimal,
    #[serde(deserialize_with = "serde_helpers::decimal_flexible")]
    pub vol: Decimal,
}

mod serde_helpers {
    use super::Decimal;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;
    use std::str::FromStr;

    /// The server is inconsistent about quoting numbers; accept both.
    pub fn decimal_flexible<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::String(raw) => Decimal::from_str(raw.trim()).map_err(serde::de::Error::custom),
            Value::Number(n) => Decimal::from_str(&n.to_string()).map_err(serde::de::Error::custom),
            _ => Err(serde::de::Error::custom("expected a decimal string or number")),
        }
    }

    pub fn epoch_seconds<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| serde::de::Error::custom("timestamp out of range")),
            Value::String(raw) => raw.parse().map_err(serde::de::Error::custom),
            _ => Err(serde::de::Error::custom("expected an epoch timestamp")),
        }
    }

    /// Boolean flags arrive as "0"/"1" strings, bare numbers, or booleans.
    pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Bool(b) => Ok(*b),
            Value::Number(n) => Ok(n.as_i64().unwrap_or(0) != 0),
            Value::String(raw) => {
                let parsed: i64 = raw.parse().map_err(serde::de::Error::custom)?;
                Ok(parsed != 0)
            }
            _ => Err(serde::de::Error::custom("expected a flag value")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn order_deserializes_full_record() {
        let value = json!({
            "oid": "9fb6e",
            "type": "Sell",
            "amount": "0.25",
            "price": 17.5,
            "date": "1309140089",
            "dark": "1",
            "status": "2",
        });

        let order: Order = serde_json::from_value(value).expect("order should deserialize");

        assert_eq!(order.oid, "9fb6e");
        assert_eq!(order.kind, OrderKind::Sell);
        assert_eq!(order.amount.to_string(), "0.25");
        assert_eq!(order.price.to_string(), "17.5");
        assert_eq!(order.date, 1_309_140_089);
        assert!(order.dark);
        assert_eq!(order.status, OrderStatus::InsufficientFunds);
    }

    #[test]
    fn order_defaults_dark_and_status_when_absent() {
        let value = json!({
            "oid": "9fb6e",
            "type": 2,
            "amount": "0.25",
            "price": "17.5",
            "date": 1309140089,
        });

        let order: Order = serde_json::from_value(value).expect("order should deserialize");

        assert!(!order.dark);
        assert_eq!(order.status, OrderStatus::Active);
    }

    #[test]
    fn order_rejects_unknown_kind_code() {
        let value = json!({
            "oid": "9fb6e",
            "type": 7,
            "amount": "0.25",
            "price": "17.5",
            "date": 1309140089,
        });

        assert!(serde_json::from_value::<Order>(value).is_err());
    }

    #[test]
    fn balance_maps_wire_field_names() {
        let balance: Balance =
            serde_json::from_value(json!({"btcs": "1.00000000", "usds": 250})).expect("balance");
        assert_eq!(balance.btc.to_string(), "1.00000000");
        assert_eq!(balance.usd.to_string(), "250");
    }

    #[test]
    fn ticker_accepts_mixed_number_forms() {
        let ticker: Ticker = serde_json::from_value(json!({
            "last": "17.5", "buy": 17.4, "sell": "17.6",
            "high": 18, "low": "16.9", "vol": 35921,
        }))
        .expect("ticker");
        assert_eq!(ticker.buy.to_string(), "17.4");
        assert_eq!(ticker.low.to_string(), "16.9");
    }
}
