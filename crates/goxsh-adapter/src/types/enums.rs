/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with deserialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Order side. The wire carries it as the numeric code `1`/`2` or the
/// capitalized word `"Sell"`/`"Buy"`; anything else is a schema error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    Sell,
    Buy,
}

impl OrderKind {
    /// Numeric code the server expects in request parameters
    pub fn code(self) -> u8 {
        match self {
            OrderKind::Sell => 1,
            OrderKind::Buy => 2,
        }
    }

    /// Lowercase word used in rendered output
    pub fn label(self) -> &'static str {
        match self {
            OrderKind::Sell => "sell",
            OrderKind::Buy => "buy",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A typed order kind argument did not parse
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized order kind")]
pub struct ParseKindError;

impl FromStr for OrderKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sell" | "Sell" => Ok(OrderKind::Sell),
            "buy" | "Buy" => Ok(OrderKind::Buy),
            _ => Err(ParseKindError),
        }
    }
}

impl<'de> Deserialize<'de> for OrderKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::Number(n) if n.as_u64() == Some(1) => Ok(OrderKind::Sell),
            Value::Number(n) if n.as_u64() == Some(2) => Ok(OrderKind::Buy),
            Value::String(s) if s == "Sell" => Ok(OrderKind::Sell),
            Value::String(s) if s == "Buy" => Ok(OrderKind::Buy),
            other => Err(de::Error::custom(format!(
                "unrecognized order kind code: {other}"
            ))),
        }
    }
}

/// Order status reported by the server: `"2"` (or `2`) marks an order the
/// account cannot currently fund. A missing field means active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Active,
    InsufficientFunds,
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let insufficient = match &value {
            Value::String(s) => s == "2",
            Value::Number(n) => n.as_u64() == Some(2),
            _ => false,
        };
        Ok(if insufficient {
            OrderStatus::InsufficientFunds
        } else {
            OrderStatus::Active
        })
    }
}
