/*
[INPUT]:  Parsed adapter types (orders, balances, ticker)
[OUTPUT]: Human-readable display lines
[POS]:    Presentation layer - pure rendering functions
[UPDATE]: When display format changes
*/

use chrono::{Local, LocalResult, TimeZone};
use goxsh_adapter::{Balance, Order, OrderStatus, Ticker};
use std::fmt::Display;

/// One order per line:
/// `[2011-06-27 04:01:29] sell 9fb6e: 0.25BTC @ 17.5USD (dark)`
pub fn format_order(order: &Order) -> String {
    format_order_in(&Local, order)
}

fn format_order_in<Tz: TimeZone>(tz: &Tz, order: &Order) -> String
where
    Tz::Offset: Display,
{
    let mut annotations = Vec::new();
    if order.dark {
        annotations.push("dark");
    }
    if order.status == OrderStatus::InsufficientFunds {
        annotations.push("not enough funds");
    }
    let suffix = if annotations.is_empty() {
        String::new()
    } else {
        format!(" ({})", annotations.join(", "))
    };
    format!(
        "[{}] {} {}: {}BTC @ {}USD{}",
        timestamp_in(tz, order.date),
        order.kind.label(),
        order.oid,
        order.amount,
        order.price,
        suffix,
    )
}

fn timestamp_in<Tz: TimeZone>(tz: &Tz, seconds: i64) -> String
where
    Tz::Offset: Display,
{
    match tz.timestamp_opt(seconds, 0) {
        LocalResult::Single(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        // Out-of-range or DST-ambiguous instants fall back to the raw value.
        _ => seconds.to_string(),
    }
}

pub fn print_balance(balance: &Balance) {
    println!("BTC: {}", balance.btc);
    println!("USD: {}", balance.usd);
}

pub fn print_ticker(ticker: &Ticker) {
    println!("Last: {}", ticker.last);
    println!("Buy: {}", ticker.buy);
    println!("Sell: {}", ticker.sell);
    println!("High: {}", ticker.high);
    println!("Low: {}", ticker.low);
    println!("Volume: {}", ticker.vol);
}
