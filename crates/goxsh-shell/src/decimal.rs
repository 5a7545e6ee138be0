/*
[INPUT]:  Raw numeric strings typed by the operator
[OUTPUT]: Exact decimal amounts, rounded at the exchange's precisions
[POS]:    Money arithmetic - fixed-point helpers shared by the handlers
[UPDATE]: When precision or threshold rules change
*/

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use thiserror::Error;

/// BTC amounts carry 8 fractional digits, USD prices 5.
const BTC_SCALE: u32 = 8;
const USD_SCALE: u32 = 5;

/// A numeric argument did not parse as an exact decimal
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid number")]
pub struct InvalidNumber;

/// An order amount as typed: either a BTC quantity or a `$`-prefixed USD
/// notional to be converted at the order price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amount {
    Btc(Decimal),
    Usd(Decimal),
}

pub fn parse_decimal(raw: &str) -> Result<Decimal, InvalidNumber> {
    Decimal::from_str(raw).map_err(|_| InvalidNumber)
}

pub fn parse_amount(raw: &str) -> Result<Amount, InvalidNumber> {
    match raw.strip_prefix('$') {
        Some(usd) => parse_decimal(usd).map(Amount::Usd),
        None => parse_decimal(raw).map(Amount::Btc),
    }
}

/// Truncate toward zero to 8 fractional digits
pub fn round_btc(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(BTC_SCALE, RoundingStrategy::ToZero);
    rounded.rescale(BTC_SCALE);
    rounded
}

pub fn round_usd_down(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(USD_SCALE, RoundingStrategy::ToZero);
    rounded.rescale(USD_SCALE);
    rounded
}

pub fn round_usd_up(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(USD_SCALE, RoundingStrategy::AwayFromZero);
    rounded.rescale(USD_SCALE);
    rounded
}

/// Convert a USD notional to a BTC quantity at the given price, truncated
/// to the exchange's BTC precision. `None` when the price is not positive.
pub fn usd_to_btc(usd: Decimal, price: Decimal) -> Option<Decimal> {
    if price <= Decimal::ZERO {
        return None;
    }
    usd.checked_div(price).map(round_btc)
}

/// Price below which a position opened at `price` closes short at a
/// profit, after paying the commission on both trades.
pub fn short_threshold(price: Decimal, commission: Decimal) -> Decimal {
    round_usd_down(price * profit_ratio(commission))
}

/// Price above which a position opened at `price` closes long at a
/// profit, after paying the commission on both trades.
pub fn long_threshold(price: Decimal, commission: Decimal) -> Decimal {
    round_usd_up(price / profit_ratio(commission))
}

fn profit_ratio(commission: Decimal) -> Decimal {
    let kept = Decimal::ONE - commission;
    kept * kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn dec(raw: &str) -> Decimal {
        raw.parse().expect("test literal")
    }

    #[test]
    fn round_btc_truncates_instead_of_rounding_to_nearest() {
        assert_eq!(round_btc(dec("0.123456789")).to_string(), "0.12345678");
        assert_eq!(round_btc(dec("0.999999999")).to_string(), "0.99999999");
    }

    #[test]
    fn rounded_values_are_padded_to_full_scale() {
        assert_eq!(round_btc(dec("0.5")).to_string(), "0.50000000");
        assert_eq!(round_usd_down(dec("17")).to_string(), "17.00000");
    }

    #[rstest]
    #[case("1.234567", "1.23456", "1.23457")]
    #[case("1.23456", "1.23456", "1.23456")]
    fn usd_rounding_brackets_the_value(
        #[case] raw: &str,
        #[case] down: &str,
        #[case] up: &str,
    ) {
        assert_eq!(round_usd_down(dec(raw)).to_string(), down);
        assert_eq!(round_usd_up(dec(raw)).to_string(), up);
    }

    #[test]
    fn usd_notional_converts_at_the_given_price() {
        let btc = usd_to_btc(dec("50"), dec("100")).expect("positive price");
        assert_eq!(btc.to_string(), "0.50000000");
    }

    #[test]
    fn conversion_refuses_non_positive_prices() {
        assert_eq!(usd_to_btc(dec("50"), Decimal::ZERO), None);
        assert_eq!(usd_to_btc(dec("50"), dec("-1")), None);
    }

    #[rstest]
    #[case("$50", Amount::Usd(dec("50")))]
    #[case("$0.5", Amount::Usd(dec("0.5")))]
    #[case("0.25", Amount::Btc(dec("0.25")))]
    fn amounts_parse_with_and_without_the_dollar_prefix(
        #[case] raw: &str,
        #[case] expected: Amount,
    ) {
        assert_eq!(parse_amount(raw), Ok(expected));
    }

    #[rstest]
    #[case("$")]
    #[case("$12..5")]
    #[case("five")]
    #[case("")]
    fn malformed_amounts_are_invalid_numbers(#[case] raw: &str) {
        assert_eq!(parse_amount(raw), Err(InvalidNumber));
    }

    #[test]
    fn thresholds_match_the_commission_applied_twice() {
        let commission = dec("0.0065");
        assert_eq!(short_threshold(dec("100"), commission).to_string(), "98.70422");
        assert_eq!(long_threshold(dec("100"), commission).to_string(), "101.31279");
    }

    #[test]
    fn zero_commission_collapses_both_thresholds_to_the_price() {
        assert_eq!(short_threshold(dec("100"), Decimal::ZERO).to_string(), "100.00000");
        assert_eq!(long_threshold(dec("100"), Decimal::ZERO).to_string(), "100.00000");
    }
}
