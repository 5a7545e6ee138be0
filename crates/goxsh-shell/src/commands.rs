/*
[INPUT]:  Validated argument lists from the dispatcher
[OUTPUT]: Printed command results; typed errors for the loop boundary
[POS]:    Command layer - one handler per registered command
[UPDATE]: When command behavior changes
*/

use goxsh_adapter::OrderKind;
use rust_decimal::Decimal;

use crate::decimal::{self, Amount};
use crate::dispatch::{self, HandlerFuture};
use crate::error::{Result, ShellError};
use crate::format;
use crate::shell::Shell;

pub fn cmd_balance<'a>(shell: &'a mut Shell, _args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(async move {
        let balance = shell.client().get_balance().await?;
        format::print_balance(&balance);
        Ok(())
    })
}

pub fn cmd_buy<'a>(shell: &'a mut Shell, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(place(shell, OrderKind::Buy, args))
}

pub fn cmd_sell<'a>(shell: &'a mut Shell, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(place(shell, OrderKind::Sell, args))
}

pub fn cmd_cancel<'a>(shell: &'a mut Shell, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(async move {
        let kind = parse_kind(&args[0])?;
        let oid = &args[1];
        let remaining = shell.client().cancel_order(kind, oid).await?;
        println!("Canceled {} {}.", kind.label(), oid);
        if remaining.is_empty() {
            println!("No remaining orders.");
        } else {
            for order in &remaining {
                println!("{}", format::format_order(order));
            }
        }
        Ok(())
    })
}

pub fn cmd_exit<'a>(shell: &'a mut Shell, _args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(async move {
        shell.stop();
        Ok(())
    })
}

pub fn cmd_help<'a>(_shell: &'a mut Shell, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(async move {
        match args.first() {
            None => {
                for spec in dispatch::COMMANDS {
                    println!("{}", dispatch::help_text(spec));
                }
            }
            Some(name) => match dispatch::resolve(name) {
                Some(spec) => println!("{}", dispatch::help_text(spec)),
                None => println!("{name}: Unknown command."),
            },
        }
        Ok(())
    })
}

pub fn cmd_login<'a>(shell: &'a mut Shell, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(async move {
        let username = match args.first() {
            Some(username) => username.clone(),
            None => shell.prompt_username()?,
        };
        let password = shell.prompt_password()?;
        shell.client_mut().set_credentials(&username, &password)?;
        Ok(())
    })
}

pub fn cmd_logout<'a>(shell: &'a mut Shell, _args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(async move {
        shell.client_mut().clear_credentials();
        Ok(())
    })
}

pub fn cmd_orders<'a>(shell: &'a mut Shell, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(async move {
        let filter = match args.first() {
            Some(raw) => Some(parse_kind(raw)?),
            None => None,
        };
        let orders = shell.client().get_orders().await?;
        if orders.is_empty() {
            println!("No orders.");
            return Ok(());
        }
        for order in &orders {
            if filter.is_none_or(|kind| order.kind == kind) {
                println!("{}", format::format_order(order));
            }
        }
        Ok(())
    })
}

pub fn cmd_profit<'a>(shell: &'a mut Shell, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(async move {
        let raw = &args[0];
        let price = decimal::parse_decimal(raw).map_err(|_| ShellError::invalid("price", raw))?;
        if price.is_sign_negative() {
            return Err(ShellError::invalid("price", raw));
        }
        let commission = shell.client().commission();
        println!("Short: < {}", decimal::short_threshold(price, commission));
        println!("Long: > {}", decimal::long_threshold(price, commission));
        Ok(())
    })
}

pub fn cmd_ticker<'a>(shell: &'a mut Shell, _args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(async move {
        let ticker = shell.client().get_ticker().await?;
        format::print_ticker(&ticker);
        Ok(())
    })
}

pub fn cmd_withdraw<'a>(shell: &'a mut Shell, args: &'a [String]) -> HandlerFuture<'a> {
    Box::pin(async move {
        let address = &args[0];
        let raw_amount = &args[1];
        let amount =
            decimal::parse_decimal(raw_amount).map_err(|_| ShellError::invalid("amount", raw_amount))?;
        if amount <= Decimal::ZERO {
            return Err(ShellError::invalid("amount", raw_amount));
        }
        let info = shell.client().withdraw(address, raw_amount).await?;
        println!("{}", info.status);
        println!("Updated balance:");
        format::print_balance(&info.balance);
        Ok(())
    })
}

/// Shared body of buy and sell: resolve the typed amount ($-notional or
/// BTC), then place the order and echo the server's status segments.
async fn place(shell: &mut Shell, kind: OrderKind, args: &[String]) -> Result<()> {
    let raw_amount = &args[0];
    let raw_price = &args[1];

    let price =
        decimal::parse_decimal(raw_price).map_err(|_| ShellError::invalid("price", raw_price))?;
    if price <= Decimal::ZERO {
        return Err(ShellError::invalid("price", raw_price));
    }

    let amount = match decimal::parse_amount(raw_amount)
        .map_err(|_| ShellError::invalid("amount", raw_amount))?
    {
        Amount::Btc(btc) if btc > Decimal::ZERO => btc.to_string(),
        Amount::Usd(usd) if usd > Decimal::ZERO => decimal::usd_to_btc(usd, price)
            .ok_or_else(|| ShellError::invalid("price", raw_price))?
            .to_string(),
        _ => return Err(ShellError::invalid("amount", raw_amount)),
    };

    let placed = shell.client().place_order(kind, &amount, raw_price).await?;
    for line in placed.status.split("<br>").filter(|segment| !segment.is_empty()) {
        println!("{line}");
    }
    for order in &placed.orders {
        println!("{}", format::format_order(order));
    }
    Ok(())
}

fn parse_kind(raw: &str) -> Result<OrderKind> {
    raw.parse()
        .map_err(|_| ShellError::invalid("order kind", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_words_parse_case_tolerantly() {
        assert!(matches!(parse_kind("buy"), Ok(OrderKind::Buy)));
        assert!(matches!(parse_kind("Sell"), Ok(OrderKind::Sell)));
    }

    #[test]
    fn bad_kind_word_reports_the_input() {
        let err = parse_kind("hold").expect_err("not a kind");
        assert_eq!(err.to_string(), "hold: Invalid order kind.");
    }
}
