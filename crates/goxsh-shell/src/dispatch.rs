/*
[INPUT]:  Command names and argument lists typed at the prompt
[OUTPUT]: Resolved handlers, arity verdicts, completions, and help text
[POS]:    Dispatch layer - static command registry
[UPDATE]: When commands are added or their contracts change
*/

use std::future::Future;
use std::pin::Pin;

use crate::commands;
use crate::error::{Result, ShellError};
use crate::shell::Shell;

pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;

/// Command implementation: borrows the shell and the raw arguments for
/// the duration of one invocation.
pub type Handler = for<'a> fn(&'a mut Shell, &'a [String]) -> HandlerFuture<'a>;

/// One positional parameter in a command's contract
pub struct ParamSpec {
    pub name: &'static str,
    /// `None` marks a required parameter. `Some("")` is optional with no
    /// displayable default; a non-empty default shows up in help output.
    pub default: Option<&'static str>,
}

const fn req(name: &'static str) -> ParamSpec {
    ParamSpec { name, default: None }
}

const fn opt(name: &'static str) -> ParamSpec {
    ParamSpec { name, default: Some("") }
}

/// A registered command: name, handler, arity contract, parameter
/// metadata, and documentation. The table is built once and never
/// mutated; there is no runtime discovery.
pub struct CommandSpec {
    pub name: &'static str,
    pub params: &'static [ParamSpec],
    pub min_args: usize,
    /// `None` means unbounded
    pub max_args: Option<usize>,
    pub doc: &'static str,
    pub handler: Handler,
}

/// The full registration set, sorted by name
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "balance",
        params: &[],
        min_args: 0,
        max_args: Some(0),
        doc: "Display account balance.",
        handler: commands::cmd_balance,
    },
    CommandSpec {
        name: "buy",
        params: &[req("amount"), req("price")],
        min_args: 2,
        max_args: Some(2),
        doc: "Buy bitcoins.\nPrefix the amount with a '$' to spend that many USD and calculate the\nBTC amount automatically.",
        handler: commands::cmd_buy,
    },
    CommandSpec {
        name: "cancel",
        params: &[req("kind"), req("order_id")],
        min_args: 2,
        max_args: Some(2),
        doc: "Cancel the order with the specified kind (buy or sell) and order ID.",
        handler: commands::cmd_cancel,
    },
    CommandSpec {
        name: "exit",
        params: &[],
        min_args: 0,
        max_args: Some(0),
        doc: "Exit goxsh.",
        handler: commands::cmd_exit,
    },
    CommandSpec {
        name: "help",
        params: &[opt("command")],
        min_args: 0,
        max_args: Some(1),
        doc: "Show help for the specified command or list all commands if none is\ngiven.",
        handler: commands::cmd_help,
    },
    CommandSpec {
        name: "login",
        params: &[opt("username")],
        min_args: 0,
        max_args: Some(1),
        doc: "Set login credentials.",
        handler: commands::cmd_login,
    },
    CommandSpec {
        name: "logout",
        params: &[],
        min_args: 0,
        max_args: Some(0),
        doc: "Unset login credentials.",
        handler: commands::cmd_logout,
    },
    CommandSpec {
        name: "orders",
        params: &[opt("kind")],
        min_args: 0,
        max_args: Some(1),
        doc: "List open orders.\nSpecifying a kind (buy or sell) will list only orders of that kind.",
        handler: commands::cmd_orders,
    },
    CommandSpec {
        name: "profit",
        params: &[req("price")],
        min_args: 1,
        max_args: Some(1),
        doc: "Calculate profitable short/long prices for a given initial price,\ntaking the exchange's commission fee into account.",
        handler: commands::cmd_profit,
    },
    CommandSpec {
        name: "sell",
        params: &[req("amount"), req("price")],
        min_args: 2,
        max_args: Some(2),
        doc: "Sell bitcoins.\nPrefix the amount with a '$' to receive that many USD and calculate the\nBTC amount automatically.",
        handler: commands::cmd_sell,
    },
    CommandSpec {
        name: "ticker",
        params: &[],
        min_args: 0,
        max_args: Some(0),
        doc: "Display ticker.",
        handler: commands::cmd_ticker,
    },
    CommandSpec {
        name: "withdraw",
        params: &[req("address"), req("amount")],
        min_args: 2,
        max_args: Some(2),
        doc: "Withdraw bitcoins.",
        handler: commands::cmd_withdraw,
    },
];

/// Exact, case-sensitive lookup. A miss is not an error: the caller takes
/// the unknown-command path, which ignores arguments and never fails.
pub fn resolve(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Sorted registered names starting with the prefix
pub fn complete(prefix: &str) -> Vec<&'static str> {
    COMMANDS
        .iter()
        .map(|spec| spec.name)
        .filter(|name| name.starts_with(prefix))
        .collect()
}

/// Accept iff `min <= got` and (`max` unbounded or `got <= max`)
pub fn check_arity(spec: &CommandSpec, got: usize) -> std::result::Result<(), ShellError> {
    let within_max = spec.max_args.is_none_or(|max| got <= max);
    if spec.min_args <= got && within_max {
        Ok(())
    } else {
        Err(arity_error(spec.min_args, spec.max_args, got))
    }
}

fn arity_error(min: usize, max: Option<usize>, got: usize) -> ShellError {
    let range = match max {
        Some(max) if max == min => min.to_string(),
        Some(max) => format!("{min}-{max}"),
        None => format!("{min}+"),
    };
    let noun = if range == "1" { "argument" } else { "arguments" };
    ShellError::Arity(format!("Expected {range} {noun}, got {got}"))
}

/// Usage line: required parameters bare, optional ones bracketed, with a
/// non-empty default shown inline.
pub fn usage(spec: &CommandSpec) -> String {
    let mut line = spec.name.to_string();
    for param in spec.params {
        match param.default {
            None => {
                line.push(' ');
                line.push_str(param.name);
            }
            Some(default) if !default.is_empty() => {
                line.push_str(&format!(" [{}={}]", param.name, default));
            }
            Some(_) => {
                line.push_str(&format!(" [{}]", param.name));
            }
        }
    }
    line
}

/// Usage line followed by the doc paragraph, indented and verbatim
pub fn help_text(spec: &CommandSpec) -> String {
    let mut text = usage(spec);
    for line in spec.doc.lines() {
        text.push_str("\n    ");
        text.push_str(line);
    }
    text
}
