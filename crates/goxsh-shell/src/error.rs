/*
[INPUT]:  Failure conditions raised by handlers and the dispatcher
[OUTPUT]: One error kind per user-facing message
[POS]:    Error handling layer - shell-side error type
[UPDATE]: When adding new failure kinds
*/

use goxsh_adapter::GoxError;
use thiserror::Error;

/// Everything a command can fail with. The shell loop matches on this
/// once per command to print a single line.
#[derive(Error, Debug)]
pub enum ShellError {
    /// Invalid argument content (bad order kind, malformed number);
    /// the message is printed as-is.
    #[error("{0}")]
    Command(String),

    /// Argument count outside the command's declared range
    #[error("{0}")]
    Arity(String),

    /// Ctrl-C during an interactive prompt
    #[error("interrupted")]
    Interrupted,

    /// Failure reported by the exchange client
    #[error(transparent)]
    Client(#[from] GoxError),
}

pub type Result<T> = std::result::Result<T, ShellError>;

impl ShellError {
    pub fn invalid(noun: &str, raw: &str) -> Self {
        ShellError::Command(format!("{raw}: Invalid {noun}."))
    }
}
