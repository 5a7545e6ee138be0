/*
[INPUT]:  Error sources (HTTP transport, server-reported failures, auth state)
[OUTPUT]: Structured error types, one variant per user-facing failure kind
[POS]:    Error handling layer - unified error type for the entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use thiserror::Error;

/// Main error type for the Mt. Gox adapter.
///
/// The shell inspects this exactly once per command to pick the single
/// line it prints, so every variant corresponds to one message kind.
#[derive(Error, Debug)]
pub enum GoxError {
    /// An authenticated operation was attempted with no stored credentials.
    /// Raised before any request is built or sent.
    #[error("no login credentials set")]
    NoCredentials,

    /// The server reported the literal "Not logged in." condition even
    /// though credentials were supplied. Stored credentials are kept as-is.
    #[error("the exchange rejected the login credentials")]
    LoginRejected,

    /// Any other server-reported error, message passed through verbatim.
    #[error("exchange error: {0}")]
    Api(String),

    /// Network or HTTP-layer failure, not classified further.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// A credential field was zero-length when setting credentials.
    #[error("empty {0}")]
    EmptyField(&'static str),

    /// Base URL could not be parsed at client construction.
    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The body was not JSON, or a success payload did not match the
    /// endpoint schema (e.g. an unrecognized order kind code).
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}

/// Result type alias for adapter operations
pub type Result<T> = std::result::Result<T, GoxError>;
