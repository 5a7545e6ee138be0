/*
[INPUT]:  Public API exports for the goxsh shell crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod commands;
pub mod decimal;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod shell;

// Re-export main types for convenience
pub use error::{Result, ShellError};
pub use shell::Shell;
