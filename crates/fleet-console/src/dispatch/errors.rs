//! Errors a command can report to the operator.
//!
//! Every variant except [`CommandError::Output`] is printed on the console
//! and leaves the reactor running. None of them involve network I/O: argument
//! problems are caught before the engine is called, and engine refusals are
//! immediate.

use std::io;

use thiserror::Error;

use fleet_types::StatusCode;

/// Failure of one command line.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Arguments were missing, malformed, or followed by extra text.
    #[error("Syntax error !")]
    Syntax,
    /// A payload was well formed but not an acceptable value.
    #[error("Invalid value !")]
    InvalidValue,
    /// The engine refused the request before dispatch.
    #[error("Error: {0}")]
    Rejected(StatusCode),
    /// No command has this keyword.
    #[error("Unknown command. Type 'help' for help.")]
    UnknownCommand {
        /// Keyword as typed.
        keyword: String,
    },
    /// Writing to the console failed.
    #[error("failed to write console output: {0}")]
    Output(#[from] io::Error),
}

impl CommandError {
    /// Whether the error is reported to the operator rather than logged.
    #[must_use]
    pub const fn is_operator_facing(&self) -> bool {
        !matches!(self, Self::Output(_))
    }
}

impl From<StatusCode> for CommandError {
    fn from(status: StatusCode) -> Self {
        Self::Rejected(status)
    }
}
