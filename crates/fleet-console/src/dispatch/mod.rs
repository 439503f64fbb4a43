//! Operator command dispatch.
//!
//! A command line is split into a keyword and its arguments. The keyword is
//! looked up in the static [`COMMANDS`] table and the matching handler parses
//! the arguments, validates them, and submits a request to the engine. A
//! handler never waits for the device: `OK` means the engine accepted the
//! request, and the outcome arrives later through the output module.
//!
//! `help` is answered here rather than from the table.

mod errors;
mod fallback;
mod handlers;
pub mod lexer;
mod table;

use std::io::{self, Write};

use tracing::debug;

use crate::engine::Engine;
use crate::reactor::TerminationToken;

pub use self::errors::CommandError;
pub use self::fallback::{BARE_INTEGER_OBJECT, FallbackParser, PayloadFallbacks, bare_integer};
pub use self::table::{COMMANDS, CommandEntry, Handler, HandlerData, PathRequest, lookup};

pub(crate) const DISPATCH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::dispatch");

/// What a handler did with a well-formed command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// The engine accepted a request; the dispatcher prints `OK`.
    Accepted,
    /// The handler finished and printed anything it needed to.
    Done,
}

/// Collaborators a handler may touch.
pub struct CommandContext<'a> {
    /// Protocol engine receiving requests.
    pub engine: &'a mut dyn Engine,
    /// Console output.
    pub out: &'a mut dyn Write,
    /// Flag raised by `q`.
    pub termination: &'a TerminationToken,
    /// Payload conventions for `create`.
    pub fallbacks: &'a PayloadFallbacks,
}

/// Runs one command line and prints its immediate outcome.
///
/// Blank lines do nothing. Operator mistakes and engine refusals are printed;
/// only failures to write the console are returned.
///
/// # Errors
///
/// Returns the I/O error raised while writing to the console.
pub fn dispatch(context: &mut CommandContext<'_>, line: &str) -> io::Result<()> {
    let Some((keyword, rest)) = lexer::next_argument(line) else {
        return Ok(());
    };
    let outcome = if keyword == "help" {
        handlers::help(context.out, rest)
    } else {
        match lookup(keyword) {
            Some(entry) => (entry.handler)(context, rest, entry.data),
            None => Err(CommandError::UnknownCommand {
                keyword: keyword.to_owned(),
            }),
        }
    };
    debug!(
        target: DISPATCH_TARGET,
        keyword,
        outcome = ?outcome,
        "command dispatched"
    );
    match outcome {
        Ok(Reply::Accepted) => write!(context.out, "OK"),
        Ok(Reply::Done) => Ok(()),
        Err(CommandError::Output(error)) => Err(error),
        Err(error) => write!(context.out, "{error}"),
    }
}
