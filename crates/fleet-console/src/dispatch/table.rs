//! The static command table.

use fleet_types::Operation;

use super::handlers;
use super::{CommandContext, CommandError, Reply};

/// Handler signature shared by every command.
///
/// Receives the text after the keyword and the entry's [`HandlerData`].
pub type Handler = fn(&mut CommandContext<'_>, &str, HandlerData) -> Result<Reply, CommandError>;

/// Requests that need nothing beyond a device and a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathRequest {
    /// `read`
    Read,
    /// `disc`
    Discover,
    /// `del`
    Delete,
    /// `observe`
    Observe,
    /// `cancel`
    CancelObserve,
}

impl PathRequest {
    /// Operation the request performs.
    #[must_use]
    pub const fn operation(self) -> Operation {
        match self {
            Self::Read => Operation::Read,
            Self::Discover => Operation::Discover,
            Self::Delete => Operation::Delete,
            Self::Observe => Operation::Observe,
            Self::CancelObserve => Operation::CancelObserve,
        }
    }
}

/// Per-entry data handed to the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerData {
    /// The handler needs nothing extra.
    None,
    /// Which path-only request to submit.
    Path(PathRequest),
    /// Whether a write is a partial update.
    Write {
        /// `true` for `update`.
        partial: bool,
    },
}

/// One command keyword and its handler.
#[derive(Debug)]
pub struct CommandEntry {
    /// Exact, case-sensitive keyword.
    pub keyword: &'static str,
    /// One-line description for `help`.
    pub summary: &'static str,
    /// Detailed usage for `help <keyword>`.
    pub help: Option<&'static str>,
    /// Argument parser and submitter.
    pub handler: Handler,
    /// Data passed to `handler`.
    pub data: HandlerData,
}

/// Commands in `help` order.
pub static COMMANDS: [CommandEntry; 14] = [
    CommandEntry {
        keyword: "list",
        summary: "List registered clients.",
        help: None,
        handler: handlers::list,
        data: HandlerData::None,
    },
    CommandEntry {
        keyword: "read",
        summary: "Read from a client.",
        help: Some(
            " read CLIENT# URI\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri to read such as /3, /3/0/2, /1024/11, /1024/0/1\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::path_request,
        data: HandlerData::Path(PathRequest::Read),
    },
    CommandEntry {
        keyword: "disc",
        summary: "Discover resources of a client.",
        help: Some(
            " disc CLIENT# URI\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri to discover such as /3, /3/0/2, /1024/11, /1024/0/1\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::path_request,
        data: HandlerData::Path(PathRequest::Discover),
    },
    CommandEntry {
        keyword: "write",
        summary: "Write to a client.",
        help: Some(
            " write CLIENT# URI DATA\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri to write to such as /3, /3/0/2, /1024/11, /1024/0/1\n   \
             DATA: data to write. Text or a supported structured format.\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::write,
        data: HandlerData::Write { partial: false },
    },
    CommandEntry {
        keyword: "update",
        summary: "Write to a client with partial update.",
        help: Some(
            " update CLIENT# URI DATA\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri to write to such as /3, /3/0/2, /1024/11, /1024/0/1\n   \
             DATA: data to write. Must be a supported structured format.\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::write,
        data: HandlerData::Write { partial: true },
    },
    CommandEntry {
        keyword: "time",
        summary: "Write time-related attributes to a client.",
        help: Some(
            " time CLIENT# URI PMIN PMAX\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri to write attributes to such as /3, /3/0/2, /1024/11, /1024/0/1\n   \
             PMIN: Minimum period\n   PMAX: Maximum period\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::time,
        data: HandlerData::None,
    },
    CommandEntry {
        keyword: "attr",
        summary: "Write value-related attributes to a client.",
        help: Some(
            " attr CLIENT# URI LT GT [STEP]\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri to write attributes to such as /3/0/2, /1024/0/1\n   \
             LT: \"Less than\" value\n   GT: \"Greater than\" value\n   STEP: \"Step\" value\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::attr,
        data: HandlerData::None,
    },
    CommandEntry {
        keyword: "clear",
        summary: "Clear attributes of a client.",
        help: Some(
            " clear CLIENT# URI\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri to clear attributes of such as /3, /3/0/2, /1024/11, /1024/0/1\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::clear,
        data: HandlerData::None,
    },
    CommandEntry {
        keyword: "exec",
        summary: "Execute a client resource.",
        help: Some(
            " exec CLIENT# URI [DATA]\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri of the resource to execute such as /3/0/2\n   \
             DATA: optional argument passed to the resource\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::exec,
        data: HandlerData::None,
    },
    CommandEntry {
        keyword: "del",
        summary: "Delete a client Object instance.",
        help: Some(
            " del CLIENT# URI\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri of the instance to delete such as /1024/11\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::path_request,
        data: HandlerData::Path(PathRequest::Delete),
    },
    CommandEntry {
        keyword: "create",
        summary: "Create an Object instance.",
        help: Some(
            " create CLIENT# URI DATA\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri to which create the Object Instance such as /1024, /1024/45\n   \
             DATA: data to initialize the new Object Instance (an integer for object 31024 \
             or any supported structured format)\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::create,
        data: HandlerData::None,
    },
    CommandEntry {
        keyword: "observe",
        summary: "Observe from a client.",
        help: Some(
            " observe CLIENT# URI\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri to observe such as /3, /3/0/2, /1024/11\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::path_request,
        data: HandlerData::Path(PathRequest::Observe),
    },
    CommandEntry {
        keyword: "cancel",
        summary: "Cancel an observe.",
        help: Some(
            " cancel CLIENT# URI\n   CLIENT#: client number as returned by command 'list'\n   \
             URI: uri on which to cancel an observe such as /3, /3/0/2, /1024/11\n\
             Result will be displayed asynchronously.",
        ),
        handler: handlers::path_request,
        data: HandlerData::Path(PathRequest::CancelObserve),
    },
    CommandEntry {
        keyword: "q",
        summary: "Quit the server.",
        help: None,
        handler: handlers::quit,
        data: HandlerData::None,
    },
];

/// Finds the entry for `keyword`.
#[must_use]
pub fn lookup(keyword: &str) -> Option<&'static CommandEntry> {
    COMMANDS.iter().find(|entry| entry.keyword == keyword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keywords_are_unique() {
        let keywords: HashSet<_> = COMMANDS.iter().map(|entry| entry.keyword).collect();
        assert_eq!(keywords.len(), COMMANDS.len());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("read").is_some());
        assert!(lookup("READ").is_none());
        assert!(lookup("help").is_none());
    }
}
