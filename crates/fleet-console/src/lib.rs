//! Operator console for a fleet of constrained devices.
//!
//! The console listens on a datagram socket for device traffic and reads
//! commands from stdin. Both sources are serviced by one single-threaded
//! [`Reactor`]: inbound datagrams are mapped to a [`Connection`] and handed to
//! the protocol [`Engine`], while operator lines are tokenised and routed
//! through a fixed command table that turns them into engine requests.
//! Outcomes, notifications and registration changes come back as
//! [`EngineEvent`]s and are printed asynchronously, each followed by a fresh
//! prompt.
//!
//! Startup follows [`bootstrap_with`]: configuration is loaded and validated,
//! structured telemetry is installed on stderr, and the socket is bound. Each
//! stage reports through a [`HealthReporter`] so failures surface as
//! structured events as well as on the terminal.
//!
//! The protocol engine itself lives behind the [`Engine`] trait. The binary
//! links [`OfflineEngine`], which keeps an empty device registry and refuses
//! every request.

mod bootstrap;
mod connections;
mod dispatch;
mod engine;
mod health;
mod output;
mod process;
mod reactor;
mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Console, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use connections::{Connection, ConnectionDirectory, ConnectionId};
pub use dispatch::{
    BARE_INTEGER_OBJECT, COMMANDS, CommandContext, CommandEntry, CommandError, FallbackParser,
    Handler, HandlerData, PathRequest, PayloadFallbacks, Reply, bare_integer, dispatch, lookup,
};
pub use engine::{Engine, EngineError, EngineEvent, Link, LinkError, OfflineEngine, Request};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use output::{PROMPT, deliver};
pub use process::{run_console, run_console_with};
pub use reactor::{
    MAX_LINE_LENGTH, OperatorInput, OperatorLine, Poller, Reactor, Readiness, SignalError,
    SystemPoller, Termination, TerminationToken, WAIT_CEILING, WaitError,
};
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{
    DatagramSocket, MAX_PACKET_SIZE, SocketLink, TransportError, bind_datagram_socket,
};

#[cfg(test)]
mod tests;
