//! The console's single-threaded event loop.
//!
//! Each iteration steps the engine, prints any outcomes it produced, then
//! waits for the socket, operator input, or the engine's deadline, and
//! services exactly one ready source. When both are ready the socket goes
//! first; a steady datagram flood can therefore delay operator input.
//!
//! The termination token is checked once per iteration. On exit the engine is
//! closed, the socket is closed, and the connection directory is released,
//! in that order.

mod input;
mod poller;
mod termination;

use std::io::{self, Read, Write};
use std::sync::Arc;
use std::time::Duration;

use tracing::{Level, debug, error, info, trace, warn};

use crate::connections::ConnectionDirectory;
use crate::dispatch::{self, CommandContext, CommandError, PayloadFallbacks};
use crate::engine::Engine;
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::output::{self, PROMPT, render};
use crate::transport::{DatagramSocket, MAX_PACKET_SIZE, SocketLink};

pub use self::input::{MAX_LINE_LENGTH, OperatorInput, OperatorLine};
pub use self::poller::{Poller, Readiness, SystemPoller, WAIT_CEILING, WaitError};
pub use self::termination::{SignalError, Termination, TerminationToken};

pub(crate) const REACTOR_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::reactor");

/// Event loop owning the socket, the operator streams and the directory.
pub struct Reactor<E, S, P, R, W> {
    engine: E,
    socket: S,
    poller: P,
    input: OperatorInput<R>,
    out: W,
    directory: ConnectionDirectory,
    termination: TerminationToken,
    fallbacks: PayloadFallbacks,
    reporter: Arc<dyn HealthReporter>,
}

impl<E, S, P, R, W> Reactor<E, S, P, R, W>
where
    E: Engine,
    S: DatagramSocket,
    P: Poller,
    R: Read,
    W: Write,
{
    /// Assembles a reactor with a fresh termination token.
    pub fn new(engine: E, socket: S, poller: P, input: R, out: W) -> Self {
        Self {
            engine,
            socket,
            poller,
            input: OperatorInput::new(input),
            out,
            directory: ConnectionDirectory::new(),
            termination: TerminationToken::new(),
            fallbacks: PayloadFallbacks::default(),
            reporter: Arc::new(StructuredHealthReporter::new()),
        }
    }

    /// Replaces the termination token.
    #[must_use]
    pub fn with_termination(mut self, termination: TerminationToken) -> Self {
        self.termination = termination;
        self
    }

    /// Replaces the health reporter.
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn HealthReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replaces the `create` payload fallbacks.
    #[must_use]
    pub fn with_fallbacks(mut self, fallbacks: PayloadFallbacks) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    /// Token that stops the loop.
    #[must_use]
    pub const fn termination(&self) -> &TerminationToken {
        &self.termination
    }

    /// Runs until the termination token is raised, then shuts down.
    pub fn run(mut self) -> Termination {
        self.write_console(PROMPT);
        let termination = loop {
            if let Some(reason) = self.termination.reason() {
                break reason;
            }
            self.iterate();
        };
        self.shutdown(termination)
    }

    fn iterate(&mut self) {
        let deadline = self.step_engine();
        self.drain_events();
        let timeout = if self.input.has_line() {
            Duration::ZERO
        } else {
            deadline.min(WAIT_CEILING)
        };
        match self.poller.wait(timeout) {
            Ok(Readiness::Socket) => self.service_socket(),
            Ok(Readiness::Input) => self.service_input(true),
            Ok(Readiness::Idle) => {
                if self.input.has_line() {
                    self.service_input(false);
                }
            }
            Err(WaitError::Interrupted) => {}
            Err(error) => warn!(target: REACTOR_TARGET, error = %error, "wait failed"),
        }
    }

    fn step_engine(&mut self) -> Duration {
        let mut link = SocketLink::new(&self.socket, &self.directory);
        match self.engine.step(&mut link) {
            Ok(wait) => wait,
            Err(error) => {
                warn!(target: REACTOR_TARGET, error = %error, "engine step failed");
                WAIT_CEILING
            }
        }
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.engine.next_event() {
            if let Err(error) = output::deliver(&mut self.out, self.engine.devices(), &event) {
                warn!(target: REACTOR_TARGET, error = %error, "failed to print result");
            }
        }
    }

    fn service_socket(&mut self) {
        let mut buffer = [0_u8; MAX_PACKET_SIZE + 1];
        let (size, peer) = match self.socket.recv_from(&mut buffer) {
            Ok(received) => received,
            Err(error)
                if matches!(
                    error.kind(),
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                ) =>
            {
                return;
            }
            Err(error) => {
                warn!(target: REACTOR_TARGET, error = %error, "receive failed");
                return;
            }
        };
        if size > MAX_PACKET_SIZE {
            self.reporter.datagram_dropped(peer, size);
            return;
        }
        let Some(packet) = buffer.get(..size) else {
            return;
        };

        debug!(target: REACTOR_TARGET, bytes = size, peer = %peer, "datagram received");
        if tracing::enabled!(target: REACTOR_TARGET, Level::TRACE) {
            let mut dump = Vec::new();
            if render::write_hex_dump(&mut dump, packet).is_ok() {
                trace!(
                    target: REACTOR_TARGET,
                    "datagram contents\n{}",
                    String::from_utf8_lossy(&dump)
                );
            }
        }

        let (connection, created) = self.directory.resolve(peer);
        let connection = connection.clone();
        if created {
            self.reporter.connection_opened(&connection);
        }
        let mut link = SocketLink::new(&self.socket, &self.directory);
        self.engine.handle_packet(&connection, packet, &mut link);
    }

    fn service_input(&mut self, readable: bool) {
        if readable {
            if let Err(error) = self.input.fill() {
                error!(target: REACTOR_TARGET, error = %error, "operator input failed");
            }
        }
        match self.input.next_line() {
            Some(OperatorLine::Command(line)) => self.run_command(&line),
            Some(OperatorLine::Overlong) => {
                warn!(
                    target: REACTOR_TARGET,
                    limit = MAX_LINE_LENGTH,
                    "operator line too long"
                );
                self.write_console(&CommandError::Syntax.to_string());
                self.write_console("\n");
                self.write_console(PROMPT);
            }
            None if self.input.is_exhausted() => {
                info!(target: REACTOR_TARGET, "operator input closed");
                self.termination.quit();
            }
            None => {}
        }
    }

    fn run_command(&mut self, line: &str) {
        if !line.is_empty() {
            let mut context = CommandContext {
                engine: &mut self.engine,
                out: &mut self.out,
                termination: &self.termination,
                fallbacks: &self.fallbacks,
            };
            if let Err(error) = dispatch::dispatch(&mut context, line) {
                warn!(target: REACTOR_TARGET, error = %error, "failed to print command output");
            }
            self.write_console("\n");
        }
        if self.termination.is_raised() {
            self.write_console("\n");
        } else {
            self.write_console(PROMPT);
        }
    }

    fn write_console(&mut self, text: &str) {
        if let Err(error) = self
            .out
            .write_all(text.as_bytes())
            .and_then(|()| self.out.flush())
        {
            warn!(target: REACTOR_TARGET, error = %error, "failed to write console");
        }
    }

    fn shutdown(self, termination: Termination) -> Termination {
        let Self {
            mut engine,
            socket,
            poller,
            mut out,
            mut directory,
            reporter,
            ..
        } = self;
        engine.close(&mut SocketLink::new(&socket, &directory));
        drop(engine);
        drop(poller);
        drop(socket);
        let released = directory.release_all();
        if let Err(error) = out.flush() {
            warn!(target: REACTOR_TARGET, error = %error, "failed to flush console");
        }
        reporter.shutdown_completed(termination, released);
        termination
    }
}
