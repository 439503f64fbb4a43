//! Console bootstrap orchestration.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, UdpSocket};
use std::os::fd::AsFd;
use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use fleet_config::{Config, ConfigError};

use crate::engine::Engine;
use crate::health::HealthReporter;
use crate::reactor::{Reactor, SignalError, SystemPoller, Termination, TerminationToken};
use crate::telemetry::{self, TelemetryError, TelemetryHandle};
use crate::transport::{self, TransportError};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the console configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps `config`.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        /// Underlying loader error.
        #[source]
        source: Arc<OrthoError>,
    },
    /// Configuration loaded but holds an unusable value.
    #[error("invalid configuration: {source}")]
    Validation {
        /// Rejected value.
        #[source]
        source: ConfigError,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        /// Underlying telemetry error.
        #[source]
        source: TelemetryError,
    },
    /// The datagram socket could not be opened.
    #[error("failed to open console socket: {source}")]
    Transport {
        /// Underlying socket error.
        #[source]
        source: TransportError,
    },
    /// The interrupt handler could not be installed.
    #[error(transparent)]
    Signal(#[from] SignalError),
    /// The readiness poller could not be created.
    #[error("failed to prepare readiness polling: {source}")]
    Poller {
        /// Underlying descriptor error.
        #[source]
        source: io::Error,
    },
}

/// Result of a successful bootstrap invocation.
pub struct Console {
    config: Config,
    socket: UdpSocket,
    local_addr: SocketAddr,
    termination: TerminationToken,
    telemetry: TelemetryHandle,
    reporter: Arc<dyn HealthReporter>,
}

impl Console {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Address the socket is bound to.
    #[must_use]
    pub const fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Token that stops the console once raised.
    #[must_use]
    pub const fn termination(&self) -> &TerminationToken {
        &self.termination
    }

    /// Accessor for the telemetry handle, primarily useful for testing.
    #[must_use]
    pub const fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }

    /// Installs the interrupt handler on this console's token.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Signal`] when the handler cannot be
    /// installed.
    pub fn register_interrupt(&self) -> Result<(), BootstrapError> {
        self.termination.register_interrupt().map_err(|error| {
            let error = BootstrapError::from(error);
            self.reporter.bootstrap_failed(&error);
            error
        })
    }

    /// Runs the event loop over `input` and `out` until termination.
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Poller`] when readiness polling cannot be
    /// set up for the socket and `input`.
    pub fn serve<E, R, W>(self, engine: E, input: R, out: W) -> Result<Termination, BootstrapError>
    where
        E: Engine,
        R: Read + AsFd,
        W: Write,
    {
        let poller = match SystemPoller::new(&self.socket, &input) {
            Ok(poller) => poller,
            Err(source) => {
                let error = BootstrapError::Poller { source };
                self.reporter.bootstrap_failed(&error);
                return Err(error);
            }
        };
        let reactor = Reactor::new(engine, self.socket, poller, input, out)
            .with_termination(self.termination)
            .with_reporter(self.reporter);
        Ok(reactor.run())
    }
}

/// Bootstraps the console using the supplied collaborators.
///
/// Loads and validates configuration, installs telemetry, then binds the
/// datagram socket. Every failure is passed to the reporter before it is
/// returned.
///
/// # Errors
///
/// Returns the first [`BootstrapError`] encountered.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: Arc<dyn HealthReporter>,
) -> Result<Console, BootstrapError> {
    reporter.bootstrap_starting();

    let fail = |error: BootstrapError| {
        reporter.bootstrap_failed(&error);
        error
    };

    let config = loader
        .load()
        .map_err(|source| fail(BootstrapError::Configuration { source }))?;
    let addr = config
        .validate()
        .and_then(|()| config.listen_address())
        .map_err(|source| fail(BootstrapError::Validation { source }))?;
    let telemetry = telemetry::initialise(&config)
        .map_err(|source| fail(BootstrapError::Telemetry { source }))?;
    let socket = transport::bind_datagram_socket(addr)
        .map_err(|source| fail(BootstrapError::Transport { source }))?;
    let local_addr = socket.local_addr().map_err(|source| {
        fail(BootstrapError::Transport {
            source: TransportError::Bind { addr, source },
        })
    })?;

    reporter.bootstrap_succeeded(&config, local_addr);
    Ok(Console {
        config,
        socket,
        local_addr,
        termination: TerminationToken::new(),
        telemetry,
        reporter,
    })
}
