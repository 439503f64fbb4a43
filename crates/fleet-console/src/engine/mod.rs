//! Seam between the console and a device-management protocol engine.
//!
//! The engine owns the wire protocol, the registration state machine and the
//! device registry. The console drives it from the reactor: it calls
//! [`Engine::step`] once per iteration, hands it every accepted datagram, and
//! submits operator requests through [`Engine::submit`]. Submission only
//! queues work; outcomes surface later as [`EngineEvent`] values that the
//! reactor drains on the same thread, so the registry and the connection
//! directory only ever have a single writer.

mod offline;

use std::io;
use std::time::Duration;

use thiserror::Error;

use fleet_types::{
    AttributeSet, DataRecord, DeviceId, DeviceRegistry, MediaFormat, Operation, Payload,
    StatusCode, Uri,
};

use crate::connections::{Connection, ConnectionId};

pub use self::offline::OfflineEngine;

pub(crate) const ENGINE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::engine");

/// Request submitted to one device.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Read the value at `uri`.
    Read {
        /// Target path.
        uri: Uri,
    },
    /// Discover attributes and sub-paths below `uri`.
    Discover {
        /// Target path.
        uri: Uri,
    },
    /// Replace, or partially update, the value at `uri`.
    Write {
        /// Target path.
        uri: Uri,
        /// Encoded or raw value.
        payload: Payload,
        /// Whether the write is a partial update.
        partial: bool,
    },
    /// Set or clear observation attributes on `uri`.
    WriteAttributes {
        /// Target path.
        uri: Uri,
        /// Attribute update.
        attributes: AttributeSet,
    },
    /// Execute the resource at `uri`.
    Execute {
        /// Target path.
        uri: Uri,
        /// Optional execution argument.
        argument: Option<String>,
    },
    /// Create an object instance below `uri`.
    Create {
        /// Object path.
        uri: Uri,
        /// Records describing the new instance.
        records: Vec<DataRecord>,
    },
    /// Delete the object instance at `uri`.
    Delete {
        /// Target path.
        uri: Uri,
    },
    /// Start observing `uri`.
    Observe {
        /// Target path.
        uri: Uri,
    },
    /// Stop observing `uri`.
    CancelObserve {
        /// Target path.
        uri: Uri,
    },
}

impl Request {
    /// Operation this request performs.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        match self {
            Self::Read { .. } => Operation::Read,
            Self::Discover { .. } => Operation::Discover,
            Self::Write { .. } => Operation::Write,
            Self::WriteAttributes { .. } => Operation::WriteAttributes,
            Self::Execute { .. } => Operation::Execute,
            Self::Create { .. } => Operation::Create,
            Self::Delete { .. } => Operation::Delete,
            Self::Observe { .. } => Operation::Observe,
            Self::CancelObserve { .. } => Operation::CancelObserve,
        }
    }

    /// Path the request targets.
    #[must_use]
    pub const fn uri(&self) -> &Uri {
        match self {
            Self::Read { uri }
            | Self::Discover { uri }
            | Self::Write { uri, .. }
            | Self::WriteAttributes { uri, .. }
            | Self::Execute { uri, .. }
            | Self::Create { uri, .. }
            | Self::Delete { uri }
            | Self::Observe { uri }
            | Self::CancelObserve { uri } => uri,
        }
    }
}

/// Outcome reported by the engine after submission.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A submitted operation completed.
    OperationResult {
        /// Device the operation targeted.
        device: DeviceId,
        /// Path the operation targeted.
        uri: Uri,
        /// Status returned by the device.
        status: StatusCode,
        /// Content format of `payload`.
        format: MediaFormat,
        /// Response body, possibly empty.
        payload: Vec<u8>,
    },
    /// An observed path reported a new value.
    Notification {
        /// Observed device.
        device: DeviceId,
        /// Observed path.
        uri: Uri,
        /// Per-subscription sequence number.
        count: u32,
        /// Content format of `payload`.
        format: MediaFormat,
        /// Notification body, possibly empty.
        payload: Vec<u8>,
    },
    /// A device registered, updated its registration, or deregistered.
    ///
    /// `Created`, `Changed` and `Deleted` are the recognised statuses.
    Registration {
        /// Device whose registration changed.
        device: DeviceId,
        /// Registration status.
        status: StatusCode,
    },
}

/// Outbound datagram path the engine uses to reach devices.
pub trait Link {
    /// Sends one datagram to the peer behind `connection`.
    fn send(&mut self, connection: ConnectionId, datagram: &[u8]) -> Result<(), LinkError>;
}

/// Errors raised while sending through a [`Link`].
#[derive(Debug, Error)]
pub enum LinkError {
    /// The connection is not in the directory.
    #[error("unknown connection {connection}")]
    UnknownConnection {
        /// Requested connection.
        connection: ConnectionId,
    },
    /// The socket refused the datagram.
    #[error("failed to send datagram: {source}")]
    Send {
        /// Underlying socket error.
        #[source]
        source: io::Error,
    },
}

/// Errors raised by the engine's periodic step.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The step failed with an engine-specific code.
    #[error("engine step failed with code {code:#x}")]
    Step {
        /// Engine-specific failure code.
        code: u32,
    },
    /// The step could not reach the network.
    #[error("engine step could not send: {0}")]
    Link(#[from] LinkError),
}

/// Device-management protocol engine driven by the console reactor.
pub trait Engine {
    /// Performs periodic maintenance and returns how long the reactor may wait
    /// before the next call.
    fn step(&mut self, link: &mut dyn Link) -> Result<Duration, EngineError>;

    /// Processes one inbound datagram from `connection`.
    fn handle_packet(&mut self, connection: &Connection, packet: &[u8], link: &mut dyn Link);

    /// Registered devices.
    fn devices(&self) -> &DeviceRegistry;

    /// Decodes operator text into structured records for `uri`.
    ///
    /// Returns no records when the text is not in a supported structured
    /// format.
    fn parse_records(&self, uri: &Uri, text: &str) -> Vec<DataRecord>;

    /// Queues `request` for `device`.
    ///
    /// # Errors
    ///
    /// Returns the status explaining why the request was refused before
    /// dispatch, such as [`StatusCode::NotFound`] for an unknown device.
    fn submit(&mut self, device: DeviceId, request: Request) -> Result<(), StatusCode>;

    /// Takes the next pending outcome, if any.
    fn next_event(&mut self) -> Option<EngineEvent>;

    /// Releases engine state. Called once, before the socket closes.
    fn close(&mut self, link: &mut dyn Link);
}
