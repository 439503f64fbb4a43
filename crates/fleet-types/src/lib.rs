//! Shared data model for the fleet management console.
//!
//! These types describe what the console and a device-management protocol
//! engine exchange: hierarchical resource paths, response status codes,
//! registered device records, observation attribute updates, and structured
//! data records. None of them perform I/O; the protocol engine owns the wire
//! encoding and the console only renders and validates.

mod attributes;
mod data;
mod device;
mod operation;
mod status;
mod uri;

pub use attributes::{AttributeKind, AttributeSet};
pub use data::{DataRecord, DataValue, MediaFormat, Payload};
pub use device::{
    Binding, BindingSet, Device, DeviceId, DeviceRegistry, ObjectEntry, ProtocolVersion,
};
pub use operation::Operation;
pub use status::StatusCode;
pub use uri::{MAX_ID, Uri, UriParseError};
