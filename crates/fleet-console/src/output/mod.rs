//! Asynchronous result delivery.
//!
//! The reactor drains [`EngineEvent`] values after every engine step and
//! hands each one to [`deliver`], which prints it and redraws the prompt.
//! Events may name devices that have since deregistered; those print without
//! a device dump.

pub mod render;

use std::io::{self, Write};

use tracing::warn;

use fleet_types::{DeviceId, DeviceRegistry, StatusCode};

use crate::engine::EngineEvent;

pub(crate) const OUTPUT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::output");

/// Operator prompt.
pub const PROMPT: &str = "> ";

/// Prints one engine event followed by a fresh prompt.
pub fn deliver<W>(out: &mut W, devices: &DeviceRegistry, event: &EngineEvent) -> io::Result<()>
where
    W: Write + ?Sized,
{
    match event {
        EngineEvent::OperationResult {
            device,
            uri,
            status,
            format,
            payload,
        } => {
            writeln!(out, "\nClient #{device} {uri} : {status}")?;
            render::write_payload(out, *format, payload)?;
        }
        EngineEvent::Notification {
            device,
            uri,
            count,
            format,
            payload,
        } => {
            writeln!(out, "\nNotify from client #{device} {uri} number {count}")?;
            render::write_payload(out, *format, payload)?;
        }
        EngineEvent::Registration { device, status } => {
            write_registration(out, devices, *device, *status)?;
        }
    }
    write!(out, "\n{PROMPT}")?;
    out.flush()
}

fn write_registration<W>(
    out: &mut W,
    devices: &DeviceRegistry,
    device: DeviceId,
    status: StatusCode,
) -> io::Result<()>
where
    W: Write + ?Sized,
{
    match status {
        StatusCode::Created => {
            writeln!(out, "\nNew client #{device} registered.")?;
            dump_if_present(out, devices, device)
        }
        StatusCode::Changed => {
            writeln!(out, "\nClient #{device} updated.")?;
            dump_if_present(out, devices, device)
        }
        StatusCode::Deleted => writeln!(out, "\nClient #{device} unregistered."),
        other => {
            warn!(
                target: OUTPUT_TARGET,
                device,
                status = %other,
                "registration event with unrecognised status"
            );
            writeln!(
                out,
                "\nMonitor callback called with an unknown status: {other}."
            )
        }
    }
}

fn dump_if_present<W>(out: &mut W, devices: &DeviceRegistry, device: DeviceId) -> io::Result<()>
where
    W: Write + ?Sized,
{
    match devices.get(device) {
        Some(record) => render::write_device(out, record),
        None => Ok(()),
    }
}
