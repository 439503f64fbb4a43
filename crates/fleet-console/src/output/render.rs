//! Text rendering for device records and response payloads.

use std::io::{self, Write};

use fleet_types::{Device, DeviceRegistry, MediaFormat, ObjectEntry};

const DUMP_ROW: usize = 16;

/// Writes every registered device, or `No client.` when there are none.
pub fn write_devices<W>(out: &mut W, devices: &DeviceRegistry) -> io::Result<()>
where
    W: Write + ?Sized,
{
    if devices.is_empty() {
        return writeln!(out, "No client.");
    }
    for device in devices.iter() {
        write_device(out, device)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Writes one device record.
pub fn write_device<W>(out: &mut W, device: &Device) -> io::Result<()>
where
    W: Write + ?Sized,
{
    writeln!(out, "Client #{}:", device.id)?;
    writeln!(out, "\tname: \"{}\"", device.name)?;
    writeln!(out, "\tversion: \"{}\"", device.version)?;
    writeln!(out, "\tbinding: \"{}\"", device.binding)?;
    if let Some(msisdn) = &device.msisdn {
        writeln!(out, "\tmsisdn: \"{msisdn}\"")?;
    }
    if let Some(path) = &device.alternate_path {
        writeln!(out, "\talternative path: \"{path}\"")?;
    }
    writeln!(out, "\tlifetime: {} sec", device.lifetime)?;
    let objects: Vec<String> = device.objects.iter().flat_map(object_paths).collect();
    writeln!(out, "\tobjects: {}", objects.join(", "))
}

fn object_paths(object: &ObjectEntry) -> Vec<String> {
    let head = match object.declared_version() {
        Some((major, minor)) => Some(format!("/{} ({major}.{minor})", object.id)),
        None if object.instances.is_empty() => Some(format!("/{}", object.id)),
        None => None,
    };
    head.into_iter()
        .chain(
            object
                .instances
                .iter()
                .map(|instance| format!("/{}/{instance}", object.id)),
        )
        .collect()
}

/// Writes a response body according to its content format.
///
/// Textual formats are written as text; anything else as a hex dump. An
/// empty body writes nothing.
pub fn write_payload<W>(out: &mut W, format: MediaFormat, payload: &[u8]) -> io::Result<()>
where
    W: Write + ?Sized,
{
    if payload.is_empty() {
        return Ok(());
    }
    if format.is_textual() {
        writeln!(out, "{}", String::from_utf8_lossy(payload))
    } else {
        write_hex_dump(out, payload)
    }
}

/// Writes `bytes` as offset, hex and ASCII columns, sixteen bytes per row.
pub fn write_hex_dump<W>(out: &mut W, bytes: &[u8]) -> io::Result<()>
where
    W: Write + ?Sized,
{
    for (row, chunk) in bytes.chunks(DUMP_ROW).enumerate() {
        let hex: Vec<String> = chunk.iter().map(|byte| format!("{byte:02X}")).collect();
        let ascii: String = chunk
            .iter()
            .map(|byte| {
                if byte.is_ascii_graphic() || *byte == b' ' {
                    char::from(*byte)
                } else {
                    '.'
                }
            })
            .collect();
        writeln!(
            out,
            "{:04X}  {:<width$}  {ascii}",
            row * DUMP_ROW,
            hex.join(" "),
            width = DUMP_ROW * 3 - 1
        )?;
    }
    Ok(())
}
