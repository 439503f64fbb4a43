//! Command handlers.
//!
//! Every handler parses its arguments completely, including the end-of-line
//! check, before it calls the engine.

use std::io::Write;

use fleet_types::{AttributeSet, DataRecord, DeviceId, Operation, Payload, Uri};

use super::lexer::Arguments;
use super::table::{COMMANDS, HandlerData, PathRequest, lookup};
use super::{CommandContext, CommandError, Reply};
use crate::engine::Request;
use crate::output::render;

/// `list`
pub(super) fn list(
    context: &mut CommandContext<'_>,
    args: &str,
    _data: HandlerData,
) -> Result<Reply, CommandError> {
    Arguments::new(args).finish()?;
    render::write_devices(context.out, context.engine.devices())?;
    Ok(Reply::Done)
}

/// `read`, `disc`, `del`, `observe` and `cancel`.
pub(super) fn path_request(
    context: &mut CommandContext<'_>,
    args: &str,
    data: HandlerData,
) -> Result<Reply, CommandError> {
    let HandlerData::Path(kind) = data else {
        return Err(CommandError::Syntax);
    };
    let mut arguments = Arguments::new(args);
    let (device, uri) = target(&mut arguments, kind.operation())?;
    arguments.finish()?;
    let request = match kind {
        PathRequest::Read => Request::Read { uri },
        PathRequest::Discover => Request::Discover { uri },
        PathRequest::Delete => Request::Delete { uri },
        PathRequest::Observe => Request::Observe { uri },
        PathRequest::CancelObserve => Request::CancelObserve { uri },
    };
    submit(context, device, request)
}

/// `write` and `update`.
///
/// Structured records are preferred. A full write falls back to sending the
/// text as is; a partial update has no such fallback.
pub(super) fn write(
    context: &mut CommandContext<'_>,
    args: &str,
    data: HandlerData,
) -> Result<Reply, CommandError> {
    let partial = matches!(data, HandlerData::Write { partial: true });
    let mut arguments = Arguments::new(args);
    let (device, uri) = target(&mut arguments, Operation::Write)?;
    let text = arguments.required()?;
    arguments.finish()?;

    let records = context.engine.parse_records(&uri, text);
    let payload = if !records.is_empty() {
        Payload::Records(records)
    } else if partial {
        return Err(CommandError::Syntax);
    } else {
        Payload::Text(text.to_owned())
    };
    submit(
        context,
        device,
        Request::Write {
            uri,
            payload,
            partial,
        },
    )
}

/// `time`
pub(super) fn time(
    context: &mut CommandContext<'_>,
    args: &str,
    _data: HandlerData,
) -> Result<Reply, CommandError> {
    let mut arguments = Arguments::new(args);
    let (device, uri) = target(&mut arguments, Operation::WriteAttributes)?;
    let min_period = parse_period(arguments.required()?)?;
    let max_period = parse_period(arguments.required()?)?;
    arguments.finish()?;
    submit(
        context,
        device,
        Request::WriteAttributes {
            uri,
            attributes: AttributeSet::time(min_period, max_period),
        },
    )
}

/// `attr`
pub(super) fn attr(
    context: &mut CommandContext<'_>,
    args: &str,
    _data: HandlerData,
) -> Result<Reply, CommandError> {
    let mut arguments = Arguments::new(args);
    let (device, uri) = target(&mut arguments, Operation::WriteAttributes)?;
    let less_than = parse_threshold(arguments.required()?)?;
    let greater_than = parse_threshold(arguments.required()?)?;
    let step = arguments.optional().map(parse_threshold).transpose()?;
    arguments.finish()?;
    submit(
        context,
        device,
        Request::WriteAttributes {
            uri,
            attributes: AttributeSet::value(less_than, greater_than, step),
        },
    )
}

/// `clear`
pub(super) fn clear(
    context: &mut CommandContext<'_>,
    args: &str,
    _data: HandlerData,
) -> Result<Reply, CommandError> {
    let mut arguments = Arguments::new(args);
    let (device, uri) = target(&mut arguments, Operation::WriteAttributes)?;
    arguments.finish()?;
    submit(
        context,
        device,
        Request::WriteAttributes {
            uri,
            attributes: AttributeSet::clear_all(),
        },
    )
}

/// `exec`
pub(super) fn exec(
    context: &mut CommandContext<'_>,
    args: &str,
    _data: HandlerData,
) -> Result<Reply, CommandError> {
    let mut arguments = Arguments::new(args);
    let (device, uri) = target(&mut arguments, Operation::Execute)?;
    let argument = arguments.optional().map(str::to_owned);
    arguments.finish()?;
    submit(context, device, Request::Execute { uri, argument })
}

/// `create`
///
/// An instance id in the path moves into the payload: the records are
/// wrapped as that object instance and the request targets the object.
pub(super) fn create(
    context: &mut CommandContext<'_>,
    args: &str,
    _data: HandlerData,
) -> Result<Reply, CommandError> {
    let mut arguments = Arguments::new(args);
    let (device, uri) = target(&mut arguments, Operation::Create)?;
    let text = arguments.required()?;
    arguments.finish()?;

    let mut records = context.engine.parse_records(&uri, text);
    if records.is_empty() {
        records = context
            .fallbacks
            .parse(uri.object_id(), text)
            .ok_or(CommandError::Syntax)??;
    }
    let (uri, records) = match uri.instance_id() {
        Some(instance) => (
            uri.to_object(),
            vec![DataRecord::object_instance(instance, records)],
        ),
        None => (uri, records),
    };
    submit(context, device, Request::Create { uri, records })
}

/// `q`
pub(super) fn quit(
    context: &mut CommandContext<'_>,
    args: &str,
    _data: HandlerData,
) -> Result<Reply, CommandError> {
    Arguments::new(args).finish()?;
    context.termination.quit();
    Ok(Reply::Done)
}

/// `help [KEYWORD]`
pub(super) fn help(out: &mut dyn Write, args: &str) -> Result<Reply, CommandError> {
    let mut arguments = Arguments::new(args);
    let keyword = arguments.optional();
    arguments.finish()?;
    match keyword {
        None => {
            writeln!(out, "{:<10}{}", "help", "Type 'help [COMMAND]' for more details on a command.")?;
            for entry in &COMMANDS {
                writeln!(out, "{:<10}{}", entry.keyword, entry.summary)?;
            }
        }
        Some(keyword) => {
            let entry = lookup(keyword).ok_or_else(|| CommandError::UnknownCommand {
                keyword: keyword.to_owned(),
            })?;
            writeln!(out, "{}", entry.help.unwrap_or(entry.summary))?;
        }
    }
    Ok(Reply::Done)
}

fn target(
    arguments: &mut Arguments<'_>,
    operation: Operation,
) -> Result<(DeviceId, Uri), CommandError> {
    let device = parse_device(arguments.required()?)?;
    let uri = arguments
        .required()?
        .parse::<Uri>()
        .map_err(|_| CommandError::Syntax)?;
    if operation.accepts(&uri) {
        Ok((device, uri))
    } else {
        Err(CommandError::Syntax)
    }
}

fn parse_device(token: &str) -> Result<DeviceId, CommandError> {
    if !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(CommandError::Syntax);
    }
    token.parse().map_err(|_| CommandError::Syntax)
}

fn parse_period(token: &str) -> Result<u32, CommandError> {
    if !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(CommandError::Syntax);
    }
    token.parse().map_err(|_| CommandError::Syntax)
}

fn parse_threshold(token: &str) -> Result<f64, CommandError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(CommandError::Syntax)
}

fn submit(
    context: &mut CommandContext<'_>,
    device: DeviceId,
    request: Request,
) -> Result<Reply, CommandError> {
    context.engine.submit(device, request)?;
    Ok(Reply::Accepted)
}
