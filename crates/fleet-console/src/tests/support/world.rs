//! Command-line world: an engine double plus everything a handler touches.

use std::net::SocketAddr;

use fleet_types::{Binding, BindingSet, Device, ObjectEntry, ProtocolVersion};

use crate::dispatch::{self, CommandContext, PayloadFallbacks};
use crate::reactor::TerminationToken;

use super::engine::RecordingEngine;

/// Engine, console output and termination token for dispatch scenarios.
pub struct CommandWorld {
    pub engine: RecordingEngine,
    pub out: Vec<u8>,
    pub termination: TerminationToken,
    pub fallbacks: PayloadFallbacks,
}

impl CommandWorld {
    pub fn new(engine: RecordingEngine) -> Self {
        Self {
            engine,
            out: Vec::new(),
            termination: TerminationToken::new(),
            fallbacks: PayloadFallbacks::default(),
        }
    }

    /// Dispatches `line` and returns what it printed.
    pub fn run(&mut self, line: &str) -> String {
        self.out.clear();
        let mut context = CommandContext {
            engine: &mut self.engine,
            out: &mut self.out,
            termination: &self.termination,
            fallbacks: &self.fallbacks,
        };
        dispatch::dispatch(&mut context, line).expect("console output failed");
        String::from_utf8(self.out.clone()).expect("console output was not UTF-8")
    }
}

/// A registered device exposing the device and firmware objects.
pub fn sample_device(id: u16) -> Device {
    Device {
        version: ProtocolVersion::V1_1,
        binding: BindingSet::empty().with(Binding::Udp),
        lifetime: 300,
        objects: vec![
            ObjectEntry::new(3).with_instances([0]),
            ObjectEntry::new(5).with_version(1, 1).with_instances([0]),
        ],
        ..Device::new(id, format!("urn:dev:{id}"))
    }
}

pub fn peer(port: u16) -> SocketAddr {
    SocketAddr::from(([192, 0, 2, 10], port))
}
