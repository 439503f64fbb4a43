//! Scriptable [`Engine`] double that records everything the console asks of it.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::rc::Rc;
use std::time::Duration;

use fleet_types::{DataRecord, Device, DeviceId, DeviceRegistry, StatusCode, Uri};

use crate::connections::{Connection, ConnectionId};
use crate::engine::{Engine, EngineError, EngineEvent, Link, Request};

use super::timeline::Timeline;

/// Datagram handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedPacket {
    pub connection: ConnectionId,
    pub peer: SocketAddr,
    pub bytes: Vec<u8>,
}

/// State shared between the engine and the test that owns it.
#[derive(Debug, Default)]
pub struct EngineLog {
    pub submissions: Vec<(DeviceId, Request)>,
    pub packets: Vec<ReceivedPacket>,
    pub events: VecDeque<EngineEvent>,
    pub steps: usize,
    pub closed: bool,
}

/// Engine double with a fixed registry and scripted behaviour.
pub struct RecordingEngine {
    devices: DeviceRegistry,
    records: HashMap<String, Vec<DataRecord>>,
    wait: Duration,
    log: Rc<RefCell<EngineLog>>,
    timeline: Timeline,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            devices: DeviceRegistry::new(),
            records: HashMap::new(),
            wait: Duration::from_secs(1),
            log: Rc::default(),
            timeline: Timeline::default(),
        }
    }

    /// Registers `device`; submissions to any other id are refused.
    pub fn with_device(mut self, device: Device) -> Self {
        self.devices.insert(device);
        self
    }

    /// Makes `text` decode to `records` for every path.
    pub fn with_records(mut self, text: &str, records: Vec<DataRecord>) -> Self {
        self.records.insert(text.to_owned(), records);
        self
    }

    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = timeline;
        self
    }

    /// Shared log for assertions after the engine has been moved.
    pub fn log(&self) -> Rc<RefCell<EngineLog>> {
        Rc::clone(&self.log)
    }

    /// Queues an event for the next drain.
    pub fn push_event(&self, event: EngineEvent) {
        self.log.borrow_mut().events.push_back(event);
    }

    pub fn submissions(&self) -> Vec<(DeviceId, Request)> {
        self.log.borrow().submissions.clone()
    }
}

impl Engine for RecordingEngine {
    fn step(&mut self, _link: &mut dyn Link) -> Result<Duration, EngineError> {
        self.log.borrow_mut().steps += 1;
        Ok(self.wait)
    }

    fn handle_packet(&mut self, connection: &Connection, packet: &[u8], _link: &mut dyn Link) {
        self.log.borrow_mut().packets.push(ReceivedPacket {
            connection: connection.id(),
            peer: connection.peer(),
            bytes: packet.to_vec(),
        });
    }

    fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }

    fn parse_records(&self, _uri: &Uri, text: &str) -> Vec<DataRecord> {
        self.records.get(text).cloned().unwrap_or_default()
    }

    fn submit(&mut self, device: DeviceId, request: Request) -> Result<(), StatusCode> {
        if !self.devices.contains(device) {
            return Err(StatusCode::NotFound);
        }
        self.log.borrow_mut().submissions.push((device, request));
        Ok(())
    }

    fn next_event(&mut self) -> Option<EngineEvent> {
        self.log.borrow_mut().events.pop_front()
    }

    fn close(&mut self, _link: &mut dyn Link) {
        self.log.borrow_mut().closed = true;
        self.timeline.record("engine closed");
    }
}

impl Drop for RecordingEngine {
    fn drop(&mut self) {
        self.timeline.record("engine dropped");
    }
}
