//! Engine used when no protocol implementation is linked.

use std::time::Duration;

use tracing::debug;

use fleet_types::{DataRecord, DeviceId, DeviceRegistry, StatusCode, Uri};

use super::{ENGINE_TARGET, Engine, EngineError, EngineEvent, Link, Request};
use crate::connections::Connection;

const IDLE_WAIT: Duration = Duration::from_secs(60);

/// Engine with an empty registry that discards inbound traffic.
///
/// Every submission is refused with [`StatusCode::NotFound`] because no device
/// can ever register.
#[derive(Debug)]
pub struct OfflineEngine {
    block_size: u16,
    devices: DeviceRegistry,
}

impl OfflineEngine {
    /// Builds an engine advertising `block_size` for block-wise transfers.
    #[must_use]
    pub const fn new(block_size: u16) -> Self {
        Self {
            block_size,
            devices: DeviceRegistry::new(),
        }
    }

    /// Block size the engine was configured with.
    #[must_use]
    pub const fn block_size(&self) -> u16 {
        self.block_size
    }
}

impl Engine for OfflineEngine {
    fn step(&mut self, _link: &mut dyn Link) -> Result<Duration, EngineError> {
        Ok(IDLE_WAIT)
    }

    fn handle_packet(&mut self, connection: &Connection, packet: &[u8], _link: &mut dyn Link) {
        debug!(
            target: ENGINE_TARGET,
            connection = %connection.id(),
            peer = %connection.peer(),
            bytes = packet.len(),
            "no protocol engine linked; datagram discarded"
        );
    }

    fn devices(&self) -> &DeviceRegistry {
        &self.devices
    }

    fn parse_records(&self, _uri: &Uri, _text: &str) -> Vec<DataRecord> {
        Vec::new()
    }

    fn submit(&mut self, device: DeviceId, request: Request) -> Result<(), StatusCode> {
        debug!(
            target: ENGINE_TARGET,
            device,
            operation = %request.operation(),
            uri = %request.uri(),
            "request refused; device is not registered"
        );
        Err(StatusCode::NotFound)
    }

    fn next_event(&mut self) -> Option<EngineEvent> {
        None
    }

    fn close(&mut self, _link: &mut dyn Link) {
        debug!(
            target: ENGINE_TARGET,
            block_size = self.block_size,
            "offline engine closed"
        );
    }
}
