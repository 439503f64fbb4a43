//! Scripted socket, poller and console output for reactor scenarios.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::net::SocketAddr;
use std::rc::Rc;
use std::time::Duration;

use crate::reactor::{Poller, Readiness, WaitError};
use crate::transport::DatagramSocket;

use super::timeline::Timeline;

/// Socket double serving queued datagrams.
///
/// Datagrams longer than the receive buffer are truncated to the buffer's
/// length, as a real datagram socket does.
#[derive(Debug, Default)]
pub struct ScriptedSocket {
    inbound: RefCell<VecDeque<(Vec<u8>, SocketAddr)>>,
    timeline: Timeline,
}

impl ScriptedSocket {
    pub fn new(timeline: Timeline) -> Self {
        Self {
            inbound: RefCell::default(),
            timeline,
        }
    }

    pub fn queue(&self, bytes: Vec<u8>, peer: SocketAddr) {
        self.inbound.borrow_mut().push_back((bytes, peer));
    }
}

impl DatagramSocket for ScriptedSocket {
    fn recv_from(&self, buffer: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        let (bytes, peer) = self
            .inbound
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::WouldBlock))?;
        let size = bytes.len().min(buffer.len());
        buffer[..size].copy_from_slice(&bytes[..size]);
        Ok((size, peer))
    }

    fn send_to(&self, datagram: &[u8], _peer: SocketAddr) -> io::Result<usize> {
        Ok(datagram.len())
    }
}

impl Drop for ScriptedSocket {
    fn drop(&mut self) {
        self.timeline.record("socket closed");
    }
}

/// Poller double replaying a fixed sequence of readiness results.
///
/// Once the script runs out every wait reports input readiness, so the
/// reactor drains its input stream to end of file and stops.
#[derive(Debug, Default)]
pub struct ScriptedPoller {
    script: VecDeque<Result<Readiness, WaitError>>,
    timeouts: Rc<RefCell<Vec<Duration>>>,
    timeline: Timeline,
}

impl ScriptedPoller {
    pub fn new(script: impl IntoIterator<Item = Readiness>) -> Self {
        Self {
            script: script.into_iter().map(Ok).collect(),
            timeouts: Rc::default(),
            timeline: Timeline::default(),
        }
    }

    pub fn then_interrupted(mut self) -> Self {
        self.script.push_back(Err(WaitError::Interrupted));
        self
    }

    pub fn with_timeline(mut self, timeline: Timeline) -> Self {
        self.timeline = timeline;
        self
    }

    pub fn timeouts(&self) -> Rc<RefCell<Vec<Duration>>> {
        Rc::clone(&self.timeouts)
    }
}

impl Poller for ScriptedPoller {
    fn wait(&mut self, timeout: Duration) -> Result<Readiness, WaitError> {
        self.timeouts.borrow_mut().push(timeout);
        self.script.pop_front().unwrap_or(Ok(Readiness::Input))
    }
}

impl Drop for ScriptedPoller {
    fn drop(&mut self) {
        self.timeline.record("poller dropped");
    }
}

/// Console output shared with the test after the reactor consumes it.
#[derive(Debug, Clone, Default)]
pub struct SharedOutput {
    bytes: Rc<RefCell<Vec<u8>>>,
}

impl SharedOutput {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes.borrow()).into_owned()
    }
}

impl Write for SharedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
