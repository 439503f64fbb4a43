//! Datagram socket plumbing for the console.
//!
//! The socket is bound once at startup. The reactor receives through the
//! [`DatagramSocket`] trait so tests can script traffic, and the engine sends
//! through a [`SocketLink`] that resolves connection handles against the
//! directory.

mod errors;

use std::io;
use std::net::{SocketAddr, UdpSocket};

use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use tracing::{debug, trace};

use crate::connections::{ConnectionDirectory, ConnectionId};
use crate::engine::{Link, LinkError};

pub use self::errors::TransportError;

pub(crate) const TRANSPORT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::transport");

/// Largest datagram the console accepts, in bytes.
pub const MAX_PACKET_SIZE: usize = 2048;

/// Minimal datagram socket surface used by the reactor.
pub trait DatagramSocket {
    /// Receives one datagram into `buffer`.
    fn recv_from(&self, buffer: &mut [u8]) -> io::Result<(usize, SocketAddr)>;

    /// Sends one datagram to `peer`.
    fn send_to(&self, datagram: &[u8], peer: SocketAddr) -> io::Result<usize>;
}

impl DatagramSocket for UdpSocket {
    fn recv_from(&self, buffer: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        Self::recv_from(self, buffer)
    }

    fn send_to(&self, datagram: &[u8], peer: SocketAddr) -> io::Result<usize> {
        Self::send_to(self, datagram, peer)
    }
}

/// Binds the console's datagram socket.
///
/// An IPv6 wildcard address is bound dual-stack so IPv4 devices can reach
/// the console through mapped addresses.
pub fn bind_datagram_socket(addr: SocketAddr) -> Result<UdpSocket, TransportError> {
    let domain = Domain::for_address(addr);
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))
        .map_err(|source| TransportError::Create { addr, source })?;
    if addr.is_ipv6() && addr.ip().is_unspecified() {
        socket
            .set_only_v6(false)
            .map_err(|source| TransportError::Configure { addr, source })?;
    }
    socket
        .set_reuse_address(true)
        .map_err(|source| TransportError::Configure { addr, source })?;
    socket
        .bind(&SockAddr::from(addr))
        .map_err(|source| TransportError::Bind { addr, source })?;
    debug!(target: TRANSPORT_TARGET, addr = %addr, "datagram socket bound");
    Ok(socket.into())
}

/// [`Link`] that sends through the console socket.
pub struct SocketLink<'a, S: ?Sized> {
    socket: &'a S,
    directory: &'a ConnectionDirectory,
}

impl<'a, S> SocketLink<'a, S>
where
    S: DatagramSocket + ?Sized,
{
    /// Builds a link over `socket` resolving handles in `directory`.
    pub const fn new(socket: &'a S, directory: &'a ConnectionDirectory) -> Self {
        Self { socket, directory }
    }
}

impl<S> Link for SocketLink<'_, S>
where
    S: DatagramSocket + ?Sized,
{
    fn send(&mut self, connection: ConnectionId, datagram: &[u8]) -> Result<(), LinkError> {
        let peer = self
            .directory
            .get(connection)
            .ok_or(LinkError::UnknownConnection { connection })?
            .peer();
        trace!(
            target: TRANSPORT_TARGET,
            connection = %connection,
            peer = %peer,
            bytes = datagram.len(),
            "sending datagram"
        );
        self.socket
            .send_to(datagram, peer)
            .map(|_| ())
            .map_err(|source| LinkError::Send { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_ephemeral_ipv4_port() {
        let socket = bind_datagram_socket("127.0.0.1:0".parse().expect("valid address"))
            .expect("bind socket");
        let local = socket.local_addr().expect("local address");
        assert!(local.is_ipv4());
        assert_ne!(local.port(), 0);
    }

    #[test]
    fn link_sends_to_resolved_peer() {
        let console = bind_datagram_socket("127.0.0.1:0".parse().expect("valid address"))
            .expect("bind console socket");
        let device = UdpSocket::bind("127.0.0.1:0").expect("bind device socket");
        let device_addr = device.local_addr().expect("device address");

        let mut directory = ConnectionDirectory::new();
        let (connection, _) = directory.resolve(device_addr);
        let id = connection.id();

        let mut link = SocketLink::new(&console, &directory);
        link.send(id, b"ping").expect("send succeeds");

        let mut buffer = [0_u8; 16];
        let (count, _) = device.recv_from(&mut buffer).expect("receive");
        assert_eq!(buffer.get(..count), Some(&b"ping"[..]));
    }

    #[test]
    fn link_rejects_unknown_connection() {
        let console = bind_datagram_socket("127.0.0.1:0".parse().expect("valid address"))
            .expect("bind console socket");
        let mut other = ConnectionDirectory::new();
        let (connection, _) = other.resolve("127.0.0.1:9".parse().expect("valid address"));
        let id = connection.id();
        let directory = ConnectionDirectory::new();

        let mut link = SocketLink::new(&console, &directory);
        assert!(matches!(
            link.send(id, b"ping"),
            Err(LinkError::UnknownConnection { .. })
        ));
    }
}
