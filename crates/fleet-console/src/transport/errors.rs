//! Error types for datagram socket setup.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors surfaced while creating the console's datagram socket.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to create datagram socket for {addr}: {source}")]
    Create {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to configure datagram socket for {addr}: {source}")]
    Configure {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("failed to bind datagram socket at {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}
