//! Directory of remote peers the console has heard from.
//!
//! One [`Connection`] exists per distinct peer address. Entries are created
//! on the first datagram from an unseen address and live until shutdown; the
//! console never evicts them individually.

use std::fmt;
use std::net::SocketAddr;

/// Handle naming one directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u32);

impl ConnectionId {
    /// Raw handle value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One remote peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    id: ConnectionId,
    peer: SocketAddr,
}

impl Connection {
    /// Directory handle.
    #[must_use]
    pub const fn id(&self) -> ConnectionId {
        self.id
    }

    /// Transport address of the peer.
    #[must_use]
    pub const fn peer(&self) -> SocketAddr {
        self.peer
    }
}

/// Peers keyed by address, at most one entry each.
#[derive(Debug, Default)]
pub struct ConnectionDirectory {
    entries: Vec<Connection>,
    next_id: u32,
}

impl ConnectionDirectory {
    /// Builds an empty directory.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    /// Returns the entry for `peer`, creating it when the address is new.
    ///
    /// The flag is `true` when the entry was created by this call.
    pub fn resolve(&mut self, peer: SocketAddr) -> (&Connection, bool) {
        let (index, created) = match self.entries.iter().position(|entry| entry.peer == peer) {
            Some(index) => (index, false),
            None => {
                let id = ConnectionId(self.next_id);
                self.next_id = self.next_id.wrapping_add(1);
                self.entries.insert(0, Connection { id, peer });
                (0, true)
            }
        };
        (&self.entries[index], created)
    }

    /// Looks up an entry by handle.
    #[must_use]
    pub fn get(&self, id: ConnectionId) -> Option<&Connection> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Looks up an entry by peer address.
    #[must_use]
    pub fn find_by_peer(&self, peer: SocketAddr) -> Option<&Connection> {
        self.entries.iter().find(|entry| entry.peer == peer)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no peer has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry and returns how many were released.
    pub fn release_all(&mut self) -> usize {
        let released = self.entries.len();
        self.entries.clear();
        released
    }
}
