//! The reactor's single wait point.

use std::io;
use std::os::fd::{AsFd, OwnedFd};
use std::time::Duration;

use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};
use thiserror::Error;

/// Longest single wait, whatever the engine asks for.
pub const WAIT_CEILING: Duration = Duration::from_secs(60);

/// Source that became ready.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// A datagram is waiting on the socket.
    Socket,
    /// Operator input is readable or closed.
    Input,
    /// The timeout elapsed.
    Idle,
}

/// Errors raised by [`Poller::wait`].
#[derive(Debug, Error)]
pub enum WaitError {
    /// A signal interrupted the wait.
    #[error("wait interrupted by a signal")]
    Interrupted,
    /// The wait primitive failed.
    #[error("wait failed: {0}")]
    Failed(#[source] io::Error),
}

/// Blocks until the socket or the operator input is ready.
pub trait Poller {
    /// Waits at most `timeout`.
    ///
    /// When both sources are ready the socket wins.
    fn wait(&mut self, timeout: Duration) -> Result<Readiness, WaitError>;
}

/// [`Poller`] over the console socket and standard input.
#[derive(Debug)]
pub struct SystemPoller {
    socket: OwnedFd,
    input: OwnedFd,
}

impl SystemPoller {
    /// Builds a poller over duplicates of both descriptors.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when a descriptor cannot be duplicated.
    pub fn new(socket: &impl AsFd, input: &impl AsFd) -> io::Result<Self> {
        Ok(Self {
            socket: socket.as_fd().try_clone_to_owned()?,
            input: input.as_fd().try_clone_to_owned()?,
        })
    }
}

impl Poller for SystemPoller {
    fn wait(&mut self, timeout: Duration) -> Result<Readiness, WaitError> {
        let mut fds = [
            PollFd::new(self.socket.as_fd(), PollFlags::POLLIN),
            PollFd::new(self.input.as_fd(), PollFlags::POLLIN),
        ];
        match poll(&mut fds, poll_timeout(timeout)) {
            Ok(0) => Ok(Readiness::Idle),
            Ok(_) => {
                let [socket, input] = &fds;
                if is_ready(socket) {
                    Ok(Readiness::Socket)
                } else if is_ready(input) {
                    Ok(Readiness::Input)
                } else {
                    Ok(Readiness::Idle)
                }
            }
            Err(Errno::EINTR) => Err(WaitError::Interrupted),
            Err(errno) => Err(WaitError::Failed(io::Error::from(errno))),
        }
    }
}

fn is_ready(fd: &PollFd<'_>) -> bool {
    fd.revents().is_some_and(|events| {
        events.intersects(PollFlags::POLLIN | PollFlags::POLLHUP | PollFlags::POLLERR)
    })
}

fn poll_timeout(timeout: Duration) -> PollTimeout {
    PollTimeout::from(timeout_millis(timeout))
}

fn timeout_millis(timeout: Duration) -> u16 {
    u16::try_from(timeout.min(WAIT_CEILING).as_millis()).unwrap_or(u16::MAX)
}
