//! Line assembly for the operator input stream.
//!
//! Input is read in raw chunks and split into lines here rather than through
//! a buffered reader: the poller only sees the descriptor, so any line held
//! in a hidden buffer would otherwise wait for the next keystroke.

use std::collections::VecDeque;
use std::io::{self, Read};

/// Chunk size for each read. Large enough that the standard input buffer is
/// bypassed.
const READ_CHUNK: usize = 8 * 1024;

/// Longest operator line kept, excluding its terminator. Longer lines are
/// discarded up to the next newline.
pub const MAX_LINE_LENGTH: usize = 8 * 1024;

/// One line taken from the operator stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperatorLine {
    /// A line within the length limit, without its terminator.
    Command(String),
    /// A line longer than [`MAX_LINE_LENGTH`]; its bytes were discarded.
    Overlong,
}

/// Operator lines assembled from a byte stream.
#[derive(Debug)]
pub struct OperatorInput<R> {
    reader: R,
    partial: Vec<u8>,
    overlong: bool,
    lines: VecDeque<OperatorLine>,
    closed: bool,
}

impl<R: Read> OperatorInput<R> {
    /// Wraps `reader`.
    pub const fn new(reader: R) -> Self {
        Self {
            reader,
            partial: Vec::new(),
            overlong: false,
            lines: VecDeque::new(),
            closed: false,
        }
    }

    /// Performs one read. Reaching end of stream marks the input closed, and
    /// a closed input is never read again.
    ///
    /// # Errors
    ///
    /// Returns the reader's error. Any failure other than an interruption or
    /// a spurious wake-up also closes the input, since the descriptor stays
    /// ready and would fail again on every pass.
    pub fn fill(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        let mut chunk = [0_u8; READ_CHUNK];
        match self.reader.read(&mut chunk) {
            Ok(0) => {
                self.close();
                Ok(())
            }
            Ok(count) => {
                self.accept(chunk.get(..count).unwrap_or_default());
                Ok(())
            }
            Err(error)
                if matches!(
                    error.kind(),
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                ) =>
            {
                Ok(())
            }
            Err(error) => {
                self.close();
                Err(error)
            }
        }
    }

    /// Whether a complete line is buffered.
    #[must_use]
    pub fn has_line(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Takes the next complete line.
    ///
    /// After end of stream an unterminated tail counts as a line.
    pub fn next_line(&mut self) -> Option<OperatorLine> {
        self.lines.pop_front()
    }

    /// Whether the stream ended and every line has been taken.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.closed && self.lines.is_empty()
    }

    fn accept(&mut self, mut data: &[u8]) {
        while let Some(index) = data.iter().position(|byte| *byte == b'\n') {
            let (head, tail) = data.split_at(index);
            self.extend_partial(head);
            self.finish_line();
            data = tail.get(1..).unwrap_or_default();
        }
        self.extend_partial(data);
    }

    fn extend_partial(&mut self, bytes: &[u8]) {
        if self.overlong {
            return;
        }
        if self.partial.len() + bytes.len() > MAX_LINE_LENGTH {
            self.overlong = true;
            self.partial = Vec::new();
        } else {
            self.partial.extend_from_slice(bytes);
        }
    }

    fn finish_line(&mut self) {
        let line = if self.overlong {
            self.overlong = false;
            OperatorLine::Overlong
        } else {
            let raw = std::mem::take(&mut self.partial);
            let text = String::from_utf8_lossy(&raw);
            OperatorLine::Command(text.trim_end_matches('\r').to_owned())
        };
        self.lines.push_back(line);
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        if self.overlong || !self.partial.is_empty() {
            self.finish_line();
        }
        self.closed = true;
    }
}
