//! Command sinks
//!
//! A [`CommandSink`] accepts one line of text at a time and hands it to the
//! machine. Delivery is fire-and-forget and order-preserving: lines leave in
//! exactly the order `send_line` was called.

use jogpad_core::{ConnectionError, Result};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Line-oriented transmitter to the machine controller
pub trait CommandSink: Send {
    /// Transmit a single line (without trailing newline)
    fn send_line(&mut self, line: &str) -> Result<()>;

    /// Whether the sink still accepts lines
    fn is_open(&self) -> bool {
        true
    }
}

impl<S: CommandSink + ?Sized> CommandSink for Box<S> {
    fn send_line(&mut self, line: &str) -> Result<()> {
        (**self).send_line(line)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }
}

/// Sink that drops every line
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

impl CommandSink for NoOpSink {
    fn send_line(&mut self, line: &str) -> Result<()> {
        tracing::trace!("Discarding {}", line);
        Ok(())
    }
}

/// Sink that writes newline-terminated lines to any [`Write`] implementor
///
/// Typically wraps stdout or an opened serial device node.
pub struct WriterSink<W: Write + Send> {
    writer: W,
    lines_sent: usize,
}

impl<W: Write + Send> WriterSink<W> {
    /// Wrap a writer
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            lines_sent: 0,
        }
    }

    /// Number of lines written successfully
    pub fn lines_sent(&self) -> usize {
        self.lines_sent
    }

    /// Unwrap the inner writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> CommandSink for WriterSink<W> {
    fn send_line(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{}", line)
            .and_then(|_| self.writer.flush())
            .map_err(|e| ConnectionError::IoError {
                reason: e.to_string(),
            })?;
        self.lines_sent += 1;
        Ok(())
    }
}

/// Sink that forwards lines over a tokio channel to a transport task
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelSink {
    /// Create a sink and the receiving end for the transport task
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl CommandSink for ChannelSink {
    fn send_line(&mut self, line: &str) -> Result<()> {
        self.tx
            .send(line.to_string())
            .map_err(|_| ConnectionError::Closed.into())
    }

    fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// In-memory sink that records every line it accepts
///
/// Clones share the same record, so a test can keep one handle while the
/// engine owns another. A failure pattern makes matching lines error out
/// instead of being recorded, to exercise partial-send paths.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
    fail_on: Option<String>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder that rejects lines containing `pattern`
    pub fn failing_on(pattern: impl Into<String>) -> Self {
        Self {
            lines: Arc::default(),
            fail_on: Some(pattern.into()),
        }
    }

    /// Snapshot of recorded lines
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Drain and return recorded lines
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }

    /// Number of recorded lines
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Whether nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

impl CommandSink for RecordingSink {
    fn send_line(&mut self, line: &str) -> Result<()> {
        if let Some(pattern) = &self.fail_on {
            if line.contains(pattern.as_str()) {
                return Err(ConnectionError::ConnectionLost {
                    reason: format!("rejected '{}'", line),
                }
                .into());
            }
        }
        self.lines.lock().push(line.to_string());
        Ok(())
    }
}
