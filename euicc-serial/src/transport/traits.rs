// euicc-serial/src/transport/traits.rs

use std::time::Duration;

use crate::Result;
use crate::config::SerialConfig;
use crate::types::Line;

/// Result of a read bounded by a deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// All requested bytes arrived in time
    Data(Vec<u8>),
    /// The deadline passed; whatever did arrive is kept
    TimedOut { partial: Vec<u8> },
}

impl ReadOutcome {
    pub fn bytes(&self) -> &[u8] {
        match self {
            Self::Data(b) => b,
            Self::TimedOut { partial } => partial,
        }
    }
}

/// Half-duplex UART carrying the card I/O line. Every byte written is also
/// received back (loopback) and must be consumed by the caller.
pub trait SerialLine {
    /// Apply line parameters. Called once while the driver initializes.
    fn configure(&mut self, config: &SerialConfig) -> Result<()>;

    /// Queue bytes for transmission and return how many were accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read exactly `len` bytes, giving up after `timeout`.
    fn read(&mut self, len: usize, timeout: Duration) -> Result<ReadOutcome>;

    /// Bytes already received and not yet read.
    fn buffered_len(&self) -> Result<usize>;

    /// Drop everything in the receive buffer.
    fn flush_input(&mut self) -> Result<()>;

    /// Give the UART back to the system. Default does nothing.
    fn release(&mut self) -> Result<()> {
        Ok(())
    }

    /// Single-byte read; `None` on timeout.
    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>> {
        match self.read(1, timeout)? {
            ReadOutcome::Data(b) => Ok(b.first().copied()),
            ReadOutcome::TimedOut { .. } => Ok(None),
        }
    }
}

/// The card supply-enable and reset outputs.
pub trait ControlLines {
    /// Put both lines in output mode, driven low.
    fn configure_outputs(&mut self) -> Result<()>;

    fn set_level(&mut self, line: Line, high: bool) -> Result<()>;
}

/// Blocking wait used between power sequencing steps.
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// [`Delay`] backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdDelay;

impl Delay for StdDelay {
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
