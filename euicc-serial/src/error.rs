// euicc-serial/src/error.rs

use thiserror::Error;

use crate::types::Phase;

/// Common error type for every driver operation
#[derive(Error, Debug)]
pub enum Error {
    #[error("command too short: expected at least {expected} bytes, got {actual}")]
    CommandTooShort { expected: usize, actual: usize },

    #[error("short write during {phase}: wrote {written} of {expected} bytes")]
    ShortWrite {
        phase: Phase,
        expected: usize,
        written: usize,
    },

    #[error("echo incomplete during {phase}: expected {expected} bytes, got {actual}")]
    ShortEcho {
        phase: Phase,
        expected: usize,
        actual: usize,
    },

    #[error("echo mismatch during {phase} at byte {index}: sent {sent:#04x}, read {read:#04x}")]
    EchoMismatch {
        phase: Phase,
        index: usize,
        sent: u8,
        read: u8,
    },

    #[error("timed out waiting for {0}")]
    Timeout(Phase),

    #[error("malformed ATR: {0}")]
    MalformedAtr(String),

    #[error("unexpected byte {0:#04x} after status word")]
    TrailingByte(u8),

    #[error("invalid response length: expected {expected}, got {actual}")]
    ResponseLength { expected: usize, actual: usize },

    #[error("channel error: status=({sw1:#04x}, {sw2:#04x})")]
    ChannelStatus { sw1: u8, sw2: u8 },

    #[error("channel error: {0}")]
    Channel(String),

    #[error("response buffer exhausted: capacity {capacity}")]
    BufferExhausted { capacity: usize },

    #[error("driver not connected")]
    NotConnected,

    #[error("hardware error: {0}")]
    Hardware(String),

    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error families reported to the host. Every [`Error`] belongs to exactly
/// one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ErrorKind {
    #[display(fmt = "transmission")]
    Transmission,
    #[display(fmt = "timeout")]
    Timeout,
    #[display(fmt = "protocol")]
    Protocol,
    #[display(fmt = "channel")]
    Channel,
    #[display(fmt = "resource")]
    Resource,
}

/// Value returned to the host library for any failed entry point.
pub const SENTINEL: i32 = -1;

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ShortWrite { .. } | Error::ShortEcho { .. } | Error::EchoMismatch { .. } => {
                ErrorKind::Transmission
            }
            Error::Timeout(_) => ErrorKind::Timeout,
            Error::CommandTooShort { .. }
            | Error::MalformedAtr(_)
            | Error::TrailingByte(_)
            | Error::ResponseLength { .. }
            | Error::NotConnected => ErrorKind::Protocol,
            Error::ChannelStatus { .. } | Error::Channel(_) => ErrorKind::Channel,
            Error::BufferExhausted { .. } | Error::Hardware(_) | Error::Io(_) => {
                ErrorKind::Resource
            }
            #[cfg(feature = "http")]
            Error::Http(_) => ErrorKind::Resource,
        }
    }

    /// The host contract only ever sees a single negative value.
    pub fn sentinel(&self) -> i32 {
        SENTINEL
    }
}

pub type Result<T> = std::result::Result<T, Error>;
