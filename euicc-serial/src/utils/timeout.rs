//! Timeout helpers used across the crate.
//!
//! The millisecond constants mirror the phase deadlines of the T=0 exchange;
//! [`crate::config::Timeouts`] turns them into `Duration`s.

use std::time::Duration;

/// Echo read-back after a header or body write.
pub const ECHO_TIMEOUT_MS: u64 = 500;

/// Waiting for the procedure byte while the card processes the header.
pub const PROCEDURE_TIMEOUT_MS: u64 = 3000;

/// SW2 and the "nothing else pending" check after an early SW1.
pub const STATUS_TAIL_TIMEOUT_MS: u64 = 500;

/// First byte of the response body.
pub const FIRST_RESPONSE_TIMEOUT_MS: u64 = 5000;

/// Every response byte after the first.
pub const INTER_BYTE_TIMEOUT_MS: u64 = 300;

/// First ATR byte after releasing reset.
pub const ATR_FIRST_TIMEOUT_MS: u64 = 1000;

/// Every remaining ATR byte.
pub const ATR_BYTE_TIMEOUT_MS: u64 = 500;

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
