//! Small helpers shared across the crate: hex formatting for wire logs and
//! the phase timeout constants.

pub mod hex;
pub mod timeout;

pub use self::hex::*;
pub use self::timeout::ms;
