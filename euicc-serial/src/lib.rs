// euicc-serial/src/lib.rs

//! euicc-serial
//!
//! T=0 APDU driver for eUICC chips wired to a half-duplex serial line with
//! hardware loopback, plus the HTTP collaborator a profile-management host
//! needs next to it.
#![warn(missing_docs)]

pub mod config;
pub mod constants;
pub mod driver;
pub mod error;
pub mod http;
pub mod interface;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the newtypes in `types` are available everywhere.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
