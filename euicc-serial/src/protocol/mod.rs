// euicc-serial/src/protocol/mod.rs

pub mod apdu;
pub mod atr;
pub mod commands;
pub mod length;

pub use apdu::CommandApdu;
pub use atr::{Atr, AtrFormat};
pub use length::{ExpectedLength, expected_length};
