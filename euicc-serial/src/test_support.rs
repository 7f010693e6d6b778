//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize common MockCard setup so tests across the
//! crate and tests/ directory can reuse the same logic.
#![allow(dead_code)]

use crate::config::DriverConfig;
use crate::driver::{Driver, Initialized, Uninitialized};
use crate::transport::MockCard;
use crate::Result;

/// ATR of a typical eUICC: TA1 and TD1 present, 7 historical bytes.
#[doc(hidden)]
pub const TEST_ATR: &[u8] = &[
    0x3B, 0x97, 0x96, 0x80, 0x1F, 0x47, 0x80, 0x31, 0xE0, 0x73, 0xFE,
];

/// A simulated card that answers reset with [`TEST_ATR`].
#[doc(hidden)]
pub fn mock_card() -> MockCard {
    MockCard::new().with_atr(TEST_ATR)
}

/// Queue the ACK and `90 00` the card gives to TERMINAL CAPABILITIES.
#[doc(hidden)]
pub fn seed_terminal_capabilities(card: &mut MockCard) {
    card.push_reply(&[0xAA]);
    card.push_reply(&[0x90, 0x00]);
}

/// Queue a successful MANAGE CHANNEL open assigning `channel`, followed by a
/// SELECT answered with `90 00`.
#[doc(hidden)]
pub fn seed_open_channel(card: &mut MockCard, channel: u8) {
    card.push_reply(&[0x70, channel, 0x90, 0x00]);
    card.push_reply(&[0xA4]);
    card.push_reply(&[0x90, 0x00]);
}

/// Uninitialized driver whose serial line, control lines and delay are all
/// clones of `card`.
#[doc(hidden)]
pub fn mock_driver(card: &MockCard) -> Driver<Uninitialized> {
    Driver::new(
        Box::new(card.clone()),
        Box::new(card.clone()),
        Box::new(card.clone()),
        DriverConfig::default(),
    )
}

/// Convenience: initialize and connect a driver over `card`. The caller
/// is expected to have given the card an ATR; the TERMINAL CAPABILITIES
/// replies are seeded here.
#[doc(hidden)]
pub fn connected_mock_driver(card: &mut MockCard) -> Result<Driver<Initialized>> {
    seed_terminal_capabilities(card);
    let mut driver = mock_driver(card).initialize()?;
    driver.connect()?;
    Ok(driver)
}
