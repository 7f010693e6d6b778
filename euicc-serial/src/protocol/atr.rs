// euicc-serial/src/protocol/atr.rs

use crate::constants::{ATR_INTERFACE_SLOTS, ATR_START};

/// T0 format byte: high nibble flags TA1/TB1/TC1/TD1, low nibble is the
/// number of historical bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtrFormat(u8);

impl AtrFormat {
    pub fn new(t0: u8) -> Self {
        Self(t0)
    }

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    /// Whether interface byte `slot` (0 = TA1 .. 3 = TD1) is present.
    pub fn has_interface_byte(&self, slot: usize) -> bool {
        slot < ATR_INTERFACE_SLOTS && self.0 & (0x10 << slot) != 0
    }

    pub fn interface_byte_count(&self) -> usize {
        (self.0 >> 4).count_ones() as usize
    }

    pub fn historical_count(&self) -> usize {
        (self.0 & 0x0F) as usize
    }
}

/// Bytes drained from the card while waiting for it to become ready.
/// Only the first interface group is walked; TD1 is not followed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Atr {
    /// Number of `0x3B` bytes seen before T0
    pub initial_count: usize,
    pub format: Option<AtrFormat>,
    pub interface_bytes: Vec<u8>,
    pub historical_bytes: Vec<u8>,
    /// Anything still on the line after the settle delay
    pub trailing: Vec<u8>,
}

impl Atr {
    /// Reassemble the bytes as they came off the line.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![ATR_START; self.initial_count];
        if let Some(f) = self.format {
            out.push(f.as_u8());
        }
        out.extend_from_slice(&self.interface_bytes);
        out.extend_from_slice(&self.historical_bytes);
        out.extend_from_slice(&self.trailing);
        out
    }
}
