// euicc-serial/src/protocol/length.rs

//! Number of bytes to read back after a T=0 command, derived from the
//! ISO 7816-3 command cases.
//!
//! | Layout                               | Expected            |
//! |--------------------------------------|---------------------|
//! | header (P3 = Le)                     | Le + 2, or open     |
//! | header, Lc, data                     | 2                   |
//! | header, Lc, data, Le                 | Le + 2, or open     |
//! | header, 00, Le(2)                    | Le + 2, or open     |
//! | header, 00, Lc(2), data              | 2                   |
//! | header, 00, Lc(2), data, Le(2)       | Le + 2, or open     |
//!
//! "Open" is [`ExpectedLength::Undetermined`]: Le = 0 (maximum) or a body
//! whose length does not match any layout. The receiver then reads until
//! the line goes quiet.

use crate::constants::{HEADER_LEN, UNDETERMINED_LENGTH};

/// Length of the status word trailer.
pub const SW_LEN: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedLength {
    Exact(usize),
    Undetermined,
}

impl ExpectedLength {
    /// Le of 0 asks for the maximum the card is willing to send.
    fn from_le(le: usize) -> Self {
        if le == 0 {
            Self::Undetermined
        } else {
            Self::Exact(le + SW_LEN)
        }
    }

    /// Byte count handed to the receive loop.
    pub fn receive_count(&self) -> usize {
        match self {
            Self::Exact(n) => *n,
            Self::Undetermined => UNDETERMINED_LENGTH,
        }
    }

    /// Only SW1 SW2 will come back.
    pub fn is_status_only(&self) -> bool {
        *self == Self::Exact(SW_LEN)
    }
}

/// Derive the response length for a command split into its header and the
/// bytes following it.
pub fn expected_length(header: &[u8; HEADER_LEN], body: &[u8]) -> ExpectedLength {
    let p3 = header[4];
    if body.is_empty() {
        return ExpectedLength::from_le(p3 as usize);
    }
    if p3 == 0 {
        extended(body)
    } else {
        short(p3 as usize, body)
    }
}

fn short(lc: usize, body: &[u8]) -> ExpectedLength {
    if body.len() == lc {
        ExpectedLength::Exact(SW_LEN)
    } else if body.len() == lc + 1 {
        ExpectedLength::from_le(body[lc] as usize)
    } else {
        ExpectedLength::Undetermined
    }
}

/// `body` starts right after the 0x00 extended marker in P3.
fn extended(body: &[u8]) -> ExpectedLength {
    match body {
        [hi, lo] => ExpectedLength::from_le(u16::from_be_bytes([*hi, *lo]) as usize),
        [hi, lo, rest @ ..] => {
            let lc = u16::from_be_bytes([*hi, *lo]) as usize;
            if rest.len() == lc {
                ExpectedLength::Exact(SW_LEN)
            } else if rest.len() == lc + 2 {
                ExpectedLength::from_le(u16::from_be_bytes([rest[lc], rest[lc + 1]]) as usize)
            } else {
                ExpectedLength::Undetermined
            }
        }
        // a lone byte after the marker cannot hold a two-byte length
        _ => ExpectedLength::Undetermined,
    }
}
