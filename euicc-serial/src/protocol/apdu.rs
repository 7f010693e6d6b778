// euicc-serial/src/protocol/apdu.rs

use crate::constants::HEADER_LEN;
use crate::protocol::length::{ExpectedLength, expected_length};
use crate::types::ChannelId;
use crate::{Error, Result};

/// Borrowed view of a raw command APDU: a 5-byte header followed by an
/// optional body. Nothing beyond the header is interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandApdu<'a> {
    header: &'a [u8; HEADER_LEN],
    body: &'a [u8],
}

impl<'a> CommandApdu<'a> {
    /// Split `raw` into header and body. Commands shorter than a header are
    /// rejected before anything reaches the wire.
    pub fn parse(raw: &'a [u8]) -> Result<Self> {
        let (header, body) = raw
            .split_first_chunk::<HEADER_LEN>()
            .ok_or(Error::CommandTooShort {
                expected: HEADER_LEN,
                actual: raw.len(),
            })?;
        Ok(Self { header, body })
    }

    pub fn header(&self) -> &'a [u8; HEADER_LEN] {
        self.header
    }

    pub fn body(&self) -> &'a [u8] {
        self.body
    }

    pub fn cla(&self) -> u8 {
        self.header[0]
    }

    /// INS doubles as the T=0 ACK procedure byte.
    pub fn ins(&self) -> u8 {
        self.header[1]
    }

    /// Lc or Le depending on the command case; 0 marks extended length
    /// when a body follows.
    pub fn p3(&self) -> u8 {
        self.header[4]
    }

    pub fn has_body(&self) -> bool {
        !self.body.is_empty()
    }

    pub fn is_extended(&self) -> bool {
        self.p3() == 0 && self.has_body()
    }

    /// Total bytes put on the wire.
    pub fn wire_len(&self) -> usize {
        HEADER_LEN + self.body.len()
    }

    pub fn expected_length(&self) -> ExpectedLength {
        expected_length(self.header, self.body)
    }
}

/// Copy `raw` with its CLA addressed to `channel`.
pub fn on_channel(raw: &[u8], channel: ChannelId) -> Result<Vec<u8>> {
    let apdu = CommandApdu::parse(raw)?;
    let mut out = Vec::with_capacity(apdu.wire_len());
    out.push(channel.patch_cla(apdu.cla()));
    out.extend_from_slice(&raw[1..]);
    Ok(out)
}
