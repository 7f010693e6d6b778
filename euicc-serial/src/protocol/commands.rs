// euicc-serial/src/protocol/commands.rs

//! Builders for the fixed APDUs the driver issues on its own behalf.

use crate::constants::{
    APDU_MANAGE_CHANNEL_CLOSE, APDU_MANAGE_CHANNEL_OPEN, APDU_SELECT_HEADER,
    APDU_TERMINAL_CAPABILITIES,
};
use crate::protocol::apdu::on_channel;
use crate::types::ChannelId;
use crate::{Error, Result};

pub fn terminal_capabilities() -> Vec<u8> {
    APDU_TERMINAL_CAPABILITIES.to_vec()
}

pub fn manage_channel_open() -> Vec<u8> {
    APDU_MANAGE_CHANNEL_OPEN.to_vec()
}

/// MANAGE CHANNEL close, sent on the channel being closed.
pub fn manage_channel_close(channel: ChannelId) -> Result<Vec<u8>> {
    on_channel(APDU_MANAGE_CHANNEL_CLOSE, channel)
}

/// SELECT by AID on `channel`, Lc set to the AID length.
pub fn select_by_aid(channel: ChannelId, aid: &[u8]) -> Result<Vec<u8>> {
    if aid.is_empty() || aid.len() > u8::MAX as usize {
        return Err(Error::Channel(format!("invalid AID length {}", aid.len())));
    }
    let mut cmd = on_channel(APDU_SELECT_HEADER, channel)?;
    cmd[4] = aid.len() as u8;
    cmd.extend_from_slice(aid);
    Ok(cmd)
}
