// euicc-serial/src/driver/channel.rs

use log::{debug, error, warn};

use crate::driver::transceiver::Exchange;
use crate::protocol::commands;
use crate::types::{ChannelId, StatusWord};
use crate::utils::Hex;
use crate::{Error, Result};

/// MANAGE CHANNEL open answers channel number + SW1 SW2.
const OPEN_RESPONSE_LEN: usize = 3;

/// Opens and closes logical channels with MANAGE CHANNEL and selects the
/// target application on a freshly opened one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChannelManager;

impl ChannelManager {
    pub fn new() -> Self {
        Self
    }

    /// Open a channel and SELECT `aid` on it. If the SELECT is refused the
    /// channel stays open on the card; the caller should close it.
    pub fn open(&self, link: &mut dyn Exchange, aid: &[u8]) -> Result<ChannelId> {
        debug!("opening logical channel");
        let resp = link.exchange(&commands::manage_channel_open()).inspect_err(|e| {
            error!("failed to open logical channel: {}", e);
        })?;
        if resp.len() != OPEN_RESPONSE_LEN {
            error!("failed to open logical channel, response {}", Hex(&resp));
            return Err(Error::Channel(format!(
                "MANAGE CHANNEL response of {} bytes",
                resp.len()
            )));
        }
        let sw = StatusWord::new(resp[1], resp[2]);
        if !sw.is_success_class() {
            error!("failed to open logical channel, status {}", sw);
            return Err(Error::ChannelStatus {
                sw1: sw.sw1,
                sw2: sw.sw2,
            });
        }
        let channel = ChannelId::try_from(resp[0])?;
        if channel.is_basic() {
            error!("failed to open logical channel, card assigned the basic channel");
            return Err(Error::Channel("MANAGE CHANNEL assigned channel 0".into()));
        }

        let select = commands::select_by_aid(channel, aid)?;
        let resp = link.exchange(&select).inspect_err(|e| {
            error!("failed to select {} on channel {}: {}", Hex(aid), channel, e);
        })?;
        let sw = StatusWord::from_response(&resp).ok_or_else(|| {
            error!("SELECT response too short: {}", Hex(&resp));
            Error::Channel(format!("SELECT response of {} bytes", resp.len()))
        })?;
        if !sw.is_select_ok() {
            debug!("channel {} unusable, SELECT status {}", channel, sw);
            return Err(Error::ChannelStatus {
                sw1: sw.sw1,
                sw2: sw.sw2,
            });
        }

        debug!("got channel {}", channel);
        Ok(channel)
    }

    /// Best-effort close. The basic channel is never closed.
    pub fn close(&self, link: &mut dyn Exchange, channel: ChannelId) {
        if channel.is_basic() {
            return;
        }
        debug!("closing channel {}", channel);
        let outcome = commands::manage_channel_close(channel).and_then(|cmd| link.exchange(&cmd));
        if let Err(e) = outcome {
            warn!("closing channel {} failed: {}", channel, e);
        }
    }
}
