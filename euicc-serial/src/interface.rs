// euicc-serial/src/interface.rs

//! The contract a profile-management host library drives.
//!
//! [`ApduInterface`] is the typed form. [`HostAdapter`] flattens it into the
//! integer-sentinel shape the host expects: `0` or `-1`, a channel number or
//! `-1`, response bytes or `-1`.

use log::{error, warn};

use crate::driver::{Driver, Initialized};
use crate::types::ChannelId;
use crate::{Error, Result};

/// Which host interface a driver fills in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum DriverKind {
    #[display(fmt = "apdu")]
    Apdu,
    #[display(fmt = "http")]
    Http,
}

/// Registration record for the host's driver table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
#[display(fmt = "{}/{}", kind, name)]
pub struct DriverInfo {
    pub kind: DriverKind,
    pub name: &'static str,
}

/// This crate's serial APDU driver.
pub const SERIAL_APDU_DRIVER: DriverInfo = DriverInfo {
    kind: DriverKind::Apdu,
    name: "serial",
};

/// Typed APDU entry points.
pub trait ApduInterface {
    fn info(&self) -> DriverInfo;
    fn connect(&mut self) -> Result<()>;
    fn disconnect(&mut self);
    fn logic_channel_open(&mut self, aid: &[u8]) -> Result<ChannelId>;
    fn logic_channel_close(&mut self, channel: ChannelId);
    fn transmit(&mut self, command: &[u8]) -> Result<Vec<u8>>;
}

impl ApduInterface for Driver<Initialized> {
    fn info(&self) -> DriverInfo {
        SERIAL_APDU_DRIVER
    }

    fn connect(&mut self) -> Result<()> {
        Driver::connect(self)
    }

    fn disconnect(&mut self) {
        if let Err(e) = Driver::disconnect(self) {
            warn!("disconnect: {}", e);
        }
    }

    fn logic_channel_open(&mut self, aid: &[u8]) -> Result<ChannelId> {
        self.open_channel(aid)
    }

    fn logic_channel_close(&mut self, channel: ChannelId) {
        self.close_channel(channel)
    }

    fn transmit(&mut self, command: &[u8]) -> Result<Vec<u8>> {
        Driver::transmit(self, command)
    }
}

/// Sentinel-returning wrapper around an [`ApduInterface`].
pub struct HostAdapter<I> {
    inner: I,
}

impl<I: ApduInterface> HostAdapter<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &I {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.inner
    }

    pub fn into_inner(self) -> I {
        self.inner
    }

    pub fn info(&self) -> DriverInfo {
        self.inner.info()
    }

    /// `0` on success, `-1` otherwise.
    pub fn connect(&mut self) -> i32 {
        match self.inner.connect() {
            Ok(()) => 0,
            Err(e) => report("connect", e),
        }
    }

    pub fn disconnect(&mut self) {
        self.inner.disconnect()
    }

    /// Channel number 1..=3, or `-1`.
    pub fn logic_channel_open(&mut self, aid: &[u8]) -> i32 {
        match self.inner.logic_channel_open(aid) {
            Ok(ch) => i32::from(ch.as_u8()),
            Err(e) => report("logic_channel_open", e),
        }
    }

    /// Channel numbers outside 0..=3 are ignored.
    pub fn logic_channel_close(&mut self, channel: u8) {
        match ChannelId::try_from(channel) {
            Ok(ch) => self.inner.logic_channel_close(ch),
            Err(e) => warn!("logic_channel_close: {}", e),
        }
    }

    /// Response bytes, or `-1`.
    pub fn transmit(&mut self, command: &[u8]) -> std::result::Result<Vec<u8>, i32> {
        self.inner
            .transmit(command)
            .map_err(|e| report("transmit", e))
    }
}

fn report(op: &str, e: Error) -> i32 {
    error!("{} failed ({}): {}", op, e.kind(), e);
    e.sentinel()
}
