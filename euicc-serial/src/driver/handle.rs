// euicc-serial/src/driver/handle.rs

use std::collections::BTreeSet;
use std::marker::PhantomData;

use log::{debug, error, info, warn};

use crate::config::DriverConfig;
use crate::driver::atr::AtrListener;
use crate::driver::channel::ChannelManager;
use crate::driver::power::PowerSequencer;
use crate::driver::transceiver::Transceiver;
use crate::protocol::{Atr, commands};
use crate::transport::{ControlLines, Delay, SerialLine};
use crate::types::{ChannelId, SessionState};
use crate::utils::Hex;
use crate::{Error, Result};

/// Type-state markers
pub struct Uninitialized;
pub struct Initialized;

/// Card session over one serial line and its two control lines.
///
/// The driver owns all three exclusively. Hardware setup is enforced at
/// compile time: only a `Driver<Initialized>` can talk to the card.
pub struct Driver<State = Uninitialized> {
    serial: Box<dyn SerialLine>,
    lines: Box<dyn ControlLines>,
    delay: Box<dyn Delay>,
    config: DriverConfig,
    power: PowerSequencer,
    atr: AtrListener,
    transceiver: Transceiver,
    channels: ChannelManager,
    session: SessionState,
    open_channels: BTreeSet<ChannelId>,
    last_atr: Option<Atr>,
    _state: PhantomData<State>,
}

impl<State> Driver<State> {
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    pub fn session_state(&self) -> SessionState {
        self.session
    }

    fn into_state<Next>(self) -> Driver<Next> {
        Driver {
            serial: self.serial,
            lines: self.lines,
            delay: self.delay,
            config: self.config,
            power: self.power,
            atr: self.atr,
            transceiver: self.transceiver,
            channels: self.channels,
            session: self.session,
            open_channels: self.open_channels,
            last_atr: self.last_atr,
            _state: PhantomData,
        }
    }
}

impl Driver<Uninitialized> {
    /// Assemble a driver from its hardware handles. Nothing is touched
    /// until [`Driver::initialize`].
    pub fn new(
        serial: Box<dyn SerialLine>,
        lines: Box<dyn ControlLines>,
        delay: Box<dyn Delay>,
        config: DriverConfig,
    ) -> Self {
        Self {
            serial,
            lines,
            delay,
            power: PowerSequencer::new(config.power),
            atr: AtrListener::new(config.timeouts, config.power.atr_settle),
            transceiver: Transceiver::new(config.timeouts),
            channels: ChannelManager::new(),
            config,
            session: SessionState::Deactivated,
            open_channels: BTreeSet::new(),
            last_atr: None,
            _state: PhantomData,
        }
    }

    /// Apply the UART settings and put both control lines in output mode.
    /// The card stays unpowered.
    pub fn initialize(mut self) -> Result<Driver<Initialized>> {
        let serial = self.config.serial;
        debug!(
            "serial: {} baud, {} data bits, {:?} parity, {:?} stop bits",
            serial.baud_rate, serial.data_bits, serial.parity, serial.stop_bits
        );
        self.serial.configure(&serial)?;
        self.lines.configure_outputs()?;
        Ok(self.into_state())
    }
}

impl Driver<Initialized> {
    /// Cold-reset the card, read its ATR and send TERMINAL CAPABILITIES.
    ///
    /// On failure the card is powered down again and the session is left
    /// deactivated, so the caller can simply retry.
    pub fn connect(&mut self) -> Result<()> {
        self.open_channels.clear();
        self.last_atr = None;

        match self.power_up() {
            Ok(()) => {
                self.session = SessionState::Ready;
                info!("card ready");
                Ok(())
            }
            Err(e) => {
                error!("connect failed in state {}: {}", self.session, e);
                if let Err(de) = self.power.deactivate(&mut *self.lines) {
                    warn!("deactivation after failed connect: {}", de);
                }
                self.session = SessionState::Deactivated;
                Err(e)
            }
        }
    }

    fn power_up(&mut self) -> Result<()> {
        self.session = SessionState::Resetting;
        self.power
            .activate(&mut *self.lines, &mut *self.serial, &mut *self.delay)?;

        self.session = SessionState::AwaitingAtr;
        let atr = self.atr.await_atr(&mut *self.serial, &mut *self.delay)?;
        info!("ATR: {}", Hex(&atr.to_bytes()));
        self.last_atr = Some(atr);

        let resp = self
            .transceiver
            .exchange(&mut *self.serial, &commands::terminal_capabilities())?;
        debug!("terminal capabilities: {}", Hex(&resp));
        Ok(())
    }

    /// Drop power. All logical channels are gone afterwards.
    pub fn disconnect(&mut self) -> Result<()> {
        debug!("disconnect");
        self.open_channels.clear();
        self.session = SessionState::Deactivated;
        self.power.deactivate(&mut *self.lines)
    }

    /// Open a logical channel and select `aid` on it.
    pub fn open_channel(&mut self, aid: &[u8]) -> Result<ChannelId> {
        self.ensure_ready()?;
        let mut link = self.transceiver.bind(&mut *self.serial);
        let channel = self.channels.open(&mut link, aid)?;
        self.open_channels.insert(channel);
        Ok(channel)
    }

    /// Best-effort close; see [`ChannelManager::close`].
    pub fn close_channel(&mut self, channel: ChannelId) {
        if self.session != SessionState::Ready {
            debug!("close of channel {} while {}, ignored", channel, self.session);
            return;
        }
        if !self.open_channels.remove(&channel) && !channel.is_basic() {
            debug!("channel {} not tracked as open, closing anyway", channel);
        }
        let mut link = self.transceiver.bind(&mut *self.serial);
        self.channels.close(&mut link, channel);
    }

    /// Exchange one raw command APDU and return `data || SW1 SW2`.
    pub fn transmit(&mut self, command: &[u8]) -> Result<Vec<u8>> {
        self.ensure_ready()?;
        self.transceiver.exchange(&mut *self.serial, command)
    }

    /// ATR of the current session, if one was read.
    pub fn last_atr(&self) -> Option<&Atr> {
        self.last_atr.as_ref()
    }

    /// Channels opened through this driver and not yet closed.
    pub fn open_channels(&self) -> impl Iterator<Item = ChannelId> + '_ {
        self.open_channels.iter().copied()
    }

    pub fn is_ready(&self) -> bool {
        self.session == SessionState::Ready
    }

    /// Power down and hand the serial line back.
    pub fn shutdown(mut self) -> Result<()> {
        info!("shutting down");
        self.disconnect()?;
        self.serial.release()
    }

    fn ensure_ready(&self) -> Result<()> {
        if self.is_ready() {
            Ok(())
        } else {
            error!("card not connected (state {})", self.session);
            Err(Error::NotConnected)
        }
    }
}
