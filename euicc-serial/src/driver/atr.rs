// euicc-serial/src/driver/atr.rs

use std::time::Duration;

use log::{debug, error, warn};

use crate::config::Timeouts;
use crate::constants::{ATR_INTERFACE_SLOTS, ATR_START};
use crate::protocol::{Atr, AtrFormat};
use crate::transport::{Delay, SerialLine};
use crate::types::Phase;
use crate::utils::Hex;
use crate::{Error, Result};

/// Consumes the Answer-To-Reset after the power sequencer released reset.
#[derive(Debug, Clone, Copy)]
pub struct AtrListener {
    timeouts: Timeouts,
    settle: Duration,
}

impl AtrListener {
    pub fn new(timeouts: Timeouts, settle: Duration) -> Self {
        Self { timeouts, settle }
    }

    /// Read one ATR. A single attempt: any missing mandatory byte is a
    /// timeout, a wrong initial byte is malformed.
    pub fn await_atr(&self, serial: &mut dyn SerialLine, delay: &mut dyn Delay) -> Result<Atr> {
        let first = self.read(serial, Phase::AtrInitial)?;
        debug!("ATR TS: {:#04x}", first);
        if first != ATR_START {
            let rest = serial.buffered_len()?;
            error!("invalid ATR initial byte {:#04x}, {} bytes pending", first, rest);
            return Err(Error::MalformedAtr(format!(
                "initial byte {:#04x}",
                first
            )));
        }

        let mut atr = Atr {
            initial_count: 1,
            ..Atr::default()
        };

        // some cards repeat TS
        let t0 = loop {
            let b = self.read(serial, Phase::AtrFormat)?;
            if b != ATR_START {
                break b;
            }
            atr.initial_count += 1;
        };
        let format = AtrFormat::new(t0);
        atr.format = Some(format);
        debug!(
            "ATR T0: {:#04x} ({} interface, {} historical)",
            t0,
            format.interface_byte_count(),
            format.historical_count()
        );

        for slot in (0..ATR_INTERFACE_SLOTS).filter(|s| format.has_interface_byte(*s)) {
            let b = self.read(serial, Phase::AtrInterface)?;
            debug!("ATR T{}1: {:#04x}", ['A', 'B', 'C', 'D'][slot], b);
            atr.interface_bytes.push(b);
        }

        for _ in 0..format.historical_count() {
            atr.historical_bytes.push(self.read(serial, Phase::AtrHistorical)?);
        }
        debug!("ATR historical: {}", Hex(&atr.historical_bytes));

        delay.delay(self.settle);
        let pending = serial.buffered_len()?;
        if pending > 0 {
            let extra = serial.read(pending, self.timeouts.atr_byte)?;
            warn!("discarding {} trailing ATR bytes: {}", pending, Hex(extra.bytes()));
            atr.trailing = extra.bytes().to_vec();
        }

        Ok(atr)
    }

    fn read(&self, serial: &mut dyn SerialLine, phase: Phase) -> Result<u8> {
        serial
            .read_byte(self.timeouts.for_phase(phase))?
            .ok_or_else(|| {
                error!("no {} from card", phase);
                Error::Timeout(phase)
            })
    }
}

impl Default for AtrListener {
    fn default() -> Self {
        Self::new(
            Timeouts::default(),
            crate::config::PowerTiming::default().atr_settle,
        )
    }
}
