// euicc-serial/src/driver/power.rs

use log::debug;

use crate::Result;
use crate::config::PowerTiming;
use crate::transport::{ControlLines, Delay, SerialLine};
use crate::types::Line;

/// Cold-reset sequencing on the supply and reset lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerSequencer {
    timing: PowerTiming,
}

impl PowerSequencer {
    pub fn new(timing: PowerTiming) -> Self {
        Self { timing }
    }

    /// Power-cycle the card and release reset. Stale input is flushed just
    /// before reset goes high so the next byte on the line is the ATR.
    pub fn activate(
        &self,
        lines: &mut dyn ControlLines,
        serial: &mut dyn SerialLine,
        delay: &mut dyn Delay,
    ) -> Result<()> {
        debug!("cold reset");
        self.deactivate(lines)?;
        delay.delay(self.timing.deactivate_settle);

        lines.set_level(Line::Activation, true)?;
        delay.delay(self.timing.activate_settle);

        serial.flush_input()?;
        lines.set_level(Line::Reset, true)?;
        Ok(())
    }

    /// Reset low, then supply off. Safe to repeat.
    pub fn deactivate(&self, lines: &mut dyn ControlLines) -> Result<()> {
        lines.set_level(Line::Reset, false)?;
        lines.set_level(Line::Activation, false)?;
        Ok(())
    }
}
