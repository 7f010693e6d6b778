// euicc-serial/src/driver/builder.rs

use crate::config::{DriverConfig, PowerTiming, SerialConfig, Timeouts};
use crate::driver::handle::{Driver, Uninitialized};
use crate::transport::{ControlLines, Delay, SerialLine, StdDelay};
use crate::{Error, Result};

/// Helper to construct a Driver with optional configuration.
pub struct DriverBuilder {
    serial: Option<Box<dyn SerialLine>>,
    lines: Option<Box<dyn ControlLines>>,
    delay: Option<Box<dyn Delay>>,
    config: DriverConfig,
}

impl Default for DriverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DriverBuilder {
    pub fn new() -> Self {
        Self {
            serial: None,
            lines: None,
            delay: None,
            config: DriverConfig::default(),
        }
    }

    pub fn with_serial(mut self, serial: Box<dyn SerialLine>) -> Self {
        self.serial = Some(serial);
        self
    }

    pub fn with_control_lines(mut self, lines: Box<dyn ControlLines>) -> Self {
        self.lines = Some(lines);
        self
    }

    /// Defaults to [`StdDelay`].
    pub fn with_delay(mut self, delay: Box<dyn Delay>) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_config(mut self, config: DriverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_serial_config(mut self, serial: SerialConfig) -> Self {
        self.config.serial = serial;
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.config.timeouts = timeouts;
        self
    }

    pub fn with_power_timing(mut self, power: PowerTiming) -> Self {
        self.config.power = power;
        self
    }

    /// Consume the builder and return an uninitialized Driver.
    /// The serial line and the control lines are mandatory.
    pub fn build(self) -> Result<Driver<Uninitialized>> {
        let serial = self
            .serial
            .ok_or_else(|| Error::Hardware("no serial line provided".into()))?;
        let lines = self
            .lines
            .ok_or_else(|| Error::Hardware("no control lines provided".into()))?;
        let delay = self.delay.unwrap_or_else(|| Box::new(StdDelay));
        Ok(Driver::new(serial, lines, delay, self.config))
    }
}
