// euicc-serial/src/config.rs
//! Serial line settings, phase timeouts and power sequencing delays.

use std::time::Duration;

use crate::types::Phase;
use crate::utils::timeout::{self, ms};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parity {
    None,
    Even,
    Odd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopBits {
    One,
    Two,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FlowControl {
    None,
    Hardware,
}

/// UART parameters. The card side of T=0 at default clocking runs 9600 8E2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialConfig {
    pub baud_rate: u32,
    pub data_bits: u8,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,
            data_bits: 8,
            parity: Parity::Even,
            stop_bits: StopBits::Two,
            flow_control: FlowControl::None,
        }
    }
}

/// Per-phase read deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeouts {
    pub echo: Duration,
    pub procedure_byte: Duration,
    pub status_tail: Duration,
    pub first_response_byte: Duration,
    pub inter_byte: Duration,
    pub atr_first_byte: Duration,
    pub atr_byte: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            echo: ms(timeout::ECHO_TIMEOUT_MS),
            procedure_byte: ms(timeout::PROCEDURE_TIMEOUT_MS),
            status_tail: ms(timeout::STATUS_TAIL_TIMEOUT_MS),
            first_response_byte: ms(timeout::FIRST_RESPONSE_TIMEOUT_MS),
            inter_byte: ms(timeout::INTER_BYTE_TIMEOUT_MS),
            atr_first_byte: ms(timeout::ATR_FIRST_TIMEOUT_MS),
            atr_byte: ms(timeout::ATR_BYTE_TIMEOUT_MS),
        }
    }
}

impl Timeouts {
    pub fn for_phase(&self, phase: Phase) -> Duration {
        match phase {
            Phase::HeaderEcho | Phase::BodyEcho => self.echo,
            Phase::ProcedureByte => self.procedure_byte,
            Phase::StatusWordTail => self.status_tail,
            Phase::FirstResponseByte => self.first_response_byte,
            Phase::ResponseByte => self.inter_byte,
            Phase::AtrInitial => self.atr_first_byte,
            Phase::AtrFormat | Phase::AtrInterface | Phase::AtrHistorical => self.atr_byte,
        }
    }
}

/// Delays of the cold-reset sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PowerTiming {
    /// Both lines low before powering up again
    pub deactivate_settle: Duration,
    /// Supply up, reset still asserted
    pub activate_settle: Duration,
    /// Wait after the ATR before draining leftovers
    pub atr_settle: Duration,
}

impl Default for PowerTiming {
    fn default() -> Self {
        Self {
            deactivate_settle: ms(100),
            activate_settle: ms(10),
            atr_settle: ms(500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriverConfig {
    pub serial: SerialConfig,
    pub timeouts: Timeouts,
    pub power: PowerTiming,
}
