// euicc-serial/src/types.rs

use crate::Error;
use crate::constants::{SW1_MORE_DATA, SW1_OK};

/// Session lifecycle as seen by the driver facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum SessionState {
    #[default]
    #[display(fmt = "deactivated")]
    Deactivated,
    #[display(fmt = "resetting")]
    Resetting,
    #[display(fmt = "awaiting ATR")]
    AwaitingAtr,
    #[display(fmt = "ready")]
    Ready,
}

/// Wire phase a read or write belongs to. Used to pick the timeout and to
/// label errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Phase {
    #[display(fmt = "header echo")]
    HeaderEcho,
    #[display(fmt = "body echo")]
    BodyEcho,
    #[display(fmt = "procedure byte")]
    ProcedureByte,
    #[display(fmt = "SW2")]
    StatusWordTail,
    #[display(fmt = "first response byte")]
    FirstResponseByte,
    #[display(fmt = "response byte")]
    ResponseByte,
    #[display(fmt = "ATR initial byte")]
    AtrInitial,
    #[display(fmt = "ATR T0")]
    AtrFormat,
    #[display(fmt = "ATR interface byte")]
    AtrInterface,
    #[display(fmt = "ATR historical byte")]
    AtrHistorical,
}

/// The two card control lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Line {
    /// Card supply enable (SIM_ON)
    #[display(fmt = "activation")]
    Activation,
    /// Card RST
    #[display(fmt = "reset")]
    Reset,
}

/// Logical channel number, 0 (basic) to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[derive(derive_more::Display)]
#[display(fmt = "{}", _0)]
pub struct ChannelId(u8);

impl ChannelId {
    pub const BASIC: Self = Self(0);
    pub const MAX: u8 = 3;

    pub fn as_u8(&self) -> u8 {
        self.0
    }

    pub fn is_basic(&self) -> bool {
        self.0 == 0
    }

    /// Rewrite the low nibble of a CLA byte to address this channel.
    pub fn patch_cla(&self, cla: u8) -> u8 {
        (cla & 0xF0) | self.0
    }
}

impl TryFrom<u8> for ChannelId {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            return Err(Error::Channel(format!("channel {} out of range", value)));
        }
        Ok(Self(value))
    }
}

impl From<ChannelId> for u8 {
    fn from(id: ChannelId) -> u8 {
        id.0
    }
}

/// Status word trailer (SW1 SW2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display(fmt = "{:02X}{:02X}", sw1, sw2)]
pub struct StatusWord {
    pub sw1: u8,
    pub sw2: u8,
}

impl StatusWord {
    pub const fn new(sw1: u8, sw2: u8) -> Self {
        Self { sw1, sw2 }
    }

    /// Last two bytes of a response, if it is long enough.
    pub fn from_response(resp: &[u8]) -> Option<Self> {
        match resp {
            [.., sw1, sw2] => Some(Self::new(*sw1, *sw2)),
            _ => None,
        }
    }

    /// SW1 high nibble is 9 (`9XXX`)
    pub fn is_success_class(&self) -> bool {
        self.sw1 & 0xF0 == SW1_OK
    }

    /// `90XX` or `61XX`
    pub fn is_select_ok(&self) -> bool {
        self.sw1 == SW1_OK || self.sw1 == SW1_MORE_DATA
    }

    pub fn to_bytes(&self) -> [u8; 2] {
        [self.sw1, self.sw2]
    }
}
