// euicc-serial/src/constants.rs
//! Wire-level constants shared by the protocol and driver layers

/// First byte of every Answer-To-Reset (direct convention)
pub const ATR_START: u8 = 0x3B;

/// T=0 NULL procedure byte: the card asks for more time
pub const NULL_PROCEDURE_BYTE: u8 = 0x60;

/// SW1 for normal completion
pub const SW1_OK: u8 = 0x90;

/// SW1 for "response bytes still available"
pub const SW1_MORE_DATA: u8 = 0x61;

/// Length of a command header: CLA INS P1 P2 P3
pub const HEADER_LEN: usize = 5;

/// Capacity of the response buffer handed back to the host
pub const RESPONSE_BUFFER_SIZE: usize = 264;

/// Receive count used when the expected response length cannot be derived
pub const UNDETERMINED_LENGTH: usize = 65535;

/// Number of interface-byte presence bits in T0's high nibble
pub const ATR_INTERFACE_SLOTS: usize = 4;

/// TERMINAL CAPABILITIES, sent once the card answered to reset
pub const APDU_TERMINAL_CAPABILITIES: &[u8] = &[
    0x80, 0xAA, 0x00, 0x00, 0x0A, 0xA9, 0x08, 0x81, 0x00, 0x82, 0x01, 0x01, 0x83, 0x01, 0x07,
];

/// MANAGE CHANNEL (open), card assigns the channel number
pub const APDU_MANAGE_CHANNEL_OPEN: &[u8] = &[0x00, 0x70, 0x00, 0x00, 0x01];

/// MANAGE CHANNEL (close); CLA low nibble selects the channel
pub const APDU_MANAGE_CHANNEL_CLOSE: &[u8] = &[0x00, 0x70, 0x80, 0xFF, 0x00];

/// SELECT by DF name; P3 is patched to the AID length
pub const APDU_SELECT_HEADER: &[u8] = &[0x00, 0xA4, 0x04, 0x00, 0xFF];
