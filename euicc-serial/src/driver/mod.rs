// euicc-serial/src/driver/mod.rs

//! Card session: power sequencing, ATR, T=0 exchange, logical channels and
//! the facade tying them together.

pub mod atr;
pub mod builder;
pub mod channel;
pub mod handle;
pub mod power;
pub mod transceiver;

pub use atr::AtrListener;
pub use builder::DriverBuilder;
pub use channel::ChannelManager;
pub use handle::{Driver, Initialized, Uninitialized};
pub use power::PowerSequencer;
pub use transceiver::{Exchange, Link, Procedure, Transceiver};
