// euicc-serial/src/transport/mod.rs

pub mod mock;
pub mod traits;

pub use mock::{EchoFault, MockCard};
pub use traits::{ControlLines, Delay, ReadOutcome, SerialLine, StdDelay};
