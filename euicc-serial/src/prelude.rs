// euicc-serial/src/prelude.rs

pub use crate::config::{DriverConfig, PowerTiming, SerialConfig, Timeouts};
pub use crate::driver::{Driver, DriverBuilder, Initialized, Uninitialized};
pub use crate::http::{CertificateBundle, HttpContext, HttpInterface, HttpRequest, HttpResponse};
pub use crate::interface::{ApduInterface, DriverInfo, DriverKind, HostAdapter};
pub use crate::protocol::{Atr, ExpectedLength};
pub use crate::transport::{ControlLines, Delay, SerialLine};
pub use crate::{ChannelId, Error, ErrorKind, Result, SessionState, StatusWord};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms};
