// euicc-serial/src/driver/transceiver.rs

//! T=0 command/response exchange over the loopback line.
//!
//! 1. header out, echo checked
//! 2. procedure byte: INS (ACK), NULL (wait) or SW1 (early status)
//! 3. body out, echo checked
//! 4. response length from the command case
//! 5. response in, first byte on the long deadline, the rest on the short one

use log::{debug, error, warn};

use crate::config::Timeouts;
use crate::constants::{NULL_PROCEDURE_BYTE, RESPONSE_BUFFER_SIZE};
use crate::protocol::{CommandApdu, ExpectedLength};
use crate::transport::{ReadOutcome, SerialLine};
use crate::types::{Phase, StatusWord};
use crate::utils::Hex;
use crate::{Error, Result};

/// Anything that can run a command APDU and hand back the raw response.
pub trait Exchange {
    fn exchange(&mut self, command: &[u8]) -> Result<Vec<u8>>;
}

/// What the card answered to the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Procedure {
    /// INS echoed back: go on with the body / response
    Ack,
    /// Card finished early with this status word
    Status(StatusWord),
}

#[derive(Debug, Clone, Copy)]
pub struct Transceiver {
    timeouts: Timeouts,
    capacity: usize,
}

impl Default for Transceiver {
    fn default() -> Self {
        Self::new(Timeouts::default())
    }
}

impl Transceiver {
    pub fn new(timeouts: Timeouts) -> Self {
        Self {
            timeouts,
            capacity: RESPONSE_BUFFER_SIZE,
        }
    }

    /// Override the response buffer size.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Pair with a line to get an [`Exchange`].
    pub fn bind<'a>(&'a self, serial: &'a mut dyn SerialLine) -> Link<'a> {
        Link {
            transceiver: self,
            serial,
        }
    }

    /// Run one command. Nothing is retried; the first failure ends the
    /// exchange.
    pub fn exchange(&self, serial: &mut dyn SerialLine, command: &[u8]) -> Result<Vec<u8>> {
        let apdu = CommandApdu::parse(command).inspect_err(|_| {
            error!("invalid APDU command: {} bytes", command.len());
        })?;
        debug!(
            "APDU header: {}, tx len: {}",
            Hex(apdu.header()),
            apdu.wire_len()
        );

        self.send_with_echo(serial, apdu.header(), Phase::HeaderEcho)?;

        if let Procedure::Status(sw) = self.await_procedure(serial, apdu.ins())? {
            debug!("SW1 SW2: {}", sw);
            return Ok(sw.to_bytes().to_vec());
        }

        if apdu.has_body() {
            self.send_with_echo(serial, apdu.body(), Phase::BodyEcho)?;
        }

        let expected = apdu.expected_length();
        debug!("to receive: {:?}", expected);
        let response = self.receive(serial, expected)?;

        let extra = serial.buffered_len()?;
        if extra > 0 {
            warn!("{} unexpected bytes left on the line", extra);
        }
        debug!("response: {}", Hex(&response));
        Ok(response)
    }

    /// Write `data` and consume its loopback echo, which must match exactly.
    pub fn send_with_echo(
        &self,
        serial: &mut dyn SerialLine,
        data: &[u8],
        phase: Phase,
    ) -> Result<()> {
        let written = serial.write(data)?;
        if written != data.len() {
            error!("short write during {}: {} of {}", phase, written, data.len());
            return Err(Error::ShortWrite {
                phase,
                expected: data.len(),
                written,
            });
        }

        let echo = match serial.read(data.len(), self.timeouts.for_phase(phase))? {
            ReadOutcome::Data(echo) => echo,
            ReadOutcome::TimedOut { partial } => {
                let pending = serial.buffered_len()?;
                error!(
                    "failed to clear echo, tx len: {}, rx len: {}, pending: {}",
                    data.len(),
                    partial.len(),
                    pending
                );
                return Err(Error::ShortEcho {
                    phase,
                    expected: data.len(),
                    actual: partial.len(),
                });
            }
        };
        if echo.len() != data.len() {
            error!(
                "failed to clear echo, tx len: {}, rx len: {}",
                data.len(),
                echo.len()
            );
            return Err(Error::ShortEcho {
                phase,
                expected: data.len(),
                actual: echo.len(),
            });
        }

        let first_diff = data.iter().zip(&echo).position(|(tx, rx)| tx != rx);
        if let Some(index) = first_diff {
            error!("echo mismatch during {}", phase);
            for (i, (tx, rx)) in data.iter().zip(&echo).enumerate() {
                error!("TX{}: {:#04x} RX: {:#04x}", i, tx, rx);
            }
            return Err(Error::EchoMismatch {
                phase,
                index,
                sent: data[index],
                read: echo[index],
            });
        }
        Ok(())
    }

    /// Wait for ACK, skipping NULL bytes. Any other byte is SW1; SW2 must
    /// follow and nothing after it.
    pub fn await_procedure(&self, serial: &mut dyn SerialLine, ins: u8) -> Result<Procedure> {
        loop {
            let byte = self.read(serial, Phase::ProcedureByte)?.ok_or_else(|| {
                error!("no ack");
                Error::Timeout(Phase::ProcedureByte)
            })?;

            if byte == ins {
                debug!("received ack");
                return Ok(Procedure::Ack);
            }
            if byte == NULL_PROCEDURE_BYTE {
                debug!("NULL procedure byte, card busy");
                continue;
            }

            let sw2 = self.read(serial, Phase::StatusWordTail)?.ok_or_else(|| {
                error!("no SW2 after SW1 {:#04x}", byte);
                Error::Timeout(Phase::StatusWordTail)
            })?;
            if let Some(extra) = self.read(serial, Phase::StatusWordTail)? {
                error!("expected nothing after SW1 SW2, got {:#04x}", extra);
                return Err(Error::TrailingByte(extra));
            }
            return Ok(Procedure::Status(StatusWord::new(byte, sw2)));
        }
    }

    /// Read the response. Stops at the expected count or the first silent
    /// deadline; only an open-ended read may come up short.
    pub fn receive(&self, serial: &mut dyn SerialLine, expected: ExpectedLength) -> Result<Vec<u8>> {
        let target = expected.receive_count();
        let status_only = expected.is_status_only();

        let mut response = Vec::new();
        response
            .try_reserve(target.min(self.capacity))
            .map_err(|_| {
                error!("failed to allocate response buffer");
                Error::BufferExhausted {
                    capacity: self.capacity,
                }
            })?;

        while response.len() < target {
            let phase = if response.is_empty() {
                Phase::FirstResponseByte
            } else {
                Phase::ResponseByte
            };
            let Some(byte) = self.read(serial, phase)? else {
                break;
            };
            if status_only && byte == NULL_PROCEDURE_BYTE {
                continue;
            }
            if response.len() == self.capacity {
                error!("response exceeds buffer capacity {}", self.capacity);
                return Err(Error::BufferExhausted {
                    capacity: self.capacity,
                });
            }
            response.push(byte);
        }

        if let ExpectedLength::Exact(n) = expected {
            if response.len() != n {
                error!("response invalid, received {} bytes", response.len());
                return Err(Error::ResponseLength {
                    expected: n,
                    actual: response.len(),
                });
            }
        }
        Ok(response)
    }

    fn read(&self, serial: &mut dyn SerialLine, phase: Phase) -> Result<Option<u8>> {
        serial.read_byte(self.timeouts.for_phase(phase))
    }
}

/// A [`Transceiver`] bound to the line it talks over.
pub struct Link<'a> {
    transceiver: &'a Transceiver,
    serial: &'a mut dyn SerialLine,
}

impl Exchange for Link<'_> {
    fn exchange(&mut self, command: &[u8]) -> Result<Vec<u8>> {
        self.transceiver.exchange(&mut *self.serial, command)
    }
}
