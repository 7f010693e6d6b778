// euicc-serial/src/transport/mock.rs

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use crate::config::SerialConfig;
use crate::transport::traits::{ControlLines, Delay, ReadOutcome, SerialLine};
use crate::types::Line;
use crate::{Error, Result};

/// Corruption applied to the loopback echo of the next write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoFault {
    /// XOR `mask` into echoed byte `index`
    Flip { index: usize, mask: u8 },
    /// Only the first `keep` bytes come back
    Truncate { keep: usize },
}

/// Everything the simulated card and its wiring remember.
#[derive(Debug, Default)]
pub struct CardState {
    pub rx: VecDeque<u8>,
    /// Released one per write, after the echo
    pub replies: VecDeque<Vec<u8>>,
    pub atr: Vec<u8>,
    pub sent: Vec<Vec<u8>>,
    pub loopback: bool,
    pub echo_fault: Option<EchoFault>,
    /// Accept at most this many bytes per write
    pub write_limit: Option<usize>,
    pub activation: bool,
    pub reset: bool,
    pub outputs_configured: bool,
    pub level_log: Vec<(Line, bool)>,
    pub delays: Vec<Duration>,
    pub read_timeouts: Vec<Duration>,
    pub flushes: usize,
    pub serial_config: Option<SerialConfig>,
    pub released: bool,
}

/// Simulated card on a loopback serial line, for unit tests.
///
/// One handle implements [`SerialLine`], [`ControlLines`] and [`Delay`];
/// clones share state so a test can keep a handle for inspection after the
/// driver has taken ownership of the others.
#[derive(Debug, Clone)]
pub struct MockCard {
    state: Rc<RefCell<CardState>>,
}

impl Default for MockCard {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCard {
    pub fn new() -> Self {
        let state = CardState {
            loopback: true,
            ..CardState::default()
        };
        Self {
            state: Rc::new(RefCell::new(state)),
        }
    }

    /// ATR emitted each time reset is released with the supply on.
    pub fn with_atr(mut self, atr: &[u8]) -> Self {
        self.set_atr(atr);
        self
    }

    pub fn set_atr(&mut self, atr: &[u8]) {
        self.state.borrow_mut().atr = atr.to_vec();
    }

    /// Queue what the card sends after the next unanswered write.
    pub fn push_reply(&mut self, reply: &[u8]) {
        self.state.borrow_mut().replies.push_back(reply.to_vec());
    }

    /// Put bytes straight into the receive buffer.
    pub fn push_rx(&mut self, bytes: &[u8]) {
        self.state.borrow_mut().rx.extend(bytes.iter().copied());
    }

    pub fn set_loopback(&mut self, on: bool) {
        self.state.borrow_mut().loopback = on;
    }

    pub fn set_echo_fault(&mut self, fault: EchoFault) {
        self.state.borrow_mut().echo_fault = Some(fault);
    }

    pub fn set_write_limit(&mut self, limit: usize) {
        self.state.borrow_mut().write_limit = Some(limit);
    }

    pub fn state(&self) -> Ref<'_, CardState> {
        self.state.borrow()
    }

    /// Each write as issued, in order.
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.state.borrow().sent.clone()
    }

    /// Every written byte, as one stream.
    pub fn sent_bytes(&self) -> Vec<u8> {
        self.state.borrow().sent.concat()
    }

    pub fn level(&self, line: Line) -> bool {
        let s = self.state.borrow();
        match line {
            Line::Activation => s.activation,
            Line::Reset => s.reset,
        }
    }

    pub fn pending_replies(&self) -> usize {
        self.state.borrow().replies.len()
    }
}

impl SerialLine for MockCard {
    fn configure(&mut self, config: &SerialConfig) -> Result<()> {
        self.state.borrow_mut().serial_config = Some(*config);
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        let mut s = self.state.borrow_mut();
        if s.released {
            return Err(Error::Hardware("serial line released".into()));
        }
        let accepted = s.write_limit.map_or(data.len(), |l| l.min(data.len()));
        let data = &data[..accepted];
        s.sent.push(data.to_vec());

        if s.loopback {
            let mut echo = data.to_vec();
            match s.echo_fault.take() {
                Some(EchoFault::Flip { index, mask }) => {
                    if let Some(b) = echo.get_mut(index) {
                        *b ^= mask;
                    }
                }
                Some(EchoFault::Truncate { keep }) => echo.truncate(keep),
                None => {}
            }
            s.rx.extend(echo);
        }
        if let Some(reply) = s.replies.pop_front() {
            s.rx.extend(reply);
        }
        Ok(accepted)
    }

    fn read(&mut self, len: usize, timeout: Duration) -> Result<ReadOutcome> {
        let mut s = self.state.borrow_mut();
        s.read_timeouts.push(timeout);
        let n = len.min(s.rx.len());
        let bytes: Vec<u8> = s.rx.drain(..n).collect();
        if n == len {
            Ok(ReadOutcome::Data(bytes))
        } else {
            Ok(ReadOutcome::TimedOut { partial: bytes })
        }
    }

    fn buffered_len(&self) -> Result<usize> {
        Ok(self.state.borrow().rx.len())
    }

    fn flush_input(&mut self) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.rx.clear();
        s.flushes += 1;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        self.state.borrow_mut().released = true;
        Ok(())
    }
}

impl ControlLines for MockCard {
    fn configure_outputs(&mut self) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.outputs_configured = true;
        s.activation = false;
        s.reset = false;
        Ok(())
    }

    fn set_level(&mut self, line: Line, high: bool) -> Result<()> {
        let mut s = self.state.borrow_mut();
        s.level_log.push((line, high));
        match line {
            Line::Activation => s.activation = high,
            Line::Reset => {
                let rising = high && !s.reset;
                s.reset = high;
                // card answers a reset release only while powered
                if rising && s.activation && !s.atr.is_empty() {
                    let atr = s.atr.clone();
                    s.rx.extend(atr);
                }
            }
        }
        Ok(())
    }
}

impl Delay for MockCard {
    fn delay(&mut self, duration: Duration) {
        self.state.borrow_mut().delays.push(duration);
    }
}
