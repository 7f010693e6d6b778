//! Walk through a full session against the simulated card: connect, open a
//! channel on the ISD-R, exchange one command and tear everything down.
//!
//! Usage:
//!   RUST_LOG=debug cargo run -p euicc-serial --example loopback_session

use euicc_serial::interface::HostAdapter;
use euicc_serial::test_support::{mock_card, seed_open_channel, seed_terminal_capabilities};
use euicc_serial::{DriverBuilder, Result, utils};

const ISD_R_AID: [u8; 16] = [
    0xA0, 0x00, 0x00, 0x05, 0x59, 0x10, 0x10, 0xFF, 0xFF, 0xFF, 0xFF, 0x89, 0x00, 0x00, 0x01, 0x00,
];

fn main() -> Result<()> {
    env_logger::init();

    let mut card = mock_card();
    seed_terminal_capabilities(&mut card);

    let driver = DriverBuilder::new()
        .with_serial(Box::new(card.clone()))
        .with_control_lines(Box::new(card.clone()))
        .with_delay(Box::new(card.clone()))
        .build()?
        .initialize()?;
    let mut host = HostAdapter::new(driver);
    println!("driver: {}", host.info());

    if host.connect() != 0 {
        println!("connect failed");
        return Ok(());
    }
    if let Some(atr) = host.inner().last_atr() {
        println!("ATR: {}", utils::bytes_to_hex_spaced(&atr.to_bytes()));
    }

    seed_open_channel(&mut card, 1);
    let channel = host.logic_channel_open(&ISD_R_AID);
    println!("channel: {}", channel);

    // GET EID on the new channel; the card ACKs the header, then answers
    card.push_reply(&[0xE2]);
    card.push_reply(&[0xBF, 0x3E, 0x12, 0x5A, 0x10, 0x89, 0x04, 0x90, 0x00]);
    let get_eid = [0x81, 0xE2, 0x91, 0x00, 0x06, 0xBF, 0x3E, 0x03, 0x5C, 0x01, 0x5A, 0x00];
    match host.transmit(&get_eid) {
        Ok(resp) => println!("response: {}", utils::bytes_to_hex_spaced(&resp)),
        Err(code) => println!("transmit failed: {}", code),
    }

    card.push_reply(&[0x90, 0x00]);
    host.logic_channel_close(1);
    host.disconnect();
    host.into_inner().shutdown()
}
