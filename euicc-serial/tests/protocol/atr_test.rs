#[path = "../common/mod.rs"]
mod common;

use euicc_serial::driver::AtrListener;
use euicc_serial::transport::{MockCard, SerialLine};
use euicc_serial::types::Phase;
use euicc_serial::Error;

fn listen(card: &mut MockCard) -> euicc_serial::Result<euicc_serial::protocol::Atr> {
    let mut delay = card.clone();
    AtrListener::default().await_atr(card, &mut delay)
}

#[test]
fn t0_0x97_drains_two_interface_and_seven_historical() {
    let mut card = MockCard::new();
    card.push_rx(common::TEST_ATR);

    let atr = listen(&mut card).unwrap();
    assert_eq!(atr.interface_bytes, vec![0x96, 0x80]);
    assert_eq!(atr.historical_bytes.len(), 7);
    assert_eq!(atr.format.unwrap().interface_byte_count(), 2);
    assert!(atr.trailing.is_empty());
}

#[test]
fn all_interface_bytes_present() {
    let mut card = MockCard::new();
    card.push_rx(&[0x3B, 0xF1, 0x11, 0x22, 0x33, 0x00, 0x42]);

    let atr = listen(&mut card).unwrap();
    assert_eq!(atr.interface_bytes, vec![0x11, 0x22, 0x33, 0x00]);
    assert_eq!(atr.historical_bytes, vec![0x42]);
}

#[test]
fn leftover_noise_is_not_fatal() {
    let mut card = MockCard::new();
    card.push_rx(&[0x3B, 0x00, 0x55, 0x66]);

    let atr = listen(&mut card).unwrap();
    assert_eq!(atr.trailing, vec![0x55, 0x66]);
    assert_eq!(card.buffered_len().unwrap(), 0);
}

#[test]
fn missing_interface_byte_times_out() {
    let mut card = MockCard::new();
    card.push_rx(&[0x3B, 0x10]);
    assert!(matches!(
        listen(&mut card),
        Err(Error::Timeout(Phase::AtrInterface))
    ));
}
