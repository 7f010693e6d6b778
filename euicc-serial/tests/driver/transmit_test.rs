#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use euicc_serial::interface::HostAdapter;
use euicc_serial::transport::{EchoFault, MockCard};
use euicc_serial::types::Phase;
use euicc_serial::{Error, ErrorKind};

fn ready_card() -> (MockCard, euicc_serial::driver::Driver<euicc_serial::driver::Initialized>) {
    let mut card = common::mock_card();
    let driver = common::connected_mock_driver(&mut card).unwrap();
    (card, driver)
}

/// Writes issued after connect.
fn session_writes(card: &MockCard) -> Vec<Vec<u8>> {
    card.sent().split_off(2)
}

#[test]
fn le_five_reads_seven_bytes() {
    let (mut card, mut driver) = ready_card();
    card.push_reply(&fixtures::bytes("B0 01 02 03 04 05 90 00"));

    let resp = driver.transmit(&fixtures::read_binary_le5()).unwrap();
    assert_eq!(resp, fixtures::bytes("01 02 03 04 05 90 00"));
    assert_eq!(session_writes(&card), vec![fixtures::read_binary_le5()]);
}

#[test]
fn body_without_le_expects_status_only() {
    let (mut card, mut driver) = ready_card();
    card.push_reply(&[0xD6]);
    card.push_reply(&[0x90, 0x00]);

    let resp = driver.transmit(&fixtures::update_binary_lc3()).unwrap();
    assert_eq!(resp, vec![0x90, 0x00]);
    assert_eq!(
        session_writes(&card),
        vec![fixtures::bytes("00 D6 00 00 03"), fixtures::bytes("01 02 03")]
    );
}

#[test]
fn early_status_skips_body() {
    let (mut card, mut driver) = ready_card();
    card.push_reply(&[0x6A, 0x82]);

    let resp = driver.transmit(&fixtures::update_binary_lc3()).unwrap();
    assert_eq!(resp, vec![0x6A, 0x82]);
    assert_eq!(session_writes(&card).len(), 1);
}

#[test]
fn byte_after_status_word_is_rejected() {
    let (mut card, mut driver) = ready_card();
    card.push_reply(&[0x6A, 0x82, 0x00]);

    let err = driver.transmit(&fixtures::read_binary_le5()).unwrap_err();
    assert!(matches!(err, Error::TrailingByte(0x00)));
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[test]
fn null_bytes_before_ack_are_skipped() {
    let (mut card, mut driver) = ready_card();
    card.push_reply(&fixtures::bytes("60 60 60 B0 AA BB CC DD EE 90 00"));

    let resp = driver.transmit(&fixtures::read_binary_le5()).unwrap();
    assert_eq!(resp, fixtures::bytes("AA BB CC DD EE 90 00"));
}

#[test]
fn null_bytes_while_waiting_for_status_are_skipped() {
    let (mut card, mut driver) = ready_card();
    card.push_reply(&[0xD6]);
    card.push_reply(&[0x60, 0x60, 0x90, 0x00]);

    let resp = driver.transmit(&fixtures::update_binary_lc3()).unwrap();
    assert_eq!(resp, vec![0x90, 0x00]);
}

#[test]
fn open_ended_read_stops_when_card_goes_quiet() {
    let (mut card, mut driver) = ready_card();
    let mut reply = vec![0xB0];
    reply.extend(1..=20u8);
    reply.extend([0x90, 0x00]);
    card.push_reply(&reply);

    let resp = driver.transmit(&fixtures::read_binary_open_ended()).unwrap();
    assert_eq!(resp.len(), 22);
    assert_eq!(&resp[20..], &[0x90, 0x00]);
}

#[test]
fn case_four_with_zero_le_reads_everything() {
    let (mut card, mut driver) = ready_card();
    card.push_reply(&[0xE2]);
    card.push_reply(&fixtures::bytes("BF 3E 12 5A 10 89 04 90 00"));

    let resp = driver.transmit(&fixtures::get_eid_command()).unwrap();
    assert_eq!(resp, fixtures::bytes("BF 3E 12 5A 10 89 04 90 00"));
}

#[test]
fn short_response_is_a_length_error() {
    let (mut card, mut driver) = ready_card();
    card.push_reply(&fixtures::bytes("B0 01 02 90 00"));

    match driver.transmit(&fixtures::read_binary_le5()) {
        Err(Error::ResponseLength { expected, actual }) => {
            assert_eq!((expected, actual), (7, 4));
        }
        other => panic!("expected length error, got {:?}", other),
    }
}

#[test]
fn corrupted_header_echo_fails_transmission() {
    let (mut card, mut driver) = ready_card();
    card.set_echo_fault(EchoFault::Flip { index: 1, mask: 0x04 });
    card.push_reply(&[0x90, 0x00]);

    let err = driver.transmit(&fixtures::read_binary_le5()).unwrap_err();
    assert!(matches!(
        err,
        Error::EchoMismatch {
            phase: Phase::HeaderEcho,
            index: 1,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Transmission);
}

#[test]
fn missing_ack_times_out() {
    let (_card, mut driver) = ready_card();
    let err = driver.transmit(&fixtures::read_binary_le5()).unwrap_err();
    assert!(matches!(err, Error::Timeout(Phase::ProcedureByte)));
}

#[test]
fn commands_shorter_than_a_header_are_rejected() {
    let (card, mut driver) = ready_card();
    let err = driver.transmit(&[0x00, 0xA4, 0x04]).unwrap_err();
    assert!(matches!(
        err,
        Error::CommandTooShort {
            expected: 5,
            actual: 3
        }
    ));
    assert_eq!(session_writes(&card).len(), 0);
}

#[test]
fn host_adapter_maps_failure_to_sentinel() {
    let (mut card, driver) = ready_card();
    let mut host = HostAdapter::new(driver);
    card.push_reply(&fixtures::bytes("B0 01 02 03 04 05 90 00"));

    assert_eq!(
        host.transmit(&fixtures::read_binary_le5()),
        Ok(fixtures::bytes("01 02 03 04 05 90 00"))
    );
    assert_eq!(host.transmit(&fixtures::read_binary_le5()), Err(-1));
}

#[test]
fn transmit_after_disconnect_is_refused() {
    let (card, mut driver) = ready_card();
    driver.disconnect().unwrap();
    assert!(matches!(
        driver.transmit(&fixtures::read_binary_le5()),
        Err(Error::NotConnected)
    ));
    assert_eq!(session_writes(&card).len(), 0);
}
