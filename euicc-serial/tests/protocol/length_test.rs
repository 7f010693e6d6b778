#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use euicc_serial::protocol::{CommandApdu, ExpectedLength};

fn expected(raw: &[u8]) -> ExpectedLength {
    CommandApdu::parse(raw).unwrap().expected_length()
}

#[test]
fn iso_case_table() {
    assert_eq!(expected(&fixtures::bytes("00 B0 00 00 00")), ExpectedLength::Undetermined);
    assert_eq!(expected(&fixtures::bytes("00 B0 00 00 05")), ExpectedLength::Exact(7));
    assert_eq!(expected(&fixtures::update_binary_lc3()), ExpectedLength::Exact(2));
    assert_eq!(
        expected(&fixtures::bytes("00 A4 04 00 02 3F 00 1C")),
        ExpectedLength::Exact(30)
    );
}

#[test]
fn undetermined_reads_up_to_sentinel() {
    assert_eq!(expected(&fixtures::get_eid_command()).receive_count(), 65535);
}

#[test]
fn extended_lengths() {
    assert_eq!(
        expected(&fixtures::bytes("00 B0 00 00 00 02 00")),
        ExpectedLength::Exact(514)
    );
    assert_eq!(
        expected(&fixtures::bytes("80 E2 91 00 00 00 02 AA BB")),
        ExpectedLength::Exact(2)
    );
    assert_eq!(
        expected(&fixtures::bytes("80 E2 91 00 00 00 02 AA BB 00 10")),
        ExpectedLength::Exact(18)
    );
}

#[test]
fn extended_marker_flags_command() {
    let apdu = CommandApdu::parse(&[0x80, 0xE2, 0x91, 0x00, 0x00, 0x00, 0x01, 0xAA]).unwrap();
    assert!(apdu.is_extended());
    let raw = fixtures::read_binary_le5();
    let short = CommandApdu::parse(&raw).unwrap();
    assert!(!short.is_extended());
}
