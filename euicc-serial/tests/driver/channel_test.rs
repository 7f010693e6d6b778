#[path = "../common/mod.rs"]
mod common;

use common::fixtures;
use euicc_serial::interface::HostAdapter;
use euicc_serial::{ChannelId, Error, ErrorKind};

#[test]
fn open_selects_aid_on_assigned_channel() {
    let mut card = common::mock_card();
    let mut driver = common::connected_mock_driver(&mut card).unwrap();
    common::seed_open_channel(&mut card, 1);

    let aid = fixtures::isd_r_aid();
    let ch = driver.open_channel(&aid).unwrap();
    assert_eq!(ch.as_u8(), 1);

    let sent = card.sent();
    assert_eq!(sent[2], fixtures::bytes("00 70 00 00 01"));
    assert_eq!(sent[3], fixtures::bytes("01 A4 04 00 10"));
    assert_eq!(sent[4], aid);
    assert_eq!(driver.open_channels().collect::<Vec<_>>(), vec![ch]);
}

#[test]
fn select_header_carries_channel_three() {
    let mut card = common::mock_card();
    let mut driver = common::connected_mock_driver(&mut card).unwrap();
    common::seed_open_channel(&mut card, 3);

    driver.open_channel(&[0xAA, 0xBB]).unwrap();
    let select: Vec<u8> = card.sent()[3..].concat();
    assert_eq!(select, fixtures::bytes("03 A4 04 00 02 AA BB"));
}

#[test]
fn refused_manage_channel_is_a_channel_error() {
    let mut card = common::mock_card();
    let mut driver = common::connected_mock_driver(&mut card).unwrap();
    // card answers MANAGE CHANNEL with a bare status word
    card.push_reply(&[0x68, 0x81]);

    let err = driver.open_channel(&fixtures::isd_r_aid()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Channel);
    assert_eq!(driver.open_channels().count(), 0);
}

#[test]
fn refused_select_leaves_channel_unregistered() {
    let mut card = common::mock_card();
    let mut driver = common::connected_mock_driver(&mut card).unwrap();
    card.push_reply(&[0x70, 0x02, 0x90, 0x00]);
    card.push_reply(&[0x6A, 0x82]);

    let err = driver.open_channel(&fixtures::isd_r_aid()).unwrap_err();
    assert!(matches!(err, Error::ChannelStatus { sw1: 0x6A, sw2: 0x82 }));
    assert_eq!(driver.open_channels().count(), 0);
}

#[test]
fn closing_basic_channel_sends_nothing() {
    let mut card = common::mock_card();
    let mut driver = common::connected_mock_driver(&mut card).unwrap();
    let before = card.sent().len();

    driver.close_channel(ChannelId::BASIC);
    assert_eq!(card.sent().len(), before);
}

#[test]
fn close_is_best_effort() {
    let mut card = common::mock_card();
    let mut driver = common::connected_mock_driver(&mut card).unwrap();
    common::seed_open_channel(&mut card, 2);
    let ch = driver.open_channel(&fixtures::isd_r_aid()).unwrap();

    // no reply queued: the close times out and is still treated as done
    driver.close_channel(ch);
    assert_eq!(
        card.sent().last().unwrap(),
        &fixtures::bytes("02 70 80 FF 00")
    );
    assert_eq!(driver.open_channels().count(), 0);
    assert!(driver.is_ready());
}

#[test]
fn host_adapter_channel_lifecycle() {
    let mut card = common::mock_card();
    let driver = common::connected_mock_driver(&mut card).unwrap();
    let mut host = HostAdapter::new(driver);

    common::seed_open_channel(&mut card, 1);
    assert_eq!(host.logic_channel_open(&fixtures::isd_r_aid()), 1);

    card.push_reply(&[0x90, 0x00]);
    host.logic_channel_close(1);
    assert_eq!(
        card.sent().last().unwrap(),
        &fixtures::bytes("01 70 80 FF 00")
    );

    // channel number 0x70 from the card is not a valid channel
    card.push_reply(&[0x70, 0x70, 0x90, 0x00]);
    assert_eq!(host.logic_channel_open(&fixtures::isd_r_aid()), -1);
}
