#[path = "../common/mod.rs"]
mod common;

use euicc_serial::interface::HostAdapter;
use euicc_serial::transport::MockCard;
use euicc_serial::types::{Line, Phase};
use euicc_serial::utils::ms;
use euicc_serial::{Error, ErrorKind, SessionState};
use serial_test::serial;

#[test]
#[serial]
fn connect_runs_cold_reset_then_terminal_capabilities() -> anyhow::Result<()> {
    common::init_logger();
    let mut card = common::mock_card();
    let driver = common::connected_mock_driver(&mut card)?;

    assert_eq!(driver.session_state(), SessionState::Ready);
    let s = card.state();
    assert_eq!(
        s.level_log,
        vec![
            (Line::Reset, false),
            (Line::Activation, false),
            (Line::Activation, true),
            (Line::Reset, true),
        ]
    );
    assert_eq!(s.delays, vec![ms(100), ms(10), ms(500)]);
    assert_eq!(s.read_timeouts[0], ms(1000));
    drop(s);

    assert_eq!(
        card.sent_bytes(),
        common::fixtures::bytes("80 AA 00 00 0A A9 08 81 00 82 01 01 83 01 07")
    );
    Ok(())
}

#[test]
#[serial]
fn atr_is_kept_for_the_session() -> anyhow::Result<()> {
    common::init_logger();
    let mut card = common::mock_card();
    let driver = common::connected_mock_driver(&mut card)?;

    let atr = driver.last_atr().expect("ATR recorded");
    assert_eq!(atr.interface_bytes.len(), 2);
    assert_eq!(atr.historical_bytes.len(), 7);
    assert_eq!(atr.to_bytes(), common::TEST_ATR);
    Ok(())
}

#[test]
#[serial]
fn silent_card_times_out_after_one_attempt() {
    common::init_logger();
    let card = MockCard::new();
    let mut driver = common::mock_driver(&card).initialize().unwrap();

    let err = driver.connect().unwrap_err();
    assert!(matches!(err, Error::Timeout(Phase::AtrInitial)));
    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(card.state().read_timeouts, vec![ms(1000)]);
    assert_eq!(driver.session_state(), SessionState::Deactivated);
    assert!(!card.level(Line::Activation));
}

#[test]
#[serial]
fn malformed_atr_fails_and_retry_succeeds() {
    common::init_logger();
    let mut card = MockCard::new().with_atr(&[0x3F, 0x00]);
    let mut driver = common::mock_driver(&card).initialize().unwrap();

    let err = driver.connect().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert!(card.sent().is_empty());

    card.set_atr(common::TEST_ATR);
    common::seed_terminal_capabilities(&mut card);
    driver.connect().unwrap();
    assert!(driver.is_ready());
}

#[test]
fn disconnect_twice_leaves_lines_low() {
    let mut card = common::mock_card();
    let mut driver = common::connected_mock_driver(&mut card).unwrap();
    assert!(card.level(Line::Activation));

    driver.disconnect().unwrap();
    driver.disconnect().unwrap();
    assert!(!card.level(Line::Activation));
    assert!(!card.level(Line::Reset));
    assert_eq!(driver.session_state(), SessionState::Deactivated);
}

#[test]
fn host_adapter_reports_connect_outcome() {
    let card = MockCard::new();
    let mut host = HostAdapter::new(common::mock_driver(&card).initialize().unwrap());
    assert_eq!(host.connect(), -1);

    let mut card = common::mock_card();
    common::seed_terminal_capabilities(&mut card);
    let mut host = HostAdapter::new(common::mock_driver(&card).initialize().unwrap());
    assert_eq!(host.connect(), 0);
    host.disconnect();
    assert!(!card.level(Line::Activation));
}
