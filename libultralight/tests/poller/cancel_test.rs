use libultralight::Error;
use libultralight::constants::CMD_READ_PAGE;
use libultralight::poller::{Flow, Poller, PollerEvent, PollerState};
use libultralight::tag::TagType;
use libultralight::test_support::EmulatedTag;

use crate::common::init_logger;

#[test]
fn stop_from_auth_request_cancels_scan() {
    init_logger();
    let mut tag = EmulatedTag::new(TagType::Ntag216);
    let mut poller = Poller::new();
    let mut successes = 0;

    let result = poller.run(&mut tag, |event| match event {
        PollerEvent::AuthRequest(_) => Flow::Stop,
        PollerEvent::ReadSuccess(_) => {
            successes += 1;
            Flow::Continue
        }
        _ => Flow::Continue,
    });

    assert!(matches!(result, Err(Error::Cancelled)));
    assert_eq!(successes, 0);
    assert_eq!(poller.state(), PollerState::Idle);
    assert_eq!(tag.count_commands(CMD_READ_PAGE), 0);
    assert_eq!(tag.halts(), 1);
}

#[test]
fn stop_handle_from_another_thread() {
    init_logger();
    let mut tag = EmulatedTag::new(TagType::Ntag215);
    let mut poller = Poller::new();
    let handle = poller.stop_handle();

    std::thread::spawn(move || handle.request_stop())
        .join()
        .unwrap();

    let result = poller.run(&mut tag, |_| Flow::Continue);
    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(tag.commands().is_empty());
    assert_eq!(tag.halts(), 1);
}

#[test]
fn scan_after_cancel_runs_from_scratch() {
    init_logger();
    let mut tag = EmulatedTag::new(TagType::Ul11);
    let mut poller = Poller::new();
    poller.stop_handle().request_stop();
    assert!(poller.run(&mut tag, |_| Flow::Continue).is_err());

    poller.run(&mut tag, |_| Flow::Continue).unwrap();
    assert_eq!(poller.snapshot().pages_read(), 20);
}
