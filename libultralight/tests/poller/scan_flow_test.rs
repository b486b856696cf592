use libultralight::constants::{
    CMD_CHECK_TEARING, CMD_GET_VERSION, CMD_PWD_AUTH, CMD_READ_CNT, CMD_READ_PAGE, CMD_READ_SIG,
};
use libultralight::poller::AuthDecision;
use libultralight::tag::{FeatureSet, TagType};
use libultralight::test_support::{EmulatedTag, pattern_page};
use libultralight::types::Counter;
use libultralight::{Error, ErrorKind};

use crate::common::fixtures;
use crate::common::{Seen, scan};

#[test]
fn ntag203_detected_by_probe_and_read_in_full() {
    let mut tag = EmulatedTag::new(TagType::Ntag203);
    let (result, seen, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();

    let snap = poller.snapshot();
    assert_eq!(snap.tag_type(), Some(TagType::Ntag203));
    assert!(!TagType::Ntag203.supports(FeatureSet::PASSWORD_AUTH));
    assert_eq!(seen, vec![Seen::ReadSuccess]);

    // version NAK, probe, then straight to the bulk read
    let cmds = tag.commands();
    assert_eq!(cmds[0], vec![CMD_GET_VERSION]);
    assert_eq!(cmds[1], vec![CMD_READ_PAGE, 41]);
    assert!(cmds[2..].iter().all(|c| c[0] == CMD_READ_PAGE));
    for code in [CMD_READ_SIG, CMD_READ_CNT, CMD_CHECK_TEARING, CMD_PWD_AUTH] {
        assert_eq!(tag.count_commands(code), 0, "{code:#04x}");
    }

    assert_eq!(snap.pages_read(), 42);
    assert_eq!(snap.pages_total(), 42);
    assert_eq!(snap.page(41), Some(&pattern_page(41)));
    assert!(snap.version().is_none());
    assert!(snap.is_all_data_read());
}

#[test]
fn origin_when_probe_fails() {
    let mut tag = EmulatedTag::new(TagType::Origin);
    let (result, _, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();

    let snap = poller.snapshot();
    assert_eq!(snap.tag_type(), Some(TagType::Origin));
    assert_eq!(snap.pages_read(), 16);
    assert_eq!(snap.pages(), &tag.pages()[..16]);
    // version NAK, probe NAK, terminal
    assert_eq!(tag.halts(), 3);
}

#[test]
fn ev1_reads_every_stage_in_order() {
    let mut tag = EmulatedTag::new(TagType::Ul11);
    let (result, seen, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();
    assert_eq!(seen, vec![Seen::AuthRequest, Seen::ReadSuccess]);

    let codes: Vec<u8> = tag.commands().iter().map(|c| c[0]).collect();
    assert_eq!(
        &codes[..8],
        &[
            CMD_GET_VERSION,
            CMD_READ_SIG,
            CMD_READ_CNT,
            CMD_READ_CNT,
            CMD_READ_CNT,
            CMD_CHECK_TEARING,
            CMD_CHECK_TEARING,
            CMD_CHECK_TEARING,
        ]
    );

    let snap = poller.snapshot();
    assert_eq!(snap.signature(), Some(tag.signature()));
    assert_eq!(snap.counter(0).map(Counter::value), Some(1));
    assert_eq!(snap.counter(2).map(Counter::value), Some(3));
    assert!(snap.tearing_flags().iter().all(|f| f.is_some_and(|f| f.is_intact())));
    assert_eq!(snap.pages_read(), 20);
    assert_eq!(snap.anticollision().uid.len(), 7);
}

#[test]
fn no_auth_request_without_auth_feature() {
    for tag_type in [TagType::Origin, TagType::Ntag203, TagType::NtagI2c1k] {
        let mut tag = EmulatedTag::new(tag_type);
        let (result, seen, _) = scan(&mut tag, AuthDecision::Password(fixtures::sample_password()));
        result.unwrap();
        assert!(!seen.contains(&Seen::AuthRequest), "{tag_type}");
        assert_eq!(tag.count_commands(CMD_PWD_AUTH), 0, "{tag_type}");
    }
}

#[test]
fn single_counter_type_reads_counter_two_once() {
    let mut tag = EmulatedTag::new(TagType::Ntag213)
        .with_access(fixtures::counter_enabled())
        .with_counter(2, Counter::from_bytes([0x2A, 0, 0]));
    let (result, _, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();

    assert_eq!(tag.count_commands(CMD_READ_CNT), 1);
    assert!(tag.commands().contains(&vec![CMD_READ_CNT, 2]));
    let snap = poller.snapshot();
    assert!(snap.counter(0).is_none());
    assert!(snap.counter(1).is_none());
    assert_eq!(snap.counter(2).map(Counter::value), Some(42));
    assert_eq!(snap.counters_configured(), Some(true));
}

#[test]
fn disabled_ntag_counter_is_tolerated() {
    // NFC_CNT_EN clear: the tag NAKs READ_CNT
    let mut tag = EmulatedTag::new(TagType::Ntag215);
    let (result, seen, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();

    assert_eq!(tag.count_commands(CMD_READ_CNT), 1);
    assert!(poller.snapshot().counters().iter().all(Option::is_none));
    assert_eq!(poller.snapshot().counters_configured(), Some(false));
    assert_eq!(seen.last(), Some(&Seen::ReadSuccess));
}

#[test]
fn counter_failure_skips_remaining_counters() {
    let mut tag = EmulatedTag::new(TagType::Ul21).fail_counters();
    let (result, _, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();

    assert_eq!(tag.count_commands(CMD_READ_CNT), 1);
    assert_eq!(tag.count_commands(CMD_CHECK_TEARING), 3);
    assert_eq!(poller.snapshot().pages_read(), 41);
}

#[test]
fn signature_failure_aborts_scan() {
    let mut tag = EmulatedTag::new(TagType::Ntag216).fail_signature();
    let (result, seen, poller) = scan(&mut tag, AuthDecision::Skip);

    assert!(matches!(result, Err(Error::Timeout)));
    assert_eq!(seen, vec![Seen::ReadFailed(ErrorKind::Timeout)]);
    assert_eq!(tag.count_commands(CMD_READ_PAGE), 0);
    assert_eq!(poller.snapshot().pages_read(), 0);
}

#[test]
fn tearing_flag_failure_aborts_scan() {
    let mut tag = EmulatedTag::new(TagType::Ul11).fail_tearing_flags();
    let (result, seen, _) = scan(&mut tag, AuthDecision::Skip);

    let err = result.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
    assert_eq!(seen, vec![Seen::ReadFailed(ErrorKind::Protocol)]);
    assert_eq!(tag.count_commands(CMD_PWD_AUTH), 0);
}

#[test]
fn tag_removed_before_scan() {
    let mut tag = EmulatedTag::new(TagType::Ntag213);
    tag.remove();
    let (result, seen, _) = scan(&mut tag, AuthDecision::Skip);
    // version and probe both see NotPresent, the first READ is fatal
    assert!(matches!(result, Err(Error::NotPresent)));
    assert_eq!(seen, vec![Seen::ReadFailed(ErrorKind::NotPresent)]);
}

#[test]
fn poller_is_reusable_after_terminal_state() {
    let mut tag = EmulatedTag::new(TagType::Ul11);
    let (first, _, mut poller) = scan(&mut tag, AuthDecision::Skip);
    first.unwrap();

    let mut ntag = EmulatedTag::new(TagType::Ntag213);
    poller
        .run(&mut ntag, |_| libultralight::poller::Flow::Continue)
        .unwrap();
    assert_eq!(poller.snapshot().tag_type(), Some(TagType::Ntag213));
    assert_eq!(poller.snapshot().pages_read(), 45);
}
