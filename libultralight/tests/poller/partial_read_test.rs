use libultralight::ErrorKind;
use libultralight::constants::CMD_READ_PAGE;
use libultralight::poller::AuthDecision;
use libultralight::tag::TagType;
use libultralight::test_support::EmulatedTag;
use proptest::prelude::*;

use crate::common::fixtures;
use crate::common::{Seen, scan};

#[test]
fn read_failure_after_k_pages_is_partial_success() {
    let mut tag = EmulatedTag::new(TagType::Ntag213).fail_reads_from(16);
    let (result, seen, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();
    assert_eq!(seen.last(), Some(&Seen::ReadSuccess));

    let snap = poller.snapshot();
    assert_eq!(snap.pages_read(), 16);
    assert!(!snap.is_all_data_read());
    let cfg = snap.config().unwrap();
    assert_eq!(cfg.auth0, 16);
    assert!(cfg.access.prot());
}

#[test]
fn password_protected_tail_is_reported_as_protected() {
    let mut tag = fixtures::locked_ntag213(0x10);
    let (result, seen, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();
    assert_eq!(seen, vec![Seen::AuthRequest, Seen::ReadSuccess]);

    let snap = poller.snapshot();
    assert_eq!(snap.pages_read(), 0x10);
    let cfg = snap.config().unwrap();
    assert_eq!(cfg.auth0, 0x10);
    assert!(cfg.access.prot());
    // the default password was tried and rejected
    assert_eq!(cfg.password.as_u32(), 0);
    assert!(!poller.auth_context().success);
}

#[test]
fn zero_pages_read_is_failure() {
    let mut tag = EmulatedTag::new(TagType::Ul11).fail_reads_from(0);
    let (result, seen, poller) = scan(&mut tag, AuthDecision::Skip);

    assert_eq!(result.unwrap_err().kind(), ErrorKind::Timeout);
    assert_eq!(seen.last(), Some(&Seen::ReadFailed(ErrorKind::Timeout)));
    assert_eq!(poller.snapshot().pages_read(), 0);
    assert_eq!(tag.count_commands(CMD_READ_PAGE), 1);
}

#[test]
fn public_tag_partial_read_is_still_patched() {
    // EV1 with auth support but no protection configured
    let mut tag = EmulatedTag::new(TagType::Ul21).fail_reads_from(8);
    let (result, _, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();

    let cfg = poller.snapshot().config().unwrap();
    assert_eq!(cfg.auth0, 8);
    assert!(cfg.access.prot());
}

#[test]
fn partial_read_on_tag_without_auth_leaves_pages_alone() {
    let mut tag = EmulatedTag::new(TagType::Ntag203).fail_reads_from(20);
    let (result, _, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();
    let snap = poller.snapshot();
    assert_eq!(snap.pages_read(), 20);
    assert!(snap.config().is_none());
    assert!(snap.pages()[20..].iter().all(|p| p.as_bytes() == &[0; 4]));
}

proptest! {
    #[test]
    fn prop_partial_read_patches_auth0(blocks in 1usize..=11) {
        let k = blocks * 4;
        let mut tag = EmulatedTag::new(TagType::Ntag213).fail_reads_from(k);
        let (result, seen, poller) = scan(&mut tag, AuthDecision::Skip);
        prop_assert!(result.is_ok());
        prop_assert_eq!(seen.last(), Some(&Seen::ReadSuccess));

        let snap = poller.snapshot();
        prop_assert_eq!(snap.pages_read(), k);
        prop_assert!(snap.pages_read() <= snap.pages_total());
        let cfg = snap.config().unwrap();
        prop_assert_eq!(usize::from(cfg.auth0), k);
        prop_assert!(cfg.access.prot());
    }
}
