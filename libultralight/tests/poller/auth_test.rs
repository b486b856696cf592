use libultralight::constants::CMD_PWD_AUTH;
use libultralight::poller::{AuthDecision, PollerState, Step};
use libultralight::tag::TagType;
use libultralight::test_support::EmulatedTag;

use crate::common::fixtures;
use crate::common::{Seen, scan};

#[test]
fn default_password_recovered_after_skipped_auth() {
    let mut tag = EmulatedTag::new(TagType::Ul11).with_password(
        fixtures::default_password(),
        fixtures::sample_pack(),
        0xFF,
    );
    let (result, seen, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();

    // the caller skipped, so no auth outcome event
    assert_eq!(seen, vec![Seen::AuthRequest, Seen::ReadSuccess]);
    assert_eq!(tag.count_commands(CMD_PWD_AUTH), 1);

    let snap = poller.snapshot();
    let cfg = snap.config().unwrap();
    assert_eq!(cfg.access.authlim(), 0);
    assert_eq!(cfg.password, fixtures::default_password());
    assert_eq!(cfg.pack, fixtures::sample_pack());
    assert!(snap.is_all_data_read());
    assert!(poller.auth_context().success);
    assert!(poller.auth_context().skip);
}

#[test]
fn explicit_password_unlocks_protected_pages() {
    let mut tag = fixtures::locked_ntag213(0x08);
    let (result, seen, poller) = scan(
        &mut tag,
        AuthDecision::Password(fixtures::sample_password()),
    );
    result.unwrap();

    assert_eq!(
        seen,
        vec![
            Seen::AuthRequest,
            Seen::AuthSuccess(fixtures::sample_pack()),
            Seen::ReadSuccess
        ]
    );
    let snap = poller.snapshot();
    assert_eq!(snap.pages_read(), 45);
    let cfg = snap.config().unwrap();
    assert_eq!(cfg.auth0, 0x08);
    assert_eq!(cfg.password, fixtures::sample_password());
    assert_eq!(cfg.pack, fixtures::sample_pack());
    // success copies the credentials, no second attempt
    assert_eq!(tag.count_commands(CMD_PWD_AUTH), 1);
    assert!(snap.is_all_data_read());
}

#[test]
fn wrong_password_halts_and_degrades() {
    let mut tag = fixtures::locked_ntag213(0x10);
    let halts_before = tag.halts();
    let (result, seen, poller) = scan(
        &mut tag,
        AuthDecision::Password(fixtures::default_password()),
    );
    result.unwrap();

    assert_eq!(
        seen,
        vec![Seen::AuthRequest, Seen::AuthFailed, Seen::ReadSuccess]
    );
    // auth failure + terminal
    assert_eq!(tag.halts() - halts_before, 2);
    let snap = poller.snapshot();
    assert_eq!(snap.pages_read(), 0x10);
    assert_eq!(snap.config().unwrap().auth0, 0x10);
    assert!(!poller.auth_context().success);
}

#[test]
fn default_password_not_tried_when_authlim_set() {
    let mut tag = EmulatedTag::new(TagType::Ul21)
        .with_access(libultralight::tag::Access(0x03));
    let (result, _, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();
    assert_eq!(tag.count_commands(CMD_PWD_AUTH), 0);
    assert_eq!(poller.snapshot().config().unwrap().access.authlim(), 3);
    assert!(!poller.snapshot().is_all_data_read());
}

#[test]
fn default_password_attempt_can_be_disabled() {
    use libultralight::poller::{Flow, Poller, PollerConfig};

    let mut tag = EmulatedTag::new(TagType::Ntag215);
    let mut poller = Poller::with_config(PollerConfig::default().with_try_default_password(false));
    poller.run(&mut tag, |_| Flow::Continue).unwrap();
    assert_eq!(tag.count_commands(CMD_PWD_AUTH), 0);
}

#[test]
fn unanswered_auth_request_defaults_to_skip() {
    let mut tag = fixtures::locked_ntag213(0x10);
    let mut poller = libultralight::poller::Poller::new();

    let mut requested = false;
    loop {
        match poller.tick(&mut tag) {
            Step::AuthRequested => {
                requested = true;
                assert_eq!(poller.state(), PollerState::Auth);
            }
            Step::Continue => {}
            Step::ReadSucceeded => break,
            other => panic!("unexpected step {other:?}"),
        }
    }
    assert!(requested);
    assert!(poller.auth_context().skip);
    // only the default password attempt reached the tag
    assert_eq!(tag.count_commands(CMD_PWD_AUTH), 1);
    assert_eq!(poller.state(), PollerState::Idle);
}
