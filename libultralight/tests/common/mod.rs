// Shared helpers for integration tests. Each aggregator pulls this in via
// `#[path]`, so not every helper is used by every test crate.
#![allow(dead_code)]


use libultralight::ErrorKind;
use libultralight::Result;
use libultralight::poller::{AuthDecision, Flow, Poller, PollerEvent};
use libultralight::test_support::EmulatedTag;
use libultralight::types::Pack;

/// Owned record of a `PollerEvent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
    AuthRequest,
    AuthSuccess(Pack),
    AuthFailed,
    ReadSuccess,
    ReadFailed(ErrorKind),
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Run one scan over `tag`, answering any auth request with `decision`.
pub fn scan(tag: &mut EmulatedTag, decision: AuthDecision) -> (Result<()>, Vec<Seen>, Poller) {
    init_logger();
    let mut poller = Poller::new();
    let mut seen = Vec::new();
    let result = poller.run(tag, |event| {
        seen.push(match event {
            PollerEvent::AuthRequest(answer) => {
                *answer = decision;
                Seen::AuthRequest
            }
            PollerEvent::AuthSuccess { pack } => Seen::AuthSuccess(pack),
            PollerEvent::AuthFailed => Seen::AuthFailed,
            PollerEvent::ReadSuccess(_) => Seen::ReadSuccess,
            PollerEvent::ReadFailed(err) => Seen::ReadFailed(err.kind()),
        });
        Flow::Continue
    });
    (result, seen, poller)
}
