// Full scan against an in-memory tag
//
// Run with `RUST_LOG=debug cargo run --example scan_emulated` to see every
// state transition and frame.

use libultralight::prelude::*;
use libultralight::test_support::EmulatedTag;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let password: Password = "12345678".parse()?;
    let mut tag = EmulatedTag::new(TagType::Ntag215).with_password(
        password,
        Pack::from_bytes([0x80, 0x80]),
        0x20,
    );

    let mut poller = Poller::new();
    poller.run(&mut tag, |event| {
        match event {
            PollerEvent::AuthRequest(decision) => {
                println!("auth requested, sending {}", bytes_to_hex(password.as_bytes()));
                *decision = AuthDecision::Password(password);
            }
            PollerEvent::AuthSuccess { pack } => {
                println!("auth ok, PACK = {}", bytes_to_hex_spaced(pack.as_bytes()))
            }
            PollerEvent::AuthFailed => println!("auth failed"),
            PollerEvent::ReadSuccess(_) => println!("read complete"),
            PollerEvent::ReadFailed(err) => println!("read failed: {err}"),
        }
        Flow::Continue
    })?;

    let snap = poller.snapshot();
    println!("UID     : {}", snap.uid().to_hex());
    if let Some(t) = snap.tag_type() {
        println!("Type    : {t}");
    }
    if let Some(sig) = snap.signature() {
        println!("Sig     : {}", sig.to_hex());
    }
    println!("Pages   : {}/{}", snap.pages_read(), snap.pages_total());
    for (i, page) in snap.pages().iter().enumerate().take(8) {
        println!("  {i:3}: {}", page.to_hex());
    }
    if let Some(cfg) = snap.config() {
        println!(
            "AUTH0 = {:#04x}, PROT = {}, AUTHLIM = {}",
            cfg.auth0,
            cfg.access.prot(),
            cfg.access.authlim()
        );
    }
    Ok(())
}
