use libultralight::protocol::Command;
use libultralight::types::{Page, Password};

#[test]
fn frames_match_wire_format() {
    let cases: Vec<(Command, Vec<u8>)> = vec![
        (Command::GetVersion, hex::decode("60").unwrap()),
        (Command::Read { page: 0x29 }, hex::decode("3029").unwrap()),
        (Command::ReadSignature, hex::decode("3c00").unwrap()),
        (Command::ReadCounter { counter: 2 }, hex::decode("3902").unwrap()),
        (Command::CheckTearingFlag { flag: 0 }, hex::decode("3e00").unwrap()),
        (
            Command::PwdAuth {
                password: Password::from_bytes([0xFF; 4]),
            },
            hex::decode("1bffffffff").unwrap(),
        ),
        (
            Command::Write {
                page: 4,
                data: Page::from_bytes([0xE1, 0x10, 0x12, 0x00]),
            },
            hex::decode("a204e1101200").unwrap(),
        ),
        (Command::SectorSelect, hex::decode("c2ff").unwrap()),
        (
            Command::SectorSelectTarget { sector: 3 },
            hex::decode("03000000").unwrap(),
        ),
    ];
    for (cmd, expected) in cases {
        assert_eq!(cmd.encode(), expected, "{}", cmd.name());
    }
}
