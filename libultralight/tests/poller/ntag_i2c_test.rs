use libultralight::constants::{CMD_READ_PAGE, CMD_SECTOR_SELECT};
use libultralight::poller::AuthDecision;
use libultralight::tag::TagType;
use libultralight::test_support::EmulatedTag;

use crate::common::fixtures;
use crate::common::scan;

fn sector_selects(tag: &EmulatedTag) -> Vec<u8> {
    // the packet after each SECTOR_SELECT carries the target sector
    let cmds = tag.commands();
    cmds.windows(2)
        .filter(|w| w[0] == [CMD_SECTOR_SELECT, 0xFF])
        .map(|w| w[1][0])
        .collect()
}

#[test]
fn every_layout_reads_whole_linear_memory() {
    for tag_type in fixtures::ntag_i2c_types() {
        let mut tag = EmulatedTag::new(tag_type);
        let (result, _, poller) = scan(&mut tag, AuthDecision::Skip);
        result.unwrap();

        let snap = poller.snapshot();
        assert_eq!(snap.tag_type(), Some(tag_type));
        assert_eq!(snap.pages_read(), tag_type.pages_total(), "{tag_type}");
        for (i, page) in snap.pages().iter().enumerate() {
            if tag_type.is_pwd_or_pack_page(i) {
                continue;
            }
            assert_eq!(Some(*page), tag.page(i), "{tag_type} page {i}");
        }
    }
}

#[test]
fn sector_select_only_on_sector_change() {
    let cases = [
        (TagType::NtagI2c1k, vec![3]),
        (TagType::NtagI2c2k, vec![1, 3]),
        (TagType::NtagI2cPlus1k, vec![]),
        (TagType::NtagI2cPlus2k, vec![1]),
    ];
    for (tag_type, expected) in cases {
        let mut tag = EmulatedTag::new(tag_type);
        let (result, _, _) = scan(&mut tag, AuthDecision::Skip);
        result.unwrap();
        assert_eq!(sector_selects(&tag), expected, "{tag_type}");
    }
}

#[test]
fn register_regions_are_read_in_two_page_bursts() {
    let mut tag = EmulatedTag::new(TagType::NtagI2c1k);
    let (result, _, _) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();

    let reads: Vec<u8> = tag
        .commands()
        .iter()
        .filter(|c| c[0] == CMD_READ_PAGE)
        .map(|c| c[1])
        .collect();
    // last user burst at 224 (3 pages), then config and session registers
    assert_eq!(&reads[reads.len() - 3..], &[224, 0xE8, 0xF8]);
}

#[test]
fn read_failure_after_sector_switch_is_partial() {
    let mut tag = EmulatedTag::new(TagType::NtagI2c2k).fail_reads_from(256);
    let (result, _, poller) = scan(&mut tag, AuthDecision::Skip);
    result.unwrap();
    assert_eq!(poller.snapshot().pages_read(), 256);
}
