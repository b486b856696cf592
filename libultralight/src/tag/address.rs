// libultralight-rs/libultralight/src/tag/address.rs
//! Linear page index to (sector, tag address) translation for NTAG I2C.
//!
//! NTAG I2C tags expose their memory as up to four 256-page sectors. The
//! poller reads them as one contiguous linear range; each variant below
//! lists the regions of that range in order.

use super::TagType;

/// Physical location of a linear page on an NTAG I2C tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagAddress {
    pub sector: u8,
    /// Page address inside `sector`
    pub address: u8,
    /// Pages left in the same region after `address`
    pub pages_left: u16,
}

/// One contiguous linear range mapped onto a sector.
#[derive(Debug, Clone, Copy)]
struct Region {
    first: u16,
    last: u16,
    sector: u8,
    base: u8,
}

const fn region(first: u16, last: u16, sector: u8, base: u8) -> Region {
    Region {
        first,
        last,
        sector,
        base,
    }
}

// 0 - 226: user memory
// 227 - 228: config registers (0xE8)
// 229 - 230: session registers (sector 3, 0xF8)
const NTAG_I2C_1K: &[Region] = &[
    region(0, 226, 0, 0x00),
    region(227, 228, 0, 0xE8),
    region(229, 230, 3, 0xF8),
];

// 0 - 480: user memory over sectors 0 and 1
// 481 - 482: config registers (sector 1, 0xE8)
// 483 - 484: session registers (sector 3, 0xF8)
const NTAG_I2C_2K: &[Region] = &[
    region(0, 255, 0, 0x00),
    region(256, 480, 1, 0x00),
    region(481, 482, 1, 0xE8),
    region(483, 484, 3, 0xF8),
];

// 0 - 231: user memory, dynamic lock, AUTH0/ACCESS/PWD/PACK, PT_I2C
// 232 - 233: config registers (0xE8)
// 234 - 235: session registers (0xEC)
const NTAG_I2C_PLUS_1K: &[Region] = &[
    region(0, 231, 0, 0x00),
    region(232, 233, 0, 0xE8),
    region(234, 235, 0, 0xEC),
];

// Plus 1K layout followed by the whole of sector 1
const NTAG_I2C_PLUS_2K: &[Region] = &[
    region(0, 231, 0, 0x00),
    region(232, 233, 0, 0xE8),
    region(234, 235, 0, 0xEC),
    region(236, 491, 1, 0x00),
];

fn layout(tag_type: TagType) -> Option<&'static [Region]> {
    match tag_type {
        TagType::NtagI2c1k => Some(NTAG_I2C_1K),
        TagType::NtagI2c2k => Some(NTAG_I2C_2K),
        TagType::NtagI2cPlus1k => Some(NTAG_I2C_PLUS_1K),
        TagType::NtagI2cPlus2k => Some(NTAG_I2C_PLUS_2K),
        _ => None,
    }
}

/// Translate a linear page index. Returns `None` for tags without sectors
/// and for indices past the end of the layout.
pub fn translate(tag_type: TagType, linear: usize) -> Option<TagAddress> {
    let linear = u16::try_from(linear).ok()?;
    let region = layout(tag_type)?
        .iter()
        .find(|r| (r.first..=r.last).contains(&linear))?;
    let offset = linear - region.first;
    Some(TagAddress {
        sector: region.sector,
        address: region.base.checked_add(u8::try_from(offset).ok()?)?,
        pages_left: region.last - linear,
    })
}
