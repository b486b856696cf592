// libultralight-rs/libultralight/src/constants.rs
//! Common protocol constants used across the crate

/// Size of a single memory page in bytes
pub const PAGE_SIZE: usize = 4;

/// A READ command always returns four consecutive pages
pub const PAGES_PER_READ: usize = 4;

/// Largest page count of any supported tag (NTAG I2C Plus 2K)
pub const MAX_PAGE_NUM: usize = 492;

/// Command codes
pub const CMD_GET_VERSION: u8 = 0x60;
pub const CMD_READ_PAGE: u8 = 0x30;
pub const CMD_FAST_READ: u8 = 0x3A;
pub const CMD_SECTOR_SELECT: u8 = 0xC2;
pub const CMD_WRITE_PAGE: u8 = 0xA2;
pub const CMD_READ_SIG: u8 = 0x3C;
pub const CMD_READ_CNT: u8 = 0x39;
pub const CMD_CHECK_TEARING: u8 = 0x3E;
pub const CMD_PWD_AUTH: u8 = 0x1B;

/// 4-bit acknowledge nibble sent without CRC
pub const ACK: u8 = 0x0A;

/// Second byte of the first sector-select frame
pub const SECTOR_SELECT_ARG: u8 = 0xFF;

pub const VERSION_SIZE: usize = 8;
pub const SIGNATURE_SIZE: usize = 32;

pub const COUNTER_SIZE: usize = 3;
pub const COUNTER_NUM: usize = 3;
/// NTAG21x only implement the NFC counter in slot 2
pub const SINGLE_COUNTER_INDEX: usize = 2;

pub const TEARING_FLAG_NUM: usize = 3;
/// Value reported for a counter whose last increment was not torn
pub const TEARING_FLAG_DEFAULT: u8 = 0xBD;

pub const PASSWORD_SIZE: usize = 4;
pub const PACK_SIZE: usize = 2;
/// Factory password of EV1 / NTAG21x / NTAG I2C Plus tags
pub const DEFAULT_PASSWORD: [u8; PASSWORD_SIZE] = [0xFF, 0xFF, 0xFF, 0xFF];

/// Page that only exists on NTAG203 among the tags without GET_VERSION
pub const NTAG203_PROBE_PAGE: u8 = 41;

/// Number of config pages (AUTH0 .. PACK)
pub const CONFIG_PAGES: usize = 4;
