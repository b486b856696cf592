// libultralight-rs/libultralight/src/tag/features.rs

use bitflags::bitflags;

use super::TagType;

bitflags! {
    /// Commands and behaviours a tag type supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct FeatureSet: u16 {
        const READ_VERSION = 1 << 0;
        const READ_SIGNATURE = 1 << 1;
        const READ_COUNTER = 1 << 2;
        const CHECK_TEARING_FLAG = 1 << 3;
        const FAST_READ = 1 << 4;
        const INC_COUNTER = 1 << 5;
        const FAST_WRITE = 1 << 6;
        const COMPATIBLE_WRITE = 1 << 7;
        const PASSWORD_AUTH = 1 << 8;
        const VCSL = 1 << 9;
        const SECTOR_SELECT = 1 << 10;
        /// Only counter 2 exists (NTAG21x NFC counter)
        const SINGLE_COUNTER = 1 << 11;
        const ASCII_MIRROR = 1 << 12;
        /// NTAG203 keeps its counter in a regular page
        const COUNTER_IN_MEMORY = 1 << 13;
    }
}

const EV1: FeatureSet = FeatureSet::READ_VERSION
    .union(FeatureSet::READ_SIGNATURE)
    .union(FeatureSet::READ_COUNTER)
    .union(FeatureSet::CHECK_TEARING_FLAG)
    .union(FeatureSet::FAST_READ)
    .union(FeatureSet::INC_COUNTER)
    .union(FeatureSet::COMPATIBLE_WRITE)
    .union(FeatureSet::PASSWORD_AUTH)
    .union(FeatureSet::VCSL);

const NTAG21X: FeatureSet = FeatureSet::READ_VERSION
    .union(FeatureSet::READ_SIGNATURE)
    .union(FeatureSet::READ_COUNTER)
    .union(FeatureSet::FAST_READ)
    .union(FeatureSet::COMPATIBLE_WRITE)
    .union(FeatureSet::PASSWORD_AUTH)
    .union(FeatureSet::SINGLE_COUNTER)
    .union(FeatureSet::ASCII_MIRROR);

const NTAG_I2C: FeatureSet = FeatureSet::READ_VERSION
    .union(FeatureSet::FAST_READ)
    .union(FeatureSet::FAST_WRITE)
    .union(FeatureSet::SECTOR_SELECT);

const NTAG_I2C_PLUS: FeatureSet = NTAG_I2C
    .union(FeatureSet::READ_SIGNATURE)
    .union(FeatureSet::PASSWORD_AUTH);

impl TagType {
    pub fn features(&self) -> FeatureSet {
        match self {
            TagType::Origin => FeatureSet::COMPATIBLE_WRITE,
            TagType::Ntag203 => FeatureSet::COMPATIBLE_WRITE | FeatureSet::COUNTER_IN_MEMORY,
            TagType::Ul11 | TagType::Ul21 => EV1,
            TagType::Ntag213 | TagType::Ntag215 | TagType::Ntag216 => NTAG21X,
            TagType::NtagI2c1k | TagType::NtagI2c2k => NTAG_I2C,
            TagType::NtagI2cPlus1k | TagType::NtagI2cPlus2k => NTAG_I2C_PLUS,
        }
    }

    pub fn pages_total(&self) -> usize {
        match self {
            TagType::Origin => 16,
            TagType::Ntag203 => 42,
            TagType::Ul11 => 20,
            TagType::Ul21 => 41,
            TagType::Ntag213 => 45,
            TagType::Ntag215 => 135,
            TagType::Ntag216 => 231,
            TagType::NtagI2c1k => 231,
            TagType::NtagI2c2k => 485,
            TagType::NtagI2cPlus1k => 236,
            TagType::NtagI2cPlus2k => 492,
        }
    }

    /// First of the four config pages (AUTH0 .. PACK), for types that have them.
    pub fn config_page(&self) -> Option<usize> {
        match self {
            TagType::Ul11 => Some(0x10),
            TagType::Ul21 => Some(0x25),
            TagType::Ntag213 => Some(0x29),
            TagType::Ntag215 => Some(0x83),
            TagType::Ntag216 | TagType::NtagI2cPlus1k | TagType::NtagI2cPlus2k => Some(0xE3),
            _ => None,
        }
    }

    pub fn supports(&self, feature: FeatureSet) -> bool {
        self.features().contains(feature)
    }

    /// PWD and PACK pages. Tags always read them back as zeros.
    pub fn is_pwd_or_pack_page(&self, page: usize) -> bool {
        self.config_page()
            .is_some_and(|first| page == first + 2 || page == first + 3)
    }
}
