// libultralight-rs/libultralight/src/tag/mod.rs

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Version;

pub mod address;
pub mod config;
pub mod features;
mod snapshot;

pub use address::{TagAddress, translate};
pub use config::{Access, ConfigPages};
pub use features::FeatureSet;
pub use snapshot::TagSnapshot;

/// Members of the Ultralight family the poller can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TagType {
    /// Original MIFARE Ultralight (no GET_VERSION)
    Origin,
    Ntag203,
    Ul11,
    Ul21,
    Ntag213,
    Ntag215,
    Ntag216,
    NtagI2c1k,
    NtagI2c2k,
    NtagI2cPlus1k,
    NtagI2cPlus2k,
}

impl TagType {
    pub const ALL: [TagType; 11] = [
        TagType::Origin,
        TagType::Ntag203,
        TagType::Ul11,
        TagType::Ul21,
        TagType::Ntag213,
        TagType::Ntag215,
        TagType::Ntag216,
        TagType::NtagI2c1k,
        TagType::NtagI2c2k,
        TagType::NtagI2cPlus1k,
        TagType::NtagI2cPlus2k,
    ];

    /// Resolve the tag type from a GET_VERSION response.
    ///
    /// NTAG I2C share storage sizes with NTAG216, so the I2C subtype check
    /// has to run before the plain 0x13 match.
    pub fn from_version(version: &Version) -> Self {
        match version.storage_size {
            0x0B | 0x00 => TagType::Ul11,
            0x0E => TagType::Ul21,
            0x0F => TagType::Ntag213,
            0x11 => TagType::Ntag215,
            size if version.prod_subtype == 0x05 && version.prod_ver_major == 0x02 => {
                match (version.prod_ver_minor, size) {
                    (0x01, 0x13) => TagType::NtagI2c1k,
                    (0x01, 0x15) => TagType::NtagI2c2k,
                    (0x02, 0x13) => TagType::NtagI2cPlus1k,
                    (0x02, 0x15) => TagType::NtagI2cPlus2k,
                    _ => TagType::Origin,
                }
            }
            0x13 => TagType::Ntag216,
            _ => TagType::Origin,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TagType::Origin => "Mifare Ultralight",
            TagType::Ntag203 => "NTAG203",
            TagType::Ul11 => "Mifare Ultralight 11",
            TagType::Ul21 => "Mifare Ultralight 21",
            TagType::Ntag213 => "NTAG213",
            TagType::Ntag215 => "NTAG215",
            TagType::Ntag216 => "NTAG216",
            TagType::NtagI2c1k => "NTAG I2C 1K",
            TagType::NtagI2c2k => "NTAG I2C 2K",
            TagType::NtagI2cPlus1k => "NTAG I2C Plus 1K",
            TagType::NtagI2cPlus2k => "NTAG I2C Plus 2K",
        }
    }

    pub fn is_ntag_i2c(&self) -> bool {
        matches!(
            self,
            TagType::NtagI2c1k
                | TagType::NtagI2c2k
                | TagType::NtagI2cPlus1k
                | TagType::NtagI2cPlus2k
        )
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
