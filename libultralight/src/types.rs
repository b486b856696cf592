// libultralight-rs/libultralight/src/types.rs

use std::convert::TryFrom;
use std::str::FromStr;

use derive_more::{From, Into};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    COUNTER_SIZE, PACK_SIZE, PAGE_SIZE, PASSWORD_SIZE, SIGNATURE_SIZE, TEARING_FLAG_DEFAULT,
    VERSION_SIZE,
};
use crate::Error;

/// UID - Newtype Pattern (4 / 7 / 10 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Uid {
    bytes: [u8; 10],
    len: u8,
}

impl Uid {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

impl TryFrom<&[u8]> for Uid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if !matches!(bytes.len(), 4 | 7 | 10) {
            return Err(Error::InvalidLength {
                expected: 7,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 10];
        arr[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: arr,
            len: bytes.len() as u8,
        })
    }
}

/// Identity established by the transport during anticollision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnticollisionData {
    pub uid: Uid,
    pub atqa: [u8; 2],
    pub sak: u8,
}

impl AnticollisionData {
    pub fn new(uid: Uid, atqa: [u8; 2], sak: u8) -> Self {
        Self { uid, atqa, sak }
    }
}

/// Page (4 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, From, Into)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Page([u8; PAGE_SIZE]);

impl Page {
    pub const fn from_bytes(bytes: [u8; PAGE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PAGE_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex_spaced(self.as_bytes())
    }
}

/// GET_VERSION response (8 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Version {
    pub header: u8,
    pub vendor_id: u8,
    pub prod_type: u8,
    pub prod_subtype: u8,
    pub prod_ver_major: u8,
    pub prod_ver_minor: u8,
    pub storage_size: u8,
    pub protocol_type: u8,
}

impl Version {
    pub fn from_bytes(b: [u8; VERSION_SIZE]) -> Self {
        Self {
            header: b[0],
            vendor_id: b[1],
            prod_type: b[2],
            prod_subtype: b[3],
            prod_ver_major: b[4],
            prod_ver_minor: b[5],
            storage_size: b[6],
            protocol_type: b[7],
        }
    }

    pub fn to_bytes(&self) -> [u8; VERSION_SIZE] {
        [
            self.header,
            self.vendor_id,
            self.prod_type,
            self.prod_subtype,
            self.prod_ver_major,
            self.prod_ver_minor,
            self.storage_size,
            self.protocol_type,
        ]
    }
}

/// Originality signature (32 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, From, Into)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Signature([u8; SIGNATURE_SIZE]);

impl Signature {
    pub fn from_bytes(bytes: [u8; SIGNATURE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }
}

/// One-way counter, 24-bit little endian as sent by the tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, From, Into)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Counter([u8; COUNTER_SIZE]);

impl Counter {
    pub fn from_bytes(bytes: [u8; COUNTER_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; COUNTER_SIZE] {
        &self.0
    }

    pub fn value(&self) -> u32 {
        u32::from_le_bytes([self.0[0], self.0[1], self.0[2], 0])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, From, Into)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TearingFlag(u8);

impl TearingFlag {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// `false` when the last counter increment was interrupted.
    pub fn is_intact(&self) -> bool {
        self.0 == TEARING_FLAG_DEFAULT
    }
}

impl Default for TearingFlag {
    fn default() -> Self {
        Self(TEARING_FLAG_DEFAULT)
    }
}

/// PWD_AUTH password (4 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, From, Into)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Password([u8; PASSWORD_SIZE]);

impl Password {
    pub const fn from_bytes(bytes: [u8; PASSWORD_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PASSWORD_SIZE] {
        &self.0
    }

    /// Big-endian numeric form, the way passwords are usually written down.
    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes(self.0)
    }
}

impl FromStr for Password {
    type Err = Error;

    /// Parse `"FFFFFFFF"` or `"ff ff ff ff"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = crate::utils::parse_hex(s).map_err(Error::Protocol)?;
        let arr: [u8; PASSWORD_SIZE] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| Error::InvalidLength {
                    expected: PASSWORD_SIZE,
                    actual: bytes.len(),
                })?;
        Ok(Self(arr))
    }
}

/// PWD_AUTH acknowledge (2 バイト)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, From, Into)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pack([u8; PACK_SIZE]);

impl Pack {
    pub const fn from_bytes(bytes: [u8; PACK_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; PACK_SIZE] {
        &self.0
    }
}
