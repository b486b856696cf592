// libultralight-rs/libultralight/src/tag/config.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_PAGES, PAGE_SIZE};
use crate::types::{Pack, Page, Password};

/// ACCESS configuration byte.
///
/// Bits: 0..=2 AUTHLIM, 3 NFC_CNT_PWD_PROT, 4 NFC_CNT_EN, 5 NFC_DIS_SEC1,
/// 6 CFGLCK, 7 PROT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Access(pub u8);

impl Access {
    const AUTHLIM_MASK: u8 = 0b0000_0111;
    const NFC_CNT_PWD_PROT: u8 = 1 << 3;
    const NFC_CNT_EN: u8 = 1 << 4;
    const NFC_DIS_SEC1: u8 = 1 << 5;
    const CFGLCK: u8 = 1 << 6;
    const PROT: u8 = 1 << 7;

    /// Failed password attempts allowed before lockout, 0 = unlimited.
    pub fn authlim(&self) -> u8 {
        self.0 & Self::AUTHLIM_MASK
    }

    /// `true`: AUTH0 protects reads and writes, `false`: writes only.
    pub fn prot(&self) -> bool {
        self.0 & Self::PROT != 0
    }

    pub fn set_prot(&mut self, prot: bool) {
        if prot {
            self.0 |= Self::PROT;
        } else {
            self.0 &= !Self::PROT;
        }
    }

    pub fn nfc_cnt_en(&self) -> bool {
        self.0 & Self::NFC_CNT_EN != 0
    }

    pub fn nfc_cnt_pwd_prot(&self) -> bool {
        self.0 & Self::NFC_CNT_PWD_PROT != 0
    }

    pub fn nfc_dis_sec1(&self) -> bool {
        self.0 & Self::NFC_DIS_SEC1 != 0
    }

    pub fn cfglck(&self) -> bool {
        self.0 & Self::CFGLCK != 0
    }
}

/// Parsed view of the four config pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigPages {
    pub mirror: u8,
    pub rfui1: u8,
    pub mirror_page: u8,
    /// First page protected by the password
    pub auth0: u8,
    pub access: Access,
    pub vctid: u8,
    pub rfui2: [u8; 2],
    pub password: Password,
    pub pack: Pack,
    pub rfui3: [u8; 2],
}

impl ConfigPages {
    pub fn from_pages(pages: &[Page; CONFIG_PAGES]) -> Self {
        let mut raw = [0u8; CONFIG_PAGES * PAGE_SIZE];
        for (chunk, page) in raw.chunks_exact_mut(PAGE_SIZE).zip(pages) {
            chunk.copy_from_slice(page.as_bytes());
        }
        Self {
            mirror: raw[0],
            rfui1: raw[1],
            mirror_page: raw[2],
            auth0: raw[3],
            access: Access(raw[4]),
            vctid: raw[5],
            rfui2: [raw[6], raw[7]],
            password: Password::from_bytes([raw[8], raw[9], raw[10], raw[11]]),
            pack: Pack::from_bytes([raw[12], raw[13]]),
            rfui3: [raw[14], raw[15]],
        }
    }

    pub fn to_pages(&self) -> [Page; CONFIG_PAGES] {
        let pw = self.password.as_bytes();
        let pack = self.pack.as_bytes();
        [
            Page::from_bytes([self.mirror, self.rfui1, self.mirror_page, self.auth0]),
            Page::from_bytes([self.access.0, self.vctid, self.rfui2[0], self.rfui2[1]]),
            Page::from_bytes(*pw),
            Page::from_bytes([pack[0], pack[1], self.rfui3[0], self.rfui3[1]]),
        ]
    }

    /// Whether `page` must be authenticated before it can be accessed in
    /// the given direction.
    pub fn is_page_protected(&self, page: usize, write: bool) -> bool {
        page >= self.auth0 as usize && (write || self.access.prot())
    }
}
