// libultralight-rs/libultralight/src/poller/config.rs

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PASSWORD;
use crate::types::Password;
use crate::utils::{SECTOR_SELECT_ACK_FWT_FC, STANDARD_FWT_FC};

/// Poller tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PollerConfig {
    /// Frame wait time for every command expecting an answer, in fc
    pub fwt_fc: u32,
    /// Silence window that confirms the second SECTOR_SELECT packet, in fc
    pub sector_select_fwt_fc: u32,
    /// Password tried after the bulk read when AUTHLIM allows it
    pub default_password: Password,
    pub try_default_password: bool,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            fwt_fc: STANDARD_FWT_FC,
            sector_select_fwt_fc: SECTOR_SELECT_ACK_FWT_FC,
            default_password: Password::from_bytes(DEFAULT_PASSWORD),
            try_default_password: true,
        }
    }
}

impl PollerConfig {
    pub fn with_fwt_fc(mut self, fwt_fc: u32) -> Self {
        self.fwt_fc = fwt_fc;
        self
    }

    pub fn with_sector_select_fwt_fc(mut self, fwt_fc: u32) -> Self {
        self.sector_select_fwt_fc = fwt_fc;
        self
    }

    pub fn with_default_password(mut self, password: Password) -> Self {
        self.default_password = password;
        self
    }

    pub fn with_try_default_password(mut self, enabled: bool) -> Self {
        self.try_default_password = enabled;
        self
    }
}
