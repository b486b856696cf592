// libultralight-rs/libultralight/src/protocol/commands/mod.rs

pub mod auth;
pub mod info;
pub mod read;
pub mod sector;
pub mod write;

pub use auth::encode_pwd_auth;
pub use info::{
    encode_check_tearing_flag, encode_get_version, encode_read_counter, encode_read_signature,
};
pub use read::encode_read;
pub use sector::{encode_sector_select, encode_sector_select_target};
pub use write::encode_write;

use crate::types::{Page, Password};

/// How the tag signals that a command was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    /// A regular CRC-protected data frame.
    Data,
    /// A 4-bit ACK nibble. The transport reports it as a wrong CRC.
    Ack,
    /// No answer at all. The transport reports it as a timeout.
    Silence,
}

/// High-level Command enum. New commands should be added here and
/// their per-command encoder placed in `protocol::commands::<name>.rs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetVersion,
    Read { page: u8 },
    ReadSignature,
    ReadCounter { counter: u8 },
    CheckTearingFlag { flag: u8 },
    PwdAuth { password: Password },
    Write { page: u8, data: Page },
    SectorSelect,
    /// Second SECTOR_SELECT packet
    SectorSelectTarget { sector: u8 },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::GetVersion => "GET_VERSION",
            Self::Read { .. } => "READ",
            Self::ReadSignature => "READ_SIG",
            Self::ReadCounter { .. } => "READ_CNT",
            Self::CheckTearingFlag { .. } => "CHECK_TEARING_EVENT",
            Self::PwdAuth { .. } => "PWD_AUTH",
            Self::Write { .. } => "WRITE",
            Self::SectorSelect => "SECTOR_SELECT",
            Self::SectorSelectTarget { .. } => "SECTOR_SELECT(2)",
        }
    }

    pub fn expectation(&self) -> Expect {
        match self {
            Self::Write { .. } | Self::SectorSelect => Expect::Ack,
            Self::SectorSelectTarget { .. } => Expect::Silence,
            _ => Expect::Data,
        }
    }

    /// Encode the command into the raw frame (command code + params, no CRC).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::GetVersion => encode_get_version(),
            Self::Read { page } => encode_read(*page),
            Self::ReadSignature => encode_read_signature(),
            Self::ReadCounter { counter } => encode_read_counter(*counter),
            Self::CheckTearingFlag { flag } => encode_check_tearing_flag(*flag),
            Self::PwdAuth { password } => encode_pwd_auth(password),
            Self::Write { page, data } => encode_write(*page, data),
            Self::SectorSelect => encode_sector_select(),
            Self::SectorSelectTarget { sector } => encode_sector_select_target(*sector),
        }
    }
}
