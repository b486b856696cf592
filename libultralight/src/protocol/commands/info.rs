// libultralight-rs/libultralight/src/protocol/commands/info.rs
//! Read-only metadata commands: version, signature, counters, tearing flags.

use crate::constants::{CMD_CHECK_TEARING, CMD_GET_VERSION, CMD_READ_CNT, CMD_READ_SIG};

pub fn encode_get_version() -> Vec<u8> {
    vec![CMD_GET_VERSION]
}

/// READ_SIG takes a single RFU address byte, always 0x00.
pub fn encode_read_signature() -> Vec<u8> {
    vec![CMD_READ_SIG, 0x00]
}

pub fn encode_read_counter(counter: u8) -> Vec<u8> {
    vec![CMD_READ_CNT, counter]
}

pub fn encode_check_tearing_flag(flag: u8) -> Vec<u8> {
    vec![CMD_CHECK_TEARING, flag]
}
