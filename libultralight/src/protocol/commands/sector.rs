// libultralight-rs/libultralight/src/protocol/commands/sector.rs
//! NTAG I2C SECTOR_SELECT. Two frames: the command packet, answered by a
//! bare ACK, then the target sector, answered by silence.

use crate::constants::{CMD_SECTOR_SELECT, SECTOR_SELECT_ARG};

pub fn encode_sector_select() -> Vec<u8> {
    vec![CMD_SECTOR_SELECT, SECTOR_SELECT_ARG]
}

/// Second packet: sector number followed by three RFU bytes.
pub fn encode_sector_select_target(sector: u8) -> Vec<u8> {
    vec![sector, 0x00, 0x00, 0x00]
}
