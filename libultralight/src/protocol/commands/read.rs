// libultralight-rs/libultralight/src/protocol/commands/read.rs

use crate::constants::CMD_READ_PAGE;

/// Encode READ (0x30). The tag answers with 16 bytes: the addressed page
/// and the three following ones, rolling over at the end of memory.
pub fn encode_read(page: u8) -> Vec<u8> {
    vec![CMD_READ_PAGE, page]
}
