// libultralight-rs/libultralight/src/protocol/commands/write.rs

use crate::constants::CMD_WRITE_PAGE;
use crate::types::Page;

/// Encode WRITE (0xA2)
/// Layout: command_code(1) + page(1) + data(4)
pub fn encode_write(page: u8, data: &Page) -> Vec<u8> {
    let mut buf = Vec::with_capacity(6);
    buf.push(CMD_WRITE_PAGE);
    buf.push(page);
    buf.extend_from_slice(data.as_bytes());
    buf
}
