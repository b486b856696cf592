// libultralight-rs/libultralight/src/protocol/commands/auth.rs

use crate::constants::CMD_PWD_AUTH;
use crate::types::Password;

/// Encode PWD_AUTH (0x1B) with the 4-byte password.
pub fn encode_pwd_auth(password: &Password) -> Vec<u8> {
    let mut buf = Vec::with_capacity(5);
    buf.push(CMD_PWD_AUTH);
    buf.extend_from_slice(password.as_bytes());
    buf
}
