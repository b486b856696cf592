// libultralight-rs/libultralight/src/protocol/responses/auth.rs

use crate::constants::PACK_SIZE;
use crate::protocol::parser;
use crate::types::Pack;
use crate::{Error, Result};

/// Decode the PWD_AUTH answer. A reply of the wrong size means the tag did
/// not accept the password, so it is reported as an auth failure rather
/// than a framing error.
pub fn decode_pack(data: &[u8]) -> Result<Pack> {
    if data.len() != PACK_SIZE {
        return Err(Error::Auth(format!(
            "expected {PACK_SIZE} byte pack, got {}",
            data.len()
        )));
    }
    Ok(Pack::from_bytes(parser::array_at(data, 0)?))
}
