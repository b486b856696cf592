// libultralight-rs/libultralight/src/protocol/responses/info.rs

use crate::constants::{COUNTER_SIZE, SIGNATURE_SIZE, VERSION_SIZE};
use crate::protocol::parser;
use crate::types::{Counter, Signature, TearingFlag, Version};
use crate::Result;

/// Decode GET_VERSION response (8 bytes)
pub fn decode_version(data: &[u8]) -> Result<Version> {
    parser::ensure_exact(data, VERSION_SIZE)?;
    Ok(Version::from_bytes(parser::array_at(data, 0)?))
}

/// Decode READ_SIG response (32 bytes)
pub fn decode_signature(data: &[u8]) -> Result<Signature> {
    parser::ensure_exact(data, SIGNATURE_SIZE)?;
    Ok(Signature::from_bytes(parser::array_at(data, 0)?))
}

/// Decode READ_CNT response (3 bytes, little endian)
pub fn decode_counter(data: &[u8]) -> Result<Counter> {
    parser::ensure_exact(data, COUNTER_SIZE)?;
    Ok(Counter::from_bytes(parser::array_at(data, 0)?))
}

/// Decode CHECK_TEARING_EVENT response (1 byte)
pub fn decode_tearing_flag(data: &[u8]) -> Result<TearingFlag> {
    parser::ensure_exact(data, 1)?;
    Ok(TearingFlag::new(parser::byte_at(data, 0)?))
}
