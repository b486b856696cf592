// libultralight-rs/libultralight/src/protocol/responses/mod.rs
//! Decoders for Ultralight data replies. Every reply has a fixed size, so
//! each decoder rejects anything but the exact length.

pub mod auth;
pub mod info;
pub mod read;

pub use auth::decode_pack;
pub use info::{decode_counter, decode_signature, decode_tearing_flag, decode_version};
pub use read::decode_read;
