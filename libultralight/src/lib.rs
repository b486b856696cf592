// libultralight-rs/libultralight/src/lib.rs

//! libultralight
//!
//! Pure Rust polling engine for MIFARE Ultralight / NTAG tags: tag type
//! discovery, password authentication, full memory reads including NTAG
//! I2C sectors, counters, tearing flags and the originality signature.
//! The radio layer is supplied by the caller through
//! [`transport::FrameTransport`].
#![warn(missing_docs)]

pub mod constants;
pub mod error;
pub mod poller;
pub mod prelude;
pub mod protocol;
pub mod tag;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the newtypes in `types` are available for consumers and for
// convenient `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
