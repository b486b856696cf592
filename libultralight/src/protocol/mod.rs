// libultralight-rs/libultralight/src/protocol/mod.rs

pub mod commands;
pub mod exchange;
pub mod parser;
pub mod responses;

pub use commands::{Command, Expect};
pub use exchange::execute;
pub use responses::*;
