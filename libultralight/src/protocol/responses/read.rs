// libultralight-rs/libultralight/src/protocol/responses/read.rs

use crate::constants::{PAGE_SIZE, PAGES_PER_READ};
use crate::protocol::parser;
use crate::types::Page;
use crate::Result;

/// Decode a READ response: exactly four pages (16 bytes).
pub fn decode_read(data: &[u8]) -> Result<[Page; PAGES_PER_READ]> {
    parser::ensure_exact(data, PAGE_SIZE * PAGES_PER_READ)?;

    let mut pages = [Page::default(); PAGES_PER_READ];
    for (i, page) in pages.iter_mut().enumerate() {
        *page = Page::from_bytes(parser::array_at(data, i * PAGE_SIZE)?);
    }
    Ok(pages)
}
