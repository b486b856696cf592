// libultralight-rs/libultralight/src/protocol/parser.rs

use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Ensure the slice has exactly `len` bytes. Ultralight replies are fixed
/// size, anything else means a truncated or merged frame.
pub fn ensure_exact(data: &[u8], len: usize) -> Result<()> {
    if data.len() != len {
        return Err(Error::InvalidLength {
            expected: len,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    let end = idx.checked_add(len).ok_or(Error::InvalidLength {
        expected: usize::MAX,
        actual: data.len(),
    })?;
    ensure_len(data, end)?;
    Ok(&data[idx..end])
}

/// Copy `N` bytes starting at `idx` into a fixed array.
pub fn array_at<const N: usize>(data: &[u8], idx: usize) -> Result<[u8; N]> {
    let mut out = [0u8; N];
    out.copy_from_slice(slice_at(data, idx, N)?);
    Ok(out)
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}
