//! Frame wait times.
//!
//! ISO14443 timings are expressed in carrier cycles (fc, 13.56 MHz); the
//! transport receives raw fc counts.

/// Frame wait time used for every regular Ultralight command.
pub const STANDARD_FWT_FC: u32 = 60_000;

/// A tag confirms SECTOR_SELECT packet 2 by staying silent for 1 ms.
pub const SECTOR_SELECT_ACK_FWT_FC: u32 = 13_560;
