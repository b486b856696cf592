// libultralight-rs/libultralight/src/transport/traits.rs

use thiserror::Error;

use crate::types::AnticollisionData;

/// Outcome of a single frame exchange below the Ultralight layer.
///
/// `WrongCrc` and `Timeout` are not always failures: the tag answers some
/// commands with a bare 4-bit ACK (no CRC) or by staying silent. The
/// protocol layer decides which reading applies per command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("tag not present")]
    NotPresent,

    /// A frame arrived but failed the CRC check. `raw` holds whatever bits
    /// were received, e.g. a single ACK/NAK nibble.
    #[error("wrong crc in response frame")]
    WrongCrc { raw: Vec<u8> },

    #[error("communication error: {0}")]
    Communication(String),

    #[error("frame wait time expired")]
    Timeout,
}

/// FrameTransport abstracts the ISO14443-3A layer away from the poller.
pub trait FrameTransport {
    /// Send `frame` (CRC appended by the transport) and wait up to
    /// `fwt_fc` carrier cycles for the answer. Reselects the tag first if
    /// it was halted.
    fn exchange(&mut self, frame: &[u8], fwt_fc: u32) -> Result<Vec<u8>, TransportError>;

    /// Send HLTA. Must be safe to call repeatedly or with no tag selected.
    fn halt(&mut self) -> Result<(), TransportError>;

    /// UID / ATQA / SAK of the currently selected tag
    fn anticollision(&self) -> AnticollisionData;
}

impl<T: FrameTransport + ?Sized> FrameTransport for Box<T> {
    fn exchange(&mut self, frame: &[u8], fwt_fc: u32) -> Result<Vec<u8>, TransportError> {
        (**self).exchange(frame, fwt_fc)
    }

    fn halt(&mut self) -> Result<(), TransportError> {
        (**self).halt()
    }

    fn anticollision(&self) -> AnticollisionData {
        (**self).anticollision()
    }
}
