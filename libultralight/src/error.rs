// libultralight-rs/libultralight/src/error.rs

use thiserror::Error;

use crate::transport::TransportError;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("tag not present")]
    NotPresent,

    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("invalid response length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("operation timed out")]
    Timeout,

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("{what} index {index} out of range (limit {limit})")]
    OutOfRange {
        what: &'static str,
        index: usize,
        limit: usize,
    },

    #[error("scan cancelled")]
    Cancelled,

    #[error("poller worker disconnected")]
    Disconnected,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`] for callers that only care about
/// the failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The tag left the field.
    NotPresent,
    /// Malformed or unexpected response (NAK, wrong length, bad CRC).
    Protocol,
    /// No response inside the frame wait time.
    Timeout,
    /// Password authentication answered with the wrong size or content.
    Auth,
    /// Local failures that never reached the tag.
    Other,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotPresent => ErrorKind::NotPresent,
            Error::Protocol(_) | Error::InvalidLength { .. } => ErrorKind::Protocol,
            Error::Timeout => ErrorKind::Timeout,
            Error::Auth(_) => ErrorKind::Auth,
            Error::OutOfRange { .. } | Error::Cancelled | Error::Disconnected | Error::Io(_) => {
                ErrorKind::Other
            }
        }
    }
}

impl From<TransportError> for Error {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::NotPresent => Error::NotPresent,
            TransportError::Timeout => Error::Timeout,
            TransportError::WrongCrc { raw } => match raw.as_slice() {
                // A lone nibble with a bad CRC is how the tag NAKs.
                [code] => Error::Protocol(format!("nak {:#04x}", code & 0x0F)),
                _ => Error::Protocol(format!("wrong crc in {} byte response", raw.len())),
            },
            TransportError::Communication(msg) => Error::Protocol(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
