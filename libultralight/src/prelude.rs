// libultralight-rs/libultralight/src/prelude.rs

pub use crate::poller::{
    AuthDecision, Flow, Poller, PollerConfig, PollerEvent, PollerState, Step, StopHandle,
    SyncPoller,
};
pub use crate::protocol::Command;
pub use crate::tag::{ConfigPages, FeatureSet, TagSnapshot, TagType};
pub use crate::transport::{FrameTransport, TransportError};
pub use crate::{
    AnticollisionData, Counter, Error, ErrorKind, Pack, Page, Password, Result, Signature,
    TearingFlag, Uid, Version,
};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, parse_hex};
