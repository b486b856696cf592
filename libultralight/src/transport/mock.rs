// libultralight-rs/libultralight/src/transport/mock.rs

use std::collections::VecDeque;

use crate::transport::traits::{FrameTransport, TransportError};
use crate::types::AnticollisionData;

/// Mock transport for unit tests. It records sent frames and returns queued
/// responses in order; an empty queue answers with `Timeout`.
#[derive(Debug, Default)]
pub struct MockTransport {
    pub sent: Vec<Vec<u8>>,
    pub responses: VecDeque<Result<Vec<u8>, TransportError>>,
    /// Frame wait time passed with each exchange, in send order
    pub fwts: Vec<u32>,
    pub halts: usize,
    pub identity: AnticollisionData,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(identity: AnticollisionData) -> Self {
        Self {
            identity,
            ..Self::default()
        }
    }

    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push_back(Ok(resp));
    }

    pub fn push_error(&mut self, err: TransportError) {
        self.responses.push_back(Err(err));
    }

    /// Queue the 4-bit ACK a tag sends after WRITE or SECTOR_SELECT.
    pub fn push_ack(&mut self) {
        self.push_error(TransportError::WrongCrc {
            raw: vec![crate::constants::ACK],
        });
    }

    /// Queue a 4-bit NAK with the given code.
    pub fn push_nak(&mut self, code: u8) {
        self.push_error(TransportError::WrongCrc { raw: vec![code] });
    }

    pub fn pop_sent(&mut self) -> Option<Vec<u8>> {
        self.sent.pop()
    }
}

impl FrameTransport for MockTransport {
    fn exchange(&mut self, frame: &[u8], fwt_fc: u32) -> Result<Vec<u8>, TransportError> {
        self.sent.push(frame.to_vec());
        self.fwts.push(fwt_fc);
        self.responses
            .pop_front()
            .unwrap_or(Err(TransportError::Timeout))
    }

    fn halt(&mut self) -> Result<(), TransportError> {
        self.halts += 1;
        Ok(())
    }

    fn anticollision(&self) -> AnticollisionData {
        self.identity
    }
}
