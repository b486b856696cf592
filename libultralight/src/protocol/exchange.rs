// libultralight-rs/libultralight/src/protocol/exchange.rs

use crate::constants::ACK;
use crate::protocol::commands::{Command, Expect};
use crate::transport::{FrameTransport, TransportError};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

/// Send one command and interpret the answer according to its
/// acknowledgement convention.
///
/// - `Expect::Data`: the frame is returned as is.
/// - `Expect::Ack`: a wrong-CRC frame holding exactly the ACK nibble is
///   success, any other nibble is a NAK, a CRC-valid frame is a protocol
///   error.
/// - `Expect::Silence`: a timeout is success, any answer means the tag
///   refused the command.
///
/// ACK and silence return an empty vector.
pub fn execute(
    transport: &mut dyn FrameTransport,
    command: &Command,
    fwt_fc: u32,
) -> Result<Vec<u8>> {
    let frame = command.encode();
    log::trace!("> {} [{}]", command.name(), bytes_to_hex_spaced(&frame));

    let result = transport.exchange(&frame, fwt_fc);
    match (command.expectation(), result) {
        (Expect::Data, Ok(data)) => {
            log::trace!("< {} [{}]", command.name(), bytes_to_hex_spaced(&data));
            Ok(data)
        }
        (Expect::Ack, Err(TransportError::WrongCrc { raw })) if raw.as_slice() == [ACK] => {
            log::trace!("< {} ACK", command.name());
            Ok(Vec::new())
        }
        (Expect::Ack, Ok(data)) => Err(Error::Protocol(format!(
            "{}: expected ACK, got {} byte frame",
            command.name(),
            data.len()
        ))),
        (Expect::Silence, Err(TransportError::Timeout)) => {
            log::trace!("< {} (silent)", command.name());
            Ok(Vec::new())
        }
        (Expect::Silence, Ok(data)) => Err(Error::Protocol(format!(
            "{}: expected silence, got {} byte frame",
            command.name(),
            data.len()
        ))),
        (_, Err(err)) => {
            log::trace!("< {} {err}", command.name());
            Err(err.into())
        }
    }
}
