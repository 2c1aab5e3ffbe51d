//! Tokio codec for framed gateway payloads
//!
//! Decodes whole frames from an async byte stream and yields the raw JSON
//! payload, for async callers and servers that speak the gateway protocol.
//! The blocking client does not use it; it reads frames directly with
//! [`FrameHeader`]. Enabled by the `codec` feature.

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

use crate::error::ProtocolError;
use crate::frame::{FrameHeader, HEADER_SIZE, MAX_PAYLOAD_SIZE};

/// Codec for encoding/decoding protocol frames
#[derive(Debug)]
pub struct FrameCodec {
    /// Payload length of a header already consumed from the buffer
    pending_len: Option<usize>,
    max_payload_size: usize,
}

impl FrameCodec {
    /// Create a new codec with the default payload limit
    pub fn new() -> Self {
        Self::with_max_payload_size(MAX_PAYLOAD_SIZE)
    }

    /// Create a new codec with a custom payload limit
    pub fn with_max_payload_size(max_payload_size: usize) -> Self {
        Self {
            pending_len: None,
            max_payload_size,
        }
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for FrameCodec {
    type Item = Bytes;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let payload_len = match self.pending_len.take() {
            Some(len) => len,
            None => {
                if src.len() < HEADER_SIZE {
                    return Ok(None);
                }
                let len = FrameHeader::decode(&src[..])?.payload_len(self.max_payload_size)?;
                src.advance(HEADER_SIZE);
                len
            }
        };

        if src.len() < payload_len {
            self.pending_len = Some(payload_len);
            src.reserve(payload_len - src.len());
            return Ok(None);
        }

        Ok(Some(src.split_to(payload_len).freeze()))
    }
}

impl Encoder<Bytes> for FrameCodec {
    type Error = ProtocolError;

    fn encode(&mut self, payload: Bytes, dst: &mut BytesMut) -> Result<(), Self::Error> {
        if payload.len() > self.max_payload_size {
            return Err(ProtocolError::PayloadTooLarge {
                size: payload.len() as u64,
                max: self.max_payload_size,
            });
        }

        dst.reserve(HEADER_SIZE + payload.len());
        FrameHeader::new(payload.len() as u64).encode(dst);
        dst.extend_from_slice(&payload);

        Ok(())
    }
}
