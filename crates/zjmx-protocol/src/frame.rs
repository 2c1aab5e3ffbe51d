//! Frame header encoding/decoding
//!
//! The frame format uses a 13-byte header:
//! - magic: 5 bytes (`ZBXD` followed by protocol version `0x01`)
//! - payload_length: 8 bytes (u64, little-endian)
//!
//! The header is followed by `payload_length` bytes of UTF-8 JSON.

use bytes::BufMut;

use crate::error::ProtocolError;

/// Protocol magic: four ASCII letters and the protocol version byte
pub const MAGIC: [u8; 5] = *b"ZBXD\x01";

/// Size of the frame header in bytes
pub const HEADER_SIZE: usize = MAGIC.len() + 8;

/// Default upper bound for a declared payload length (128 MiB)
///
/// The wire format allows any u64 length; anything above this is rejected
/// before a receive buffer is allocated.
pub const MAX_PAYLOAD_SIZE: usize = 128 * 1024 * 1024;

/// Frame header carrying the payload length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Declared length of the payload in bytes
    pub payload_length: u64,
}

impl FrameHeader {
    /// Create a new frame header
    pub fn new(payload_length: u64) -> Self {
        Self { payload_length }
    }

    /// Encode the header into a byte buffer
    pub fn encode<B: BufMut>(&self, dst: &mut B) {
        dst.put_slice(&MAGIC);
        dst.put_u64_le(self.payload_length);
    }

    /// Decode a header from the first `HEADER_SIZE` bytes of `src`
    ///
    /// Trailing bytes beyond the header are ignored.
    pub fn decode(src: &[u8]) -> Result<Self, ProtocolError> {
        if src.len() < HEADER_SIZE {
            return Err(ProtocolError::IncompleteHeader {
                expected: HEADER_SIZE,
                actual: src.len(),
            });
        }

        if src[..MAGIC.len()] != MAGIC {
            return Err(ProtocolError::InvalidHeader);
        }

        let mut len = [0u8; 8];
        len.copy_from_slice(&src[MAGIC.len()..HEADER_SIZE]);

        Ok(Self {
            payload_length: u64::from_le_bytes(len),
        })
    }

    /// Declared payload length, rejected if it exceeds `max`
    pub fn payload_len(&self, max: usize) -> Result<usize, ProtocolError> {
        match usize::try_from(self.payload_length) {
            Ok(len) if len <= max => Ok(len),
            _ => Err(ProtocolError::PayloadTooLarge {
                size: self.payload_length,
                max,
            }),
        }
    }
}

/// Wrap a payload into a complete frame
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    FrameHeader::new(payload.len() as u64).encode(&mut buf);
    buf.put_slice(payload);
    buf
}

/// Decode the header of a frame and return the declared payload length
///
/// Lengths above [`MAX_PAYLOAD_SIZE`] are rejected.
pub fn decode_frame_header(bytes: &[u8]) -> Result<usize, ProtocolError> {
    FrameHeader::decode(bytes)?.payload_len(MAX_PAYLOAD_SIZE)
}
