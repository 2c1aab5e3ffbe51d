//! zjmx-protocol: Wire protocol for the Zabbix Java gateway
//!
//! This crate defines the framing, request/response payloads and the
//! discovery payload decoder used to talk to a Zabbix Java gateway.

pub mod beans;
#[cfg(feature = "codec")]
pub mod codec;
pub mod error;
pub mod frame;
pub mod message;

pub use beans::{parse_beans, BeanDescriptor};
#[cfg(feature = "codec")]
pub use codec::FrameCodec;
pub use error::ProtocolError;
pub use frame::{
    decode_frame_header, encode_frame, FrameHeader, HEADER_SIZE, MAGIC, MAX_PAYLOAD_SIZE,
};
pub use message::{
    decode_response_payload, encode_request, Request, Response, ResponseData, WireRequest,
    WireResponse, REQUEST_KIND, SUCCESS_STATUS,
};
