//! Protocol error types

use thiserror::Error;

/// Errors that can occur during protocol operations
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Frame does not start with the protocol magic
    #[error("Invalid frame header")]
    InvalidHeader,

    /// Fewer bytes than a full header were supplied
    #[error("Incomplete frame header: expected {expected} bytes, got {actual}")]
    IncompleteHeader { expected: usize, actual: usize },

    /// Declared payload exceeds the accepted maximum
    #[error("Payload too large: {size} bytes exceeds maximum of {max} bytes")]
    PayloadTooLarge { size: u64, max: usize },

    /// Payload is not valid JSON or has an unexpected shape
    #[error("Can't unmarshal response data: {0}")]
    Json(#[from] serde_json::Error),

    /// Gateway answered with a non-success status
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// Discovery payload could not be decoded
    #[error("Can't parse beans data: {0}")]
    BeanParse(#[source] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProtocolError {
    /// Whether this is a framing failure (bad magic or truncated header)
    pub fn is_framing(&self) -> bool {
        matches!(self, Self::InvalidHeader | Self::IncompleteHeader { .. })
    }
}
