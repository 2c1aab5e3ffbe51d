//! Client error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use zjmx_protocol::ProtocolError;

/// Errors returned by a gateway exchange
#[derive(Error, Debug)]
pub enum ClientError {
    /// Gateway address could not be resolved to an IPv4 socket address
    #[error("Invalid gateway address {address}: {reason}")]
    Address { address: String, reason: String },

    /// Request could not be serialized
    #[error("Can't encode request: {0}")]
    Encode(#[source] ProtocolError),

    /// TCP connect failed or timed out
    #[error("Can't connect to gateway: {0}")]
    Connect(#[source] io::Error),

    /// Writing the request frame failed or timed out
    #[error("Can't send request: {0}")]
    Write(#[source] io::Error),

    /// Reading the response frame failed, timed out or hit EOF
    #[error("Can't read response: {0}")]
    Read(#[source] io::Error),

    /// Response was malformed or reported a gateway failure
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ClientError {
    /// Whether the underlying transport operation timed out
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Connect(e) | Self::Write(e) | Self::Read(e) => matches!(
                e.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
