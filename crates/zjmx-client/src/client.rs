//! Gateway client
//!
//! One [`JmxClient::get`] call is one complete exchange:
//! connect, write the request frame, read the 13-byte header, read the
//! payload, decode. The connection is owned by the call and dropped on
//! every return path. Nothing is retried.

use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use zjmx_protocol::{
    decode_response_payload, encode_request, FrameHeader, Request, Response, WireRequest,
    HEADER_SIZE,
};

use crate::config::{deadline, ClientConfig};
use crate::error::ClientError;

/// Client for a single Zabbix Java gateway
///
/// Holds only the resolved address and configuration, so one client can be
/// shared between threads and used for parallel exchanges.
#[derive(Debug, Clone)]
pub struct JmxClient {
    addr: SocketAddr,
    config: ClientConfig,
}

impl JmxClient {
    /// Create a client for `host:port` with default configuration
    pub fn new(address: &str) -> Result<Self, ClientError> {
        Self::with_config(address, ClientConfig::default())
    }

    /// Create a client for `host:port` with custom configuration
    pub fn with_config(address: &str, config: ClientConfig) -> Result<Self, ClientError> {
        let addr = resolve_ipv4(address)?;
        Ok(Self { addr, config })
    }

    /// Resolved gateway address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Current configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Set the connect timeout (zero disables it)
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set the write timeout (zero disables it)
    pub fn write_timeout(mut self, timeout: Duration) -> Self {
        self.config.write_timeout = timeout;
        self
    }

    /// Set the read timeout (zero disables it)
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// Fetch values for `request.keys` from the gateway
    ///
    /// The returned values are in the same order as the keys.
    pub fn get(&self, request: &Request) -> Result<Response, ClientError> {
        let frame = encode_request(&WireRequest::from(request)).map_err(ClientError::Encode)?;

        tracing::debug!(
            address = %self.addr,
            server = %request.server,
            keys = request.keys.len(),
            "Sending request to gateway"
        );

        // Dropped on every return path: the gateway closes after one response
        let mut stream = self.connect()?;

        write_full(&mut stream, &frame, self.config.write_timeout).map_err(ClientError::Write)?;

        let mut header = [0u8; HEADER_SIZE];
        let received = read_full(&mut stream, &mut header, self.config.read_timeout)
            .map_err(ClientError::Read)?;
        if received == 0 {
            return Err(ClientError::Read(io::ErrorKind::UnexpectedEof.into()));
        }

        // A peer that closes mid-header sent a truncated frame
        let payload_len = FrameHeader::decode(&header[..received])?
            .payload_len(self.config.max_payload_size)?;

        let mut payload = vec![0u8; payload_len];
        let received = read_full(&mut stream, &mut payload, self.config.read_timeout)
            .map_err(ClientError::Read)?;
        if received < payload_len {
            return Err(ClientError::Read(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("payload truncated: expected {} bytes, got {}", payload_len, received),
            )));
        }

        tracing::debug!(address = %self.addr, bytes = payload_len, "Received response");

        Ok(decode_response_payload(&payload)?)
    }

    fn connect(&self) -> Result<TcpStream, ClientError> {
        tracing::debug!("Connecting to gateway at {}", self.addr);

        let stream = match deadline(self.config.connect_timeout) {
            Some(timeout) => TcpStream::connect_timeout(&self.addr, timeout),
            None => TcpStream::connect(self.addr),
        };

        stream.map_err(ClientError::Connect)
    }
}

/// Resolve `address` and keep the first IPv4 result
fn resolve_ipv4(address: &str) -> Result<SocketAddr, ClientError> {
    let invalid = |reason: String| ClientError::Address {
        address: address.to_string(),
        reason,
    };

    address
        .to_socket_addrs()
        .map_err(|e| invalid(e.to_string()))?
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| invalid("no IPv4 address".to_string()))
}

/// Absolute deadline for an operation starting now
fn start_deadline(timeout: Duration) -> Option<Instant> {
    deadline(timeout).map(|t| Instant::now() + t)
}

/// Time left until `deadline`, or a timeout error once it has passed
fn remaining(deadline: Instant) -> io::Result<Duration> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        return Err(io::Error::new(io::ErrorKind::TimedOut, "deadline exceeded"));
    }
    Ok(left)
}

/// Fill `buf` until it is full or the peer closes, returning the byte count
///
/// `timeout` bounds the whole read, not each syscall.
fn read_full(stream: &mut TcpStream, buf: &mut [u8], timeout: Duration) -> io::Result<usize> {
    let deadline = start_deadline(timeout);
    let mut filled = 0;

    while filled < buf.len() {
        if let Some(deadline) = deadline {
            stream.set_read_timeout(Some(remaining(deadline)?))?;
        }

        match stream.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}

/// Write all of `data`; `timeout` bounds the whole write
fn write_full(stream: &mut TcpStream, data: &[u8], timeout: Duration) -> io::Result<()> {
    let deadline = start_deadline(timeout);
    let mut written = 0;

    while written < data.len() {
        if let Some(deadline) = deadline {
            stream.set_write_timeout(Some(remaining(deadline)?))?;
        }

        match stream.write(&data[written..]) {
            Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
            Ok(n) => written += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }

    stream.flush()
}
