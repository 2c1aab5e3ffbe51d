//! Request and response payloads for the Java gateway
//!
//! A [`Request`] is what callers build. It is converted into a
//! [`WireRequest`], serialized to JSON and framed. The gateway answers
//! with a [`WireResponse`] whose `data` array is aligned with the
//! request keys.

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;
use crate::frame::encode_frame;

/// Request kind understood by the Java gateway
pub const REQUEST_KIND: &str = "java gateway jmx";

/// Status literal of a successful response
pub const SUCCESS_STATUS: &str = "success";

/// A JMX query against one server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// JMX server host
    pub server: String,
    /// JMX server port
    pub port: u16,
    /// JMX username
    pub username: Option<String>,
    /// JMX password
    pub password: Option<String>,
    /// Item keys, e.g. `jmx["java.lang:type=Memory",HeapMemoryUsage.used]`
    pub keys: Vec<String>,
}

impl Request {
    /// Create a request without credentials
    pub fn new(server: impl Into<String>, port: u16, keys: Vec<String>) -> Self {
        Self {
            server: server.into(),
            port,
            username: None,
            password: None,
            keys,
        }
    }

    /// Attach credentials to the request
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// JMX service URL for the target server
    pub fn endpoint(&self) -> String {
        format!(
            "service:jmx:rmi:///jndi/rmi://{}:{}/jmxrmi",
            self.server, self.port
        )
    }
}

/// Value returned for a single key
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    #[serde(default)]
    pub value: String,
}

/// Values aligned with the request keys
pub type Response = Vec<ResponseData>;

/// Request payload as sent on the wire
///
/// Field order matters: it is the serialization order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireRequest {
    pub request: String,
    pub conn: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub jmx_endpoint: String,
    pub keys: Vec<String>,
}

impl From<&Request> for WireRequest {
    fn from(r: &Request) -> Self {
        let username = r.username.clone().filter(|u| !u.is_empty());

        // With a username the password always goes along, even if empty
        let password = if username.is_some() {
            Some(r.password.clone().unwrap_or_default())
        } else {
            r.password.clone().filter(|p| !p.is_empty())
        };

        Self {
            request: REQUEST_KIND.to_string(),
            conn: r.server.clone(),
            port: r.port,
            username,
            password,
            jmx_endpoint: r.endpoint(),
            keys: r.keys.clone(),
        }
    }
}

/// Response payload as received from the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub data: Response,
    #[serde(default, rename = "response")]
    pub status: String,
    #[serde(default)]
    pub error: String,
}

impl WireResponse {
    /// Successful response carrying `data`
    pub fn success(data: Response) -> Self {
        Self {
            data,
            status: SUCCESS_STATUS.to_string(),
            error: String::new(),
        }
    }

    /// Failed response carrying an error message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            data: Vec::new(),
            status: "failed".to_string(),
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

/// Serialize a request and wrap it into a frame
pub fn encode_request(request: &WireRequest) -> Result<Vec<u8>, ProtocolError> {
    let payload = serde_json::to_vec(request)?;
    Ok(encode_frame(&payload))
}

/// Decode a response payload (the bytes after the frame header)
///
/// A response whose status is not `success` is turned into
/// [`ProtocolError::Gateway`] and its data is dropped.
pub fn decode_response_payload(payload: &[u8]) -> Result<Response, ProtocolError> {
    let resp: WireResponse = serde_json::from_slice(payload)?;

    if !resp.is_success() {
        tracing::warn!(status = %resp.status, error = %resp.error, "Gateway reported failure");
        return Err(ProtocolError::Gateway(resp.error));
    }

    Ok(resp.data)
}
