//! zjmx-client: Blocking client for the Zabbix Java gateway
//!
//! Each call to [`JmxClient::get`] opens a fresh TCP connection, sends one
//! framed request, reads one framed response and closes the connection.
//! The gateway does not support persistent connections.

pub mod client;
pub mod config;
pub mod error;

pub use client::JmxClient;
pub use config::{ClientConfig, ClientSection, ConfigFile, GatewayConfig, ServerConfig};
pub use error::{ClientError, ConfigError};

pub use zjmx_protocol::{parse_beans, BeanDescriptor, Request, Response, ResponseData};
