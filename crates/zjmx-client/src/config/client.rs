//! Client tuning options

use serde::{Deserialize, Serialize};
use std::time::Duration;

use zjmx_protocol::MAX_PAYLOAD_SIZE;

use super::serde_utils::duration_secs;

/// Timeouts and limits for gateway exchanges
///
/// A zero timeout means no deadline: the operation blocks until the OS
/// gives up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Deadline for establishing the TCP connection
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,

    /// Deadline for sending the request frame
    #[serde(with = "duration_secs")]
    pub write_timeout: Duration,

    /// Deadline applied to each read (header, then payload)
    #[serde(with = "duration_secs")]
    pub read_timeout: Duration,

    /// Largest response payload accepted, in bytes
    pub max_payload_size: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::ZERO,
            write_timeout: Duration::ZERO,
            read_timeout: Duration::ZERO,
            max_payload_size: MAX_PAYLOAD_SIZE,
        }
    }
}

/// The `[client]` section of the config file
///
/// Every field is optional so that an explicit `0` ("no deadline") can be
/// told apart from a key that is not there at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSection {
    #[serde(with = "duration_secs::option", skip_serializing_if = "Option::is_none")]
    pub connect_timeout: Option<Duration>,

    #[serde(with = "duration_secs::option", skip_serializing_if = "Option::is_none")]
    pub write_timeout: Option<Duration>,

    #[serde(with = "duration_secs::option", skip_serializing_if = "Option::is_none")]
    pub read_timeout: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_payload_size: Option<usize>,
}

impl ClientSection {
    /// Apply the values set in the file over `defaults`
    pub fn over(&self, defaults: ClientConfig) -> ClientConfig {
        ClientConfig {
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            write_timeout: self.write_timeout.unwrap_or(defaults.write_timeout),
            read_timeout: self.read_timeout.unwrap_or(defaults.read_timeout),
            max_payload_size: self.max_payload_size.unwrap_or(defaults.max_payload_size),
        }
    }
}

/// Convert a configured timeout into the form socket setters expect
pub(crate) fn deadline(timeout: Duration) -> Option<Duration> {
    (!timeout.is_zero()).then_some(timeout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert!(config.connect_timeout.is_zero());
        assert_eq!(config.max_payload_size, MAX_PAYLOAD_SIZE);
    }

    #[test]
    fn test_partial_toml() {
        let config: ClientConfig = toml::from_str("read_timeout = 7").unwrap();
        assert_eq!(config.read_timeout, Duration::from_secs(7));
        assert!(config.write_timeout.is_zero());
    }

    fn cli_defaults() -> ClientConfig {
        ClientConfig {
            connect_timeout: Duration::from_secs(3),
            write_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    #[test]
    fn test_section_over_defaults() {
        let section: ClientSection = toml::from_str("read_timeout = 30").unwrap();
        let config = section.over(cli_defaults());

        assert_eq!(config.connect_timeout, Duration::from_secs(3));
        assert_eq!(config.write_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::from_secs(30));
        assert_eq!(config.max_payload_size, MAX_PAYLOAD_SIZE);
    }

    #[test]
    fn test_section_zero_disables_deadline() {
        let section: ClientSection =
            toml::from_str("connect_timeout = 0\nwrite_timeout = 0\nread_timeout = 0").unwrap();
        let config = section.over(cli_defaults());

        assert_eq!(config.connect_timeout, Duration::ZERO);
        assert_eq!(config.write_timeout, Duration::ZERO);
        assert_eq!(config.read_timeout, Duration::ZERO);
        assert_eq!(deadline(config.read_timeout), None);
    }

    #[test]
    fn test_zero_timeout_has_no_deadline() {
        assert_eq!(deadline(Duration::ZERO), None);
        assert_eq!(
            deadline(Duration::from_secs(1)),
            Some(Duration::from_secs(1))
        );
    }
}
