//! Shared serde helpers for configuration types

/// Timeouts in seconds, whole or fractional
///
/// `read_timeout = 5` and `read_timeout = 0.25` are both accepted. Negative
/// and non-finite values are rejected. Whole durations are written back as
/// integers.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Config {
///     #[serde(with = "zjmx_client::config::serde_utils::duration_secs")]
///     read_timeout: Duration,
/// }
/// ```
pub mod duration_secs {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Secs {
        Whole(u64),
        Fractional(f64),
    }

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if duration.subsec_nanos() == 0 {
            serializer.serialize_u64(duration.as_secs())
        } else {
            serializer.serialize_f64(duration.as_secs_f64())
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Secs::deserialize(deserializer)? {
            Secs::Whole(secs) => Ok(Duration::from_secs(secs)),
            Secs::Fractional(secs) => Duration::try_from_secs_f64(secs).map_err(|_| {
                D::Error::custom(format!(
                    "invalid timeout {}: expected a non-negative number of seconds",
                    secs
                ))
            }),
        }
    }

    /// Same as the parent module for `Option<Duration>`; use with
    /// `#[serde(default)]` so a missing key stays `None`
    pub mod option {
        use serde::{Deserializer, Serializer};
        use std::time::Duration;

        pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match duration {
                Some(duration) => super::serialize(duration, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
        where
            D: Deserializer<'de>,
        {
            super::deserialize(deserializer).map(Some)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Timeouts {
        #[serde(with = "duration_secs")]
        read_timeout: Duration,
    }

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct MaybeTimeouts {
        #[serde(with = "duration_secs::option", skip_serializing_if = "Option::is_none")]
        read_timeout: Option<Duration>,
    }

    #[test]
    fn test_whole_seconds() {
        let parsed: Timeouts = toml::from_str("read_timeout = 5").unwrap();
        assert_eq!(parsed.read_timeout, Duration::from_secs(5));

        let out = toml::to_string(&parsed).unwrap();
        assert_eq!(out.trim(), "read_timeout = 5");
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed: Timeouts = toml::from_str("read_timeout = 0.25").unwrap();
        assert_eq!(parsed.read_timeout, Duration::from_millis(250));

        let t = Timeouts {
            read_timeout: Duration::from_millis(2500),
        };
        assert_eq!(toml::to_string(&t).unwrap().trim(), "read_timeout = 2.5");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(toml::from_str::<Timeouts>("read_timeout = -1").is_err());
        assert!(toml::from_str::<Timeouts>("read_timeout = -0.5").is_err());
        assert!(toml::from_str::<Timeouts>("read_timeout = \"5\"").is_err());
    }

    #[test]
    fn test_option_distinguishes_zero_from_unset() {
        let unset: MaybeTimeouts = toml::from_str("").unwrap();
        assert_eq!(unset.read_timeout, None);

        let zero: MaybeTimeouts = toml::from_str("read_timeout = 0").unwrap();
        assert_eq!(zero.read_timeout, Some(Duration::ZERO));

        assert_eq!(toml::to_string(&unset).unwrap().trim(), "");
    }
}
