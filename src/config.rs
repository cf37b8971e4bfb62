//! Client configuration: endpoint, credentials header, request pacing and retry policy.
//!
//! All fields have defaults, so a JSON document only needs the values it changes.
//! Durations are written as seconds, fractions allowed.

use crate::collections::resolver::DEFAULT_COLLECTION;
use crate::error::EdrForecastError;
use crate::fetch::retry::RetryPolicy;
use crate::fetch::transport::Timeouts;
use crate::query::position::DEFAULT_HORIZON_HOURS;
use crate::types::parameter::ParameterSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://dmigw.govcloud.dk/v1/forecastedr";
pub const DEFAULT_AUTH_HEADER: &str = "X-Gravitee-Api-Key";
/// Longest forecast window accepted: one year.
pub const MAX_HORIZON_HOURS: u32 = 24 * 366;

/// Settings for [`crate::EdrForecast`].
///
/// # Examples
///
/// ```
/// use edr_forecast::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::from_json_str(r#"{
///     "preferred_collection": "harmonie_ig_sf",
///     "min_request_interval": 5,
///     "backoff_base": 0.5
/// }"#).unwrap();
///
/// assert_eq!(config.preferred_collection, "harmonie_ig_sf");
/// assert_eq!(config.min_request_interval, Duration::from_secs(5));
/// assert_eq!(config.backoff_base, Duration::from_millis(500));
/// assert_eq!(config.max_retries, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Name of the header carrying the API key.
    pub auth_header: String,
    /// Collection to query when the server offers it.
    pub preferred_collection: String,
    pub parameters: ParameterSet,
    /// Length of the forecast window requested.
    pub horizon_hours: u32,
    /// Minimum spacing between any two outbound requests.
    #[serde(with = "duration_secs")]
    pub min_request_interval: Duration,
    /// Extra wait after an HTTP 429.
    #[serde(with = "duration_secs")]
    pub rate_limit_cooldown: Duration,
    /// Attempts per update, including the first.
    pub max_retries: u32,
    #[serde(with = "duration_secs")]
    pub backoff_base: Duration,
    #[serde(with = "duration_secs")]
    pub connect_timeout: Duration,
    #[serde(with = "duration_secs")]
    pub read_timeout: Duration,
    #[serde(with = "duration_secs")]
    pub total_timeout: Duration,
    /// Keep only this many hourly records; all when `None`.
    pub hourly_limit: Option<usize>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
            preferred_collection: DEFAULT_COLLECTION.to_string(),
            parameters: ParameterSet::full(),
            horizon_hours: DEFAULT_HORIZON_HOURS as u32,
            min_request_interval: Duration::from_secs(2),
            rate_limit_cooldown: Duration::from_secs(5),
            max_retries: 3,
            backoff_base: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            total_timeout: Duration::from_secs(60),
            hourly_limit: None,
        }
    }
}

impl ClientConfig {
    /// Parses and validates a JSON configuration.
    pub fn from_json_str(json: &str) -> Result<Self, EdrForecastError> {
        let config: Self = serde_json::from_str(json).map_err(EdrForecastError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EdrForecastError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| EdrForecastError::ConfigRead(path.to_path_buf(), e))?;
        Self::from_json_str(&json)
    }

    /// Checks the values that would make every update fail.
    ///
    /// # Errors
    ///
    /// Returns [`EdrForecastError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), EdrForecastError> {
        let invalid = |reason: &str| Err(EdrForecastError::InvalidConfig(reason.to_string()));
        if self.base_url.trim().is_empty() {
            return invalid("base_url must not be empty");
        }
        if self.auth_header.trim().is_empty() {
            return invalid("auth_header must not be empty");
        }
        if self.max_retries == 0 {
            return invalid("max_retries must be at least 1");
        }
        if self.horizon_hours == 0 {
            return invalid("horizon_hours must be at least 1");
        }
        if self.horizon_hours > MAX_HORIZON_HOURS {
            return invalid("horizon_hours must not exceed one year");
        }
        if self.parameters.is_empty() {
            return invalid("parameters must not be empty");
        }
        if self.total_timeout.is_zero() {
            return invalid("total_timeout must be greater than zero");
        }
        Ok(())
    }

    pub fn timeouts(&self) -> Timeouts {
        Timeouts {
            connect: self.connect_timeout,
            read: self.read_timeout,
            total: self.total_timeout,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.backoff_base)
    }

    pub fn horizon(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.horizon_hours))
    }
}

mod duration_secs {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(duration.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|_| D::Error::custom(format!("invalid duration in seconds: {secs}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::parameter::Parameter;

    #[test]
    fn defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.auth_header, "X-Gravitee-Api-Key");
        assert_eq!(config.preferred_collection, "harmonie_dini_eps_means");
        assert_eq!(config.parameters, ParameterSet::full());
        assert_eq!(config.horizon(), chrono::Duration::days(5));
        assert_eq!(config.retry_policy(), RetryPolicy::new(3, Duration::from_secs(1)));
        assert_eq!(config.timeouts().total, Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(ClientConfig::from_json_str("{}").unwrap(), ClientConfig::default());
    }

    #[test]
    fn parameters_are_read_by_name() {
        let config =
            ClientConfig::from_json_str(r#"{"parameters": ["temperature", "wind_direction"]}"#)
                .unwrap();
        assert_eq!(
            config.parameters,
            ParameterSet::new([Parameter::Temperature, Parameter::WindDirection])
        );
    }

    #[test]
    fn serializes_durations_as_seconds() {
        let value = serde_json::to_value(ClientConfig::default()).unwrap();
        assert_eq!(value["read_timeout"], serde_json::json!(30.0));
        let back: ClientConfig = serde_json::from_value(value).unwrap();
        assert_eq!(back, ClientConfig::default());
    }

    #[test]
    fn rejects_negative_durations() {
        let err = ClientConfig::from_json_str(r#"{"backoff_base": -1}"#).unwrap_err();
        assert!(matches!(err, EdrForecastError::ConfigParse(_)));
    }

    #[test]
    fn validation_failures() {
        for json in [
            r#"{"base_url": " "}"#,
            r#"{"auth_header": ""}"#,
            r#"{"max_retries": 0}"#,
            r#"{"horizon_hours": 0}"#,
            r#"{"horizon_hours": 4294967295}"#,
            r#"{"parameters": []}"#,
            r#"{"total_timeout": 0}"#,
        ] {
            let err = ClientConfig::from_json_str(json).unwrap_err();
            assert!(
                matches!(err, EdrForecastError::InvalidConfig(_)),
                "{json} gave {err:?}"
            );
        }
    }

    #[test]
    fn horizon_bound_is_inclusive() {
        let at_bound = ClientConfig {
            horizon_hours: MAX_HORIZON_HOURS,
            ..ClientConfig::default()
        };
        assert!(at_bound.validate().is_ok());
        let beyond = ClientConfig {
            horizon_hours: u32::MAX,
            ..ClientConfig::default()
        };
        assert!(matches!(
            beyond.validate(),
            Err(EdrForecastError::InvalidConfig(_))
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ClientConfig::from_json_file("/nonexistent/edr_forecast.json").unwrap_err();
        assert!(matches!(err, EdrForecastError::ConfigRead(..)));
    }
}
