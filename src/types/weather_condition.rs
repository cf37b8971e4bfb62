//! Defines the `WeatherCondition` enum and the rule that estimates it from
//! precipitation and cloud cover, since the forecast model publishes no condition code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Precipitation above this amount (mm) counts as rain.
pub const RAIN_THRESHOLD: f64 = 0.1;
/// Cloud cover above this percentage counts as cloudy.
pub const CLOUDY_THRESHOLD: f64 = 80.0;
/// Cloud cover above this percentage counts as partly cloudy.
pub const PARTLY_CLOUDY_THRESHOLD: f64 = 30.0;

/// A coarse weather condition for one forecast timestep.
///
/// Serializes to the condition strings used by home-automation weather entities
/// (`"clear"`, `"partlycloudy"`, `"cloudy"`, `"rainy"`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherCondition {
    /// No rain and at most 30 % cloud cover (or no cloud data).
    Clear,
    /// Cloud cover above 30 % and up to 80 %.
    PartlyCloudy,
    /// Cloud cover above 80 %.
    Cloudy,
    /// More than 0.1 mm of precipitation.
    Rainy,
}

impl WeatherCondition {
    /// Estimates the condition from normalized precipitation (mm) and cloud cover (%).
    ///
    /// Rules are checked in order and the first match wins. A missing value never
    /// satisfies a rule, so a timestep with no data at all is [`WeatherCondition::Clear`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use edr_forecast::WeatherCondition;
    ///
    /// assert_eq!(WeatherCondition::estimate(Some(0.2), Some(50.0)), WeatherCondition::Rainy);
    /// assert_eq!(WeatherCondition::estimate(Some(0.0), Some(85.0)), WeatherCondition::Cloudy);
    /// assert_eq!(WeatherCondition::estimate(None, Some(50.0)), WeatherCondition::PartlyCloudy);
    /// assert_eq!(WeatherCondition::estimate(None, None), WeatherCondition::Clear);
    /// ```
    pub fn estimate(precipitation: Option<f64>, cloud_cover: Option<f64>) -> Self {
        let exceeds = |value: Option<f64>, threshold: f64| value.is_some_and(|v| v > threshold);

        if exceeds(precipitation, RAIN_THRESHOLD) {
            WeatherCondition::Rainy
        } else if exceeds(cloud_cover, CLOUDY_THRESHOLD) {
            WeatherCondition::Cloudy
        } else if exceeds(cloud_cover, PARTLY_CLOUDY_THRESHOLD) {
            WeatherCondition::PartlyCloudy
        } else {
            WeatherCondition::Clear
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "clear",
            WeatherCondition::PartlyCloudy => "partlycloudy",
            WeatherCondition::Cloudy => "cloudy",
            WeatherCondition::Rainy => "rainy",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
