use crate::types::parameter::Parameter;
use crate::types::weather_condition::WeatherCondition;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized forecast values for one instant of the time axis.
///
/// Temperatures are in °C, pressure in hPa, cloud cover and humidity in percent.
/// A field is `None` when the parameter was not requested, absent from the
/// response, or null at this index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestepRecord {
    pub time: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_gust: Option<f64>,
    pub wind_direction: Option<f64>,
    pub precipitation: Option<f64>,
    pub cloud_cover: Option<f64>,
    pub dew_point: Option<f64>,
    pub snow_precipitation: Option<f64>,
    pub water_vapour: Option<f64>,
    pub weather_code: WeatherCondition,
}

impl TimestepRecord {
    /// An empty record at `time`; the condition is filled in by [`Self::with_estimated_condition`].
    pub(crate) fn empty(time: DateTime<Utc>) -> Self {
        Self {
            time,
            temperature: None,
            pressure: None,
            humidity: None,
            wind_speed: None,
            wind_gust: None,
            wind_direction: None,
            precipitation: None,
            cloud_cover: None,
            dew_point: None,
            snow_precipitation: None,
            water_vapour: None,
            weather_code: WeatherCondition::Clear,
        }
    }

    /// The value stored for `parameter`.
    pub fn value(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Temperature => self.temperature,
            Parameter::Pressure => self.pressure,
            Parameter::Humidity => self.humidity,
            Parameter::WindSpeed => self.wind_speed,
            Parameter::WindGust => self.wind_gust,
            Parameter::WindDirection => self.wind_direction,
            Parameter::Precipitation => self.precipitation,
            Parameter::CloudCover => self.cloud_cover,
            Parameter::DewPoint => self.dew_point,
            Parameter::SnowPrecipitation => self.snow_precipitation,
            Parameter::WaterVapour => self.water_vapour,
        }
    }

    pub(crate) fn set(&mut self, parameter: Parameter, value: Option<f64>) {
        let slot = match parameter {
            Parameter::Temperature => &mut self.temperature,
            Parameter::Pressure => &mut self.pressure,
            Parameter::Humidity => &mut self.humidity,
            Parameter::WindSpeed => &mut self.wind_speed,
            Parameter::WindGust => &mut self.wind_gust,
            Parameter::WindDirection => &mut self.wind_direction,
            Parameter::Precipitation => &mut self.precipitation,
            Parameter::CloudCover => &mut self.cloud_cover,
            Parameter::DewPoint => &mut self.dew_point,
            Parameter::SnowPrecipitation => &mut self.snow_precipitation,
            Parameter::WaterVapour => &mut self.water_vapour,
        };
        *slot = value;
    }

    pub(crate) fn with_estimated_condition(mut self) -> Self {
        self.weather_code = WeatherCondition::estimate(self.precipitation, self.cloud_cover);
        self
    }
}
