//! Defines the forecast quantities that can be requested from an EDR position query
//! and the ordered sets of them sent in the `parameter-name` query field.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A forecast quantity, identified on the wire by its EDR parameter code.
///
/// # Examples
///
/// ```
/// use edr_forecast::Parameter;
///
/// assert_eq!(Parameter::Temperature.code(), "temperature-2m");
/// assert_eq!(Parameter::from_code("total-precipitation"), Some(Parameter::Precipitation));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parameter {
    /// Air temperature 2 m above ground.
    Temperature,
    /// Pressure reduced to sea level.
    Pressure,
    /// Relative humidity 2 m above ground, in percent.
    Humidity,
    /// Mean wind speed 10 m above ground.
    WindSpeed,
    /// Wind gust speed 10 m above ground.
    WindGust,
    /// Wind direction 10 m above ground, in degrees.
    WindDirection,
    /// Total precipitation.
    Precipitation,
    /// Cloud cover.
    CloudCover,
    /// Dew point temperature 2 m above ground.
    DewPoint,
    /// Solid (snow) precipitation.
    SnowPrecipitation,
    /// Vertically integrated water vapour column.
    WaterVapour,
}

impl Parameter {
    /// Every known parameter, in record field order.
    pub const ALL: [Parameter; 11] = [
        Parameter::Temperature,
        Parameter::Pressure,
        Parameter::Humidity,
        Parameter::WindSpeed,
        Parameter::WindGust,
        Parameter::WindDirection,
        Parameter::Precipitation,
        Parameter::CloudCover,
        Parameter::DewPoint,
        Parameter::SnowPrecipitation,
        Parameter::WaterVapour,
    ];

    /// The EDR parameter code used in queries and as the key in CoverageJSON `ranges`.
    pub const fn code(&self) -> &'static str {
        match self {
            Parameter::Temperature => "temperature-2m",
            Parameter::Pressure => "pressure-sealevel",
            Parameter::Humidity => "relative-humidity-2m",
            Parameter::WindSpeed => "wind-speed-10m",
            Parameter::WindGust => "gust-wind-speed-10m",
            Parameter::WindDirection => "wind-dir-10m",
            Parameter::Precipitation => "total-precipitation",
            Parameter::CloudCover => "fraction-of-cloud-cover",
            Parameter::DewPoint => "dew-point-temperature-2m",
            Parameter::SnowPrecipitation => "time-integral-of-total-solid-precipitation-flux",
            Parameter::WaterVapour => "total-column-vertically-integrated-water-vapour",
        }
    }

    /// Looks up a parameter by its EDR code.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// An ordered, duplicate-free list of parameters to request.
///
/// Order is kept as given; it only affects the `parameter-name` query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Parameter>", into = "Vec<Parameter>")]
pub struct ParameterSet(Vec<Parameter>);

impl ParameterSet {
    /// Builds a set from any iterator, dropping repeated entries after their first occurrence.
    pub fn new(parameters: impl IntoIterator<Item = Parameter>) -> Self {
        let mut unique = Vec::new();
        for parameter in parameters {
            if !unique.contains(&parameter) {
                unique.push(parameter);
            }
        }
        Self(unique)
    }

    /// The ten parameters requested by default.
    pub fn full() -> Self {
        Self::new([
            Parameter::Temperature,
            Parameter::Pressure,
            Parameter::Humidity,
            Parameter::WindSpeed,
            Parameter::WindGust,
            Parameter::Precipitation,
            Parameter::CloudCover,
            Parameter::DewPoint,
            Parameter::SnowPrecipitation,
            Parameter::WaterVapour,
        ])
    }

    /// A reduced set for slow or heavily rate-limited deployments.
    pub fn essential() -> Self {
        Self::new([
            Parameter::Temperature,
            Parameter::WindSpeed,
            Parameter::WindGust,
            Parameter::Precipitation,
            Parameter::CloudCover,
        ])
    }

    pub fn contains(&self, parameter: Parameter) -> bool {
        self.0.contains(&parameter)
    }

    pub fn iter(&self) -> impl Iterator<Item = Parameter> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy with `parameter` appended if it is not already present.
    pub fn with(mut self, parameter: Parameter) -> Self {
        if !self.contains(parameter) {
            self.0.push(parameter);
        }
        self
    }

    /// Comma-joined wire codes, the value of the `parameter-name` query field.
    pub fn query_value(&self) -> String {
        self.0
            .iter()
            .map(Parameter::code)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::full()
    }
}

impl From<Vec<Parameter>> for ParameterSet {
    fn from(parameters: Vec<Parameter>) -> Self {
        Self::new(parameters)
    }
}

impl From<ParameterSet> for Vec<Parameter> {
    fn from(set: ParameterSet) -> Self {
        set.0
    }
}
