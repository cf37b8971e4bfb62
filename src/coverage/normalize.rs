//! Unit detection and conversion for raw model output.
//!
//! The server may report Kelvin, Pascal and cloud fractions. Values are converted to
//! Celsius, hPa and percent when they look like the former units; values already in
//! the target unit pass through unchanged.

use crate::types::parameter::Parameter;

const KELVIN_OFFSET: f64 = 273.15;
const KELVIN_THRESHOLD: f64 = 200.0;
const PASCAL_THRESHOLD: f64 = 10_000.0;
const FRACTION_THRESHOLD: f64 = 1.0;

/// Converts `raw` for `parameter` to the unit the records use.
///
/// # Examples
///
/// ```
/// use edr_forecast::{normalize, Parameter};
///
/// assert!((normalize(Parameter::Temperature, 280.0) - 6.85).abs() < 1e-9);
/// assert_eq!(normalize(Parameter::Pressure, 101300.0), 1013.0);
/// assert_eq!(normalize(Parameter::CloudCover, 0.75), 75.0);
/// assert_eq!(normalize(Parameter::Humidity, 0.75), 0.75);
/// ```
pub fn normalize(parameter: Parameter, raw: f64) -> f64 {
    match parameter {
        Parameter::Temperature | Parameter::DewPoint if raw > KELVIN_THRESHOLD => {
            raw - KELVIN_OFFSET
        }
        Parameter::Pressure if raw > PASCAL_THRESHOLD => raw / 100.0,
        Parameter::CloudCover if raw <= FRACTION_THRESHOLD => raw * 100.0,
        _ => raw,
    }
}
