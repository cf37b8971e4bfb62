//! Turns a [`RawCoverage`] into one [`TimestepRecord`] per time-axis entry.

use crate::coverage::coverage_json::RawCoverage;
use crate::coverage::error::DecodeError;
use crate::coverage::normalize::normalize;
use crate::types::parameter::{Parameter, ParameterSet};
use crate::types::timestep::TimestepRecord;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};
use serde_json::Value;

/// Decodes every timestep of `coverage` for the requested `parameters`.
///
/// Records come out in time-axis order; the axis is not sorted. A timestep with an
/// unparseable timestamp or a non-numeric value is logged and skipped. Parameters
/// missing from the ranges, or arrays shorter than the axis, give `None`.
///
/// # Errors
///
/// * [`DecodeError::MissingTimeAxis`] if `domain.axes.t.values` is absent or empty.
/// * [`DecodeError::MissingRanges`] if the document has no `ranges` object.
/// * [`DecodeError::NoUsableRecords`] if every timestep was skipped.
///
/// # Examples
///
/// ```
/// use edr_forecast::{decode_coverage, ParameterSet, RawCoverage, WeatherCondition};
///
/// let coverage: RawCoverage = serde_json::from_str(r#"{
///     "domain": {"axes": {"t": {"values": ["2025-06-01T12:00:00Z"]}}},
///     "ranges": {
///         "temperature-2m": {"values": [280.0]},
///         "fraction-of-cloud-cover": {"values": [0.9]}
///     }
/// }"#).unwrap();
///
/// let records = decode_coverage(&coverage, &ParameterSet::full()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert!((records[0].temperature.unwrap() - 6.85).abs() < 1e-9);
/// assert_eq!(records[0].cloud_cover, Some(90.0));
/// assert_eq!(records[0].weather_code, WeatherCondition::Cloudy);
/// ```
pub fn decode_coverage(
    coverage: &RawCoverage,
    parameters: &ParameterSet,
) -> Result<Vec<TimestepRecord>, DecodeError> {
    let time_axis = coverage
        .time_axis()
        .filter(|axis| !axis.is_empty())
        .ok_or(DecodeError::MissingTimeAxis)?;
    if coverage.ranges.is_none() {
        return Err(DecodeError::MissingRanges);
    }

    let mut records = Vec::with_capacity(time_axis.len());
    for (index, raw_time) in time_axis.iter().enumerate() {
        match decode_timestep(coverage, parameters, index, raw_time) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping timestep: {}", e),
        }
    }

    if records.is_empty() {
        return Err(DecodeError::NoUsableRecords {
            total: time_axis.len(),
        });
    }
    debug!(
        "Decoded {} of {} timesteps",
        records.len(),
        time_axis.len()
    );
    Ok(records)
}

fn decode_timestep(
    coverage: &RawCoverage,
    parameters: &ParameterSet,
    index: usize,
    raw_time: &Value,
) -> Result<TimestepRecord, DecodeError> {
    let time = raw_time
        .as_str()
        .and_then(parse_timestamp)
        .ok_or_else(|| DecodeError::InvalidTimestamp {
            index,
            value: raw_time.to_string(),
        })?;

    let mut record = TimestepRecord::empty(time);
    for parameter in parameters.iter() {
        let value = decode_value(parameter, index, coverage.value_at(parameter.code(), index))?;
        record.set(parameter, value);
    }
    Ok(record.with_estimated_condition())
}

fn decode_value(
    parameter: Parameter,
    index: usize,
    raw: Option<&Value>,
) -> Result<Option<f64>, DecodeError> {
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(|number| Some(normalize(parameter, number)))
            .ok_or_else(|| DecodeError::TypeMismatch {
                index,
                parameter: parameter.code().to_string(),
                value: value.to_string(),
            }),
    }
}

/// RFC 3339, or an offset-less ISO-8601 timestamp taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
