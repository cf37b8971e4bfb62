//! The subset of a CoverageJSON point-series document the decoder reads.
//!
//! Everything is optional or loosely typed here. Structural problems are reported by
//! the decoder, which can then be lenient about individual bad values.
//!
//! See: <https://covjson.org/>

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A CoverageJSON response from the `position` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawCoverage {
    /// Document type, normally "Coverage".
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<Domain>,

    /// Range objects per parameter code, kept untyped so one odd entry cannot
    /// reject the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ranges: Option<HashMap<String, Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Domain {
    #[serde(default)]
    pub axes: HashMap<String, Axis>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Axis {
    #[serde(default)]
    pub values: Vec<Value>,
}

impl RawCoverage {
    /// The `t` axis values, if the document has any.
    pub fn time_axis(&self) -> Option<&[Value]> {
        self.domain
            .as_ref()?
            .axes
            .get("t")
            .map(|axis| axis.values.as_slice())
    }

    /// The raw value of `code` at `index`, read from `ranges.{code}.values`.
    ///
    /// Missing codes, short arrays and range entries without a `values` array give `None`.
    pub fn value_at(&self, code: &str, index: usize) -> Option<&Value> {
        self.ranges
            .as_ref()?
            .get(code)?
            .get("values")?
            .as_array()?
            .get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_time_axis_and_ranges() {
        let coverage: RawCoverage = serde_json::from_value(json!({
            "type": "Coverage",
            "domain": {
                "type": "Domain",
                "domainType": "PointSeries",
                "axes": {
                    "x": {"values": [12.5]},
                    "y": {"values": [55.6]},
                    "t": {"values": ["2025-06-01T12:00:00Z", "2025-06-01T13:00:00Z"]}
                }
            },
            "parameters": {},
            "ranges": {
                "temperature-2m": {"type": "NdArray", "values": [285.1, null]}
            }
        }))
        .unwrap();

        assert_eq!(coverage.type_.as_deref(), Some("Coverage"));
        assert_eq!(coverage.time_axis().unwrap().len(), 2);
        assert_eq!(coverage.value_at("temperature-2m", 0), Some(&json!(285.1)));
        assert_eq!(coverage.value_at("temperature-2m", 1), Some(&Value::Null));
        assert_eq!(coverage.value_at("temperature-2m", 2), None);
        assert_eq!(coverage.value_at("pressure-sealevel", 0), None);
    }

    #[test]
    fn odd_range_entries_only_affect_their_own_code() {
        let coverage: RawCoverage = serde_json::from_value(json!({
            "domain": {"axes": {"t": {"values": ["2025-06-01T12:00:00Z"]}}},
            "ranges": {
                "foo": null,
                "bar": {"values": "not an array"},
                "wind-speed-10m": {"type": "NdArray"},
                "temperature-2m": {"values": [280.0]}
            }
        }))
        .unwrap();

        assert_eq!(coverage.value_at("temperature-2m", 0), Some(&json!(280.0)));
        assert_eq!(coverage.value_at("foo", 0), None);
        assert_eq!(coverage.value_at("bar", 0), None);
        assert_eq!(coverage.value_at("wind-speed-10m", 0), None);
    }

    #[test]
    fn empty_document_has_no_axis() {
        let coverage: RawCoverage = serde_json::from_str("{}").unwrap();
        assert!(coverage.time_axis().is_none());
        assert!(coverage.ranges.is_none());
    }
}
