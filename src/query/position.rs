//! Builds the spatial, temporal and parameter selection for the EDR `position` endpoint.

use crate::edr_forecast::LatLon;
use crate::types::parameter::ParameterSet;
use bon::bon;
use chrono::{DateTime, Duration, Utc};

/// Forecast horizon used when none is given: five days.
pub const DEFAULT_HORIZON_HOURS: i64 = 120;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// An immutable position query, built fresh for every update.
///
/// # Examples
///
/// ```
/// use edr_forecast::{LatLon, ParameterSet, PositionQuery};
/// use chrono::{TimeZone, Utc};
///
/// let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
/// let query = PositionQuery::builder()
///     .location(LatLon(55.6761, 12.5683))
///     .parameters(ParameterSet::essential())
///     .now(now)
///     .build();
///
/// assert_eq!(query.coords(), "POINT(12.5683 55.6761)");
/// assert_eq!(query.datetime(), "2025-06-01T12:00:00Z/2025-06-06T12:00:00Z");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PositionQuery {
    location: LatLon,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    parameters: ParameterSet,
}

#[bon]
impl PositionQuery {
    /// Creates a query covering `now .. now + horizon`.
    ///
    /// # Arguments
    ///
    /// * `.location(LatLon)`: **Required.** The point to forecast for.
    /// * `.parameters(ParameterSet)`: **Required.** The parameters to request, in order.
    /// * `.now(DateTime<Utc>)`: **Required.** Start of the window, normally the clock's current time.
    /// * `.horizon(chrono::Duration)`: Optional. Length of the window. Defaults to 120 hours.
    ///   A window reaching past the last representable instant ends there.
    #[builder]
    pub fn new(
        location: LatLon,
        parameters: ParameterSet,
        now: DateTime<Utc>,
        horizon: Option<Duration>,
    ) -> Self {
        let horizon = horizon.unwrap_or_else(|| Duration::hours(DEFAULT_HORIZON_HOURS));
        Self {
            location,
            start: now,
            end: now
                .checked_add_signed(horizon)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            parameters,
        }
    }

    pub fn location(&self) -> LatLon {
        self.location
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// WKT point, longitude first.
    pub fn coords(&self) -> String {
        format!("POINT({} {})", self.location.1, self.location.0)
    }

    pub fn datetime(&self) -> String {
        format!(
            "{}/{}",
            self.start.format(DATETIME_FORMAT),
            self.end.format(DATETIME_FORMAT)
        )
    }

    /// Query string pairs in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        vec![
            ("coords".to_string(), self.coords()),
            ("datetime".to_string(), self.datetime()),
            ("parameter-name".to_string(), self.parameters.query_value()),
            ("f".to_string(), "CoverageJSON".to_string()),
        ]
    }
}
