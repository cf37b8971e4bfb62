use crate::types::weather_condition::WeatherCondition;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One calendar day (UTC) folded from its hourly timesteps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Instant of the first timestep seen for this day.
    pub time: DateTime<Utc>,
    /// `None` when no timestep of the day carried a temperature.
    pub temperature_max: Option<f64>,
    pub temperature_min: Option<f64>,
    /// Sum of the non-null precipitation values, `0.0` when there were none.
    pub precipitation_sum: f64,
    /// Value of the latest timestep in the day that had one.
    pub wind_speed_last: Option<f64>,
    pub wind_direction_last: Option<f64>,
    pub weather_code_last: WeatherCondition,
    /// Number of timesteps folded into this day.
    pub samples: usize,
}
