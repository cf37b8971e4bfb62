//! Folds timesteps into one [`DailyRecord`] per UTC calendar date.

use crate::types::daily::DailyRecord;
use crate::types::timestep::TimestepRecord;
use crate::types::weather_condition::WeatherCondition;
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::HashMap;

/// Groups `records` by UTC date, in the order each date first appears.
///
/// Per day: maximum and minimum of the non-null temperatures, the sum of non-null
/// precipitation, and the wind speed, wind direction and weather condition of the
/// latest timestep that had one.
///
/// # Examples
///
/// ```
/// use edr_forecast::{daily_forecast, TimestepRecord, WeatherCondition};
/// use chrono::{TimeZone, Utc};
///
/// let morning: TimestepRecord = serde_json::from_str(r#"{
///     "time": "2025-06-01T06:00:00Z", "temperature": -2.0, "precipitation": 0.5,
///     "weather_code": "rainy"
/// }"#).unwrap();
/// let mut noon = morning.clone();
/// noon.time = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
/// noon.temperature = Some(5.0);
/// noon.precipitation = Some(1.0);
///
/// let daily = daily_forecast(&[morning, noon]);
/// assert_eq!(daily.len(), 1);
/// assert_eq!(daily[0].temperature_max, Some(5.0));
/// assert_eq!(daily[0].temperature_min, Some(-2.0));
/// assert_eq!(daily[0].precipitation_sum, 1.5);
/// ```
pub fn daily_forecast(records: &[TimestepRecord]) -> Vec<DailyRecord> {
    let mut days: Vec<DayAccumulator> = Vec::new();
    let mut positions: HashMap<NaiveDate, usize> = HashMap::new();

    for record in records {
        let date = record.time.date_naive();
        let position = *positions.entry(date).or_insert_with(|| {
            days.push(DayAccumulator::new(date, record.time));
            days.len() - 1
        });
        days[position].add(record);
    }

    days.into_iter().map(DayAccumulator::finish).collect()
}

struct DayAccumulator {
    date: NaiveDate,
    first_time: DateTime<Utc>,
    temperature_max: Option<f64>,
    temperature_min: Option<f64>,
    precipitation_sum: f64,
    wind_speed_last: Option<f64>,
    wind_direction_last: Option<f64>,
    weather_code_last: WeatherCondition,
    samples: usize,
}

impl DayAccumulator {
    fn new(date: NaiveDate, first_time: DateTime<Utc>) -> Self {
        Self {
            date,
            first_time,
            temperature_max: None,
            temperature_min: None,
            precipitation_sum: 0.0,
            wind_speed_last: None,
            wind_direction_last: None,
            weather_code_last: WeatherCondition::Clear,
            samples: 0,
        }
    }

    fn add(&mut self, record: &TimestepRecord) {
        if let Some(t) = record.temperature {
            self.temperature_max = Some(self.temperature_max.map_or(t, |max| max.max(t)));
            self.temperature_min = Some(self.temperature_min.map_or(t, |min| min.min(t)));
        }
        if let Some(p) = record.precipitation {
            self.precipitation_sum += p;
        }
        if record.wind_speed.is_some() {
            self.wind_speed_last = record.wind_speed;
        }
        if record.wind_direction.is_some() {
            self.wind_direction_last = record.wind_direction;
        }
        self.weather_code_last = record.weather_code;
        self.samples += 1;
    }

    fn finish(self) -> DailyRecord {
        DailyRecord {
            date: self.date,
            time: self.first_time,
            temperature_max: self.temperature_max,
            temperature_min: self.temperature_min,
            precipitation_sum: self.precipitation_sum,
            wind_speed_last: self.wind_speed_last,
            wind_direction_last: self.wind_direction_last,
            weather_code_last: self.weather_code_last,
            samples: self.samples,
        }
    }
}
