use crate::types::timestep::TimestepRecord;

/// The hourly forecast: the decoded timesteps in order, optionally only the first `limit`.
pub fn hourly_forecast(records: &[TimestepRecord], limit: Option<usize>) -> Vec<TimestepRecord> {
    let take = limit.unwrap_or(records.len());
    records.iter().take(take).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn records(n: i64) -> Vec<TimestepRecord> {
        let start = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        (0..n)
            .map(|h| TimestepRecord::empty(start + Duration::hours(h)))
            .collect()
    }

    #[test]
    fn without_limit_everything_is_kept() {
        let input = records(5);
        assert_eq!(hourly_forecast(&input, None), input);
    }

    #[test]
    fn limit_keeps_the_earliest_records() {
        let input = records(5);
        let hourly = hourly_forecast(&input, Some(2));
        assert_eq!(hourly, input[..2]);
        assert_eq!(hourly_forecast(&input, Some(10)).len(), 5);
        assert!(hourly_forecast(&input, Some(0)).is_empty());
    }
}
