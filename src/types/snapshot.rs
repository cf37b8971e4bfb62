use crate::types::daily::DailyRecord;
use crate::types::timestep::TimestepRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The result of one successful forecast update.
///
/// A snapshot is never modified after it is built: the client replaces it as a whole,
/// so readers always see either the previous update or the next one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The first decoded timestep, used as current conditions.
    pub current: Option<TimestepRecord>,
    pub hourly: Vec<TimestepRecord>,
    pub daily: Vec<DailyRecord>,
    /// The EDR collection the data came from.
    pub collection_id: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// `true` until the first successful update.
    pub fn is_empty(&self) -> bool {
        self.current.is_none() && self.hourly.is_empty() && self.daily.is_empty()
    }
}
