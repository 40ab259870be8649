use chrono::{DateTime, DurationRound, TimeDelta, Utc};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Run-wide clock values, computed once before dispatch so every market in
/// the batch shares the same row timestamp and the same day partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub timestamp: String, // "2023-01-19 10:31:00", no timezone suffix
    pub today: String,     // "2023-01-19"
}

impl Batch {
    pub fn at(now: DateTime<Utc>, bucket_secs: u32) -> Self {
        let bucket = TimeDelta::seconds(i64::from(bucket_secs.max(1)));
        let truncated = now.duration_trunc(bucket).unwrap_or(now);
        Self {
            timestamp: truncated.format(TIMESTAMP_FORMAT).to_string(),
            today: now.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn now(bucket_secs: u32) -> Self {
        Self::at(Utc::now(), bucket_secs)
    }
}
