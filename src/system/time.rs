//! Time keeping module for PineTime

use chrono::NaiveDateTime;
use embassy_time::Instant;

/// Wall-clock anchor paired with the uptime instant it was captured at
pub struct TimeReference {
    /// Clock time
    time: NaiveDateTime,
    /// Related system time
    instant: Instant,
}

impl TimeReference {
    /// Create new time reference from NaiveDateTime
    pub fn from_datetime(time: NaiveDateTime) -> Self {
        Self {
            time,
            instant: Instant::now(),
        }
    }
}

pub struct TimeManager {
    reference: TimeReference,
}

impl TimeManager {
    /// Initialize time measurement from a reference point
    pub fn init(reference: TimeReference) -> Self {
        Self { reference }
    }

    /// Get current time
    pub fn get_time(&self) -> NaiveDateTime {
        let now = Instant::now();
        NaiveDateTime::from_timestamp_micros(
            self.reference.time.timestamp_micros()
                + now.duration_since(self.reference.instant).as_micros() as i64,
        )
        .unwrap()
    }
}
