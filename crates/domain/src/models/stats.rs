//! Time-bucketed statistics models.

use serde::{Deserialize, Serialize};

/// Shape of the rollups and rankings a dashboard asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollupSettings {
    pub months_back: u32,
    pub years_back: u32,
    pub top_n: usize,
}

impl Default for RollupSettings {
    fn default() -> Self {
        Self {
            months_back: 12,
            years_back: 5,
            top_n: 5,
        }
    }
}

/// Grouped event and attendee counts for one calendar month (storage output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub events: i64,
    pub attendees: i64,
}

/// Grouped event and attendee counts for one calendar year (storage output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBucket {
    pub year: i32,
    pub events: i64,
    pub attendees: i64,
}

/// A single grouped count for one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCount {
    pub year: i32,
    pub month: u32,
    pub count: i64,
}

/// A single grouped count for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: i64,
}

/// Monthly entry of an organizer timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyStat {
    pub month: String,
    pub year: i32,
    pub events: i64,
    pub attendees: i64,
}

/// Yearly entry of an organizer timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyStat {
    pub year: i32,
    pub events: i64,
    pub attendees: i64,
}

/// Monthly entry of a single-metric trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub month: String,
    pub year: i32,
    pub count: i64,
}

/// Yearly entry of a single-metric trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyCount {
    pub year: i32,
    pub count: i64,
}
