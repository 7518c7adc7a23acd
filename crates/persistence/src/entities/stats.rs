//! Grouped statistics rows.
//!
//! Month and year numbers come from `EXTRACT(...)::int` and arrive as `i32`.

use domain::models::{MonthBucket, MonthCount, YearBucket, YearCount};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct MonthBucketEntity {
    pub year: i32,
    pub month: i32,
    pub events: i64,
    pub attendees: i64,
}

impl From<MonthBucketEntity> for MonthBucket {
    fn from(entity: MonthBucketEntity) -> Self {
        Self {
            year: entity.year,
            month: entity.month.max(0) as u32,
            events: entity.events,
            attendees: entity.attendees,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct YearBucketEntity {
    pub year: i32,
    pub events: i64,
    pub attendees: i64,
}

impl From<YearBucketEntity> for YearBucket {
    fn from(entity: YearBucketEntity) -> Self {
        Self {
            year: entity.year,
            events: entity.events,
            attendees: entity.attendees,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct MonthCountEntity {
    pub year: i32,
    pub month: i32,
    pub count: i64,
}

impl From<MonthCountEntity> for MonthCount {
    fn from(entity: MonthCountEntity) -> Self {
        Self {
            year: entity.year,
            month: entity.month.max(0) as u32,
            count: entity.count,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct YearCountEntity {
    pub year: i32,
    pub count: i64,
}

impl From<YearCountEntity> for YearCount {
    fn from(entity: YearCountEntity) -> Self {
        Self {
            year: entity.year,
            count: entity.count,
        }
    }
}
