//! Classification of event intervals relative to "now".

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::models::event::DateFilter;

/// Exclusive time bucket of an event for a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeBucket {
    Ongoing,
    Today,
    Upcoming,
    Archived,
}

/// "Now" together with the local calendar day that contains it.
///
/// `start` is local midnight and `end` is 23:59:59.999999 of the same local
/// day, both expressed in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub now: DateTime<Utc>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    offset: FixedOffset,
}

impl DayWindow {
    pub fn new(now: DateTime<Utc>, offset: FixedOffset) -> Self {
        let today = now.with_timezone(&offset).date_naive();
        let start = local_midnight(today, offset);
        let end = start + Duration::days(1) - Duration::microseconds(1);

        Self {
            now,
            start,
            end,
            offset,
        }
    }

    /// Window for a UTC calendar day.
    pub fn utc(now: DateTime<Utc>) -> Self {
        Self::new(now, Utc.fix())
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }

    pub fn today(&self) -> NaiveDate {
        self.local_date(self.now)
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.offset).date_naive()
    }

    /// Local midnight of `date` as a UTC instant.
    pub fn midnight_of(&self, date: NaiveDate) -> DateTime<Utc> {
        local_midnight(date, self.offset)
    }

    pub fn is_ongoing(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start <= self.now && self.now <= end
    }

    /// Starts or ends on the local calendar day of `now`.
    pub fn touches_today(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let today = self.today();
        self.local_date(start) == today || self.local_date(end) == today
    }

    /// Classifies an interval into exactly one bucket.
    ///
    /// Precedence is ongoing, today, upcoming, archived. Once the first three
    /// fail, `start` is before today and `end` cannot reach into today or
    /// later without the interval being ongoing, so the rest is archived.
    /// Inverted intervals follow the same order.
    pub fn classify(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> TimeBucket {
        if self.is_ongoing(start, end) {
            TimeBucket::Ongoing
        } else if self.touches_today(start, end) {
            TimeBucket::Today
        } else if start > self.end {
            TimeBucket::Upcoming
        } else {
            TimeBucket::Archived
        }
    }

    /// Listing filter predicate. Unlike [`DayWindow::classify`] these overlap:
    /// `today` also admits events that are ongoing now.
    pub fn matches(&self, filter: DateFilter, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        match filter {
            DateFilter::Archived => end < self.start,
            DateFilter::Today => self.touches_today(start, end) || self.is_ongoing(start, end),
            DateFilter::Upcoming => start > self.end,
            DateFilter::Ongoing => self.is_ongoing(start, end),
        }
    }
}

fn local_midnight(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN) - Duration::seconds(i64::from(offset.local_minus_utc()));
    Utc.from_utc_datetime(&naive)
}
