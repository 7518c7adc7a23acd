//! Time-bucketed rollups, rankings and attendance rates.
//!
//! Storage returns sparse grouped counts; this module builds the dense,
//! zero-filled timelines the dashboards expose.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use std::collections::HashMap;

use super::temporal::DayWindow;
use crate::models::stats::{
    MonthBucket, MonthCount, MonthlyCount, MonthlyStat, YearBucket, YearCount, YearlyCount,
    YearlyStat,
};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
        .unwrap_or("")
}

/// `months_back` consecutive calendar months ending at the month of `today`,
/// oldest first.
pub fn month_keys(today: NaiveDate, months_back: u32) -> Vec<(i32, u32)> {
    let current = today.year() * 12 + today.month0() as i32;
    (0..months_back as i32)
        .rev()
        .map(|i| {
            let idx = current - i;
            (idx.div_euclid(12), idx.rem_euclid(12) as u32 + 1)
        })
        .collect()
}

/// The year of `today` and the `years_back - 1` preceding years, ascending.
pub fn year_keys(today: NaiveDate, years_back: u32) -> Vec<i32> {
    let current = today.year();
    (0..years_back as i32).rev().map(|i| current - i).collect()
}

/// First instant of the oldest month in the monthly window.
pub fn window_start_for_months(window: &DayWindow, months_back: u32) -> DateTime<Utc> {
    let today = window.today();
    let (year, month) = month_keys(today, months_back.max(1))[0];
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today);
    window.midnight_of(first)
}

/// First instant of the oldest year in the yearly window.
pub fn window_start_for_years(window: &DayWindow, years_back: u32) -> DateTime<Utc> {
    let today = window.today();
    let year = year_keys(today, years_back.max(1))[0];
    let first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(today);
    window.midnight_of(first)
}

/// Dense monthly event/attendee timeline for the organizer dashboard.
pub fn monthly_rollup(today: NaiveDate, months_back: u32, buckets: &[MonthBucket]) -> Vec<MonthlyStat> {
    let by_key: HashMap<(i32, u32), &MonthBucket> =
        buckets.iter().map(|b| ((b.year, b.month), b)).collect();

    month_keys(today, months_back)
        .into_iter()
        .map(|(year, month)| {
            let (events, attendees) = by_key
                .get(&(year, month))
                .map(|b| (b.events, b.attendees))
                .unwrap_or((0, 0));
            MonthlyStat {
                month: month_name(month).to_string(),
                year,
                events,
                attendees,
            }
        })
        .collect()
}

/// Dense yearly event/attendee timeline for the organizer dashboard.
pub fn yearly_rollup(today: NaiveDate, years_back: u32, buckets: &[YearBucket]) -> Vec<YearlyStat> {
    let by_year: HashMap<i32, &YearBucket> = buckets.iter().map(|b| (b.year, b)).collect();

    year_keys(today, years_back)
        .into_iter()
        .map(|year| {
            let (events, attendees) = by_year
                .get(&year)
                .map(|b| (b.events, b.attendees))
                .unwrap_or((0, 0));
            YearlyStat {
                year,
                events,
                attendees,
            }
        })
        .collect()
}

/// Dense monthly single-metric trend.
pub fn monthly_counts(today: NaiveDate, months_back: u32, counts: &[MonthCount]) -> Vec<MonthlyCount> {
    let by_key: HashMap<(i32, u32), i64> =
        counts.iter().map(|c| ((c.year, c.month), c.count)).collect();

    month_keys(today, months_back)
        .into_iter()
        .map(|(year, month)| MonthlyCount {
            month: month_name(month).to_string(),
            year,
            count: by_key.get(&(year, month)).copied().unwrap_or(0),
        })
        .collect()
}

/// Dense yearly single-metric trend.
pub fn yearly_counts(today: NaiveDate, years_back: u32, counts: &[YearCount]) -> Vec<YearlyCount> {
    let by_year: HashMap<i32, i64> = counts.iter().map(|c| (c.year, c.count)).collect();

    year_keys(today, years_back)
        .into_iter()
        .map(|year| YearlyCount {
            year,
            count: by_year.get(&year).copied().unwrap_or(0),
        })
        .collect()
}

/// Highest `score` first, ties broken by ascending `tie`, at most `n` items.
pub fn top_n<T, K, S, F>(mut items: Vec<T>, n: usize, score: S, tie: F) -> Vec<T>
where
    K: Ord,
    S: Fn(&T) -> i64,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| score(b).cmp(&score(a)).then_with(|| tie(a).cmp(&tie(b))));
    items.truncate(n);
    items
}

/// Attending share of capacity, or `None` when capacity is not positive.
pub fn attendance_rate(attending: i64, capacity: i32) -> Option<f64> {
    if capacity <= 0 {
        return None;
    }
    Some(attending as f64 / f64::from(capacity))
}

/// Mean of per-event attendance rates over `(attending, capacity)` samples.
///
/// Samples without a positive capacity are ignored. Returns 0.0 when no
/// sample qualifies.
pub fn mean_attendance_rate(samples: &[(i64, i32)]) -> f64 {
    let rates: Vec<f64> = samples
        .iter()
        .filter_map(|&(attending, capacity)| attendance_rate(attending, capacity))
        .collect();
    if rates.is_empty() {
        return 0.0;
    }
    rates.iter().sum::<f64>() / rates.len() as f64
}

/// Rounds to two decimal places.
pub fn round_rate(rate: f64) -> f64 {
    (rate * 100.0).round() / 100.0
}
