//! Public platform overview.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::dashboard::CategoryCount;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverviewStats {
    pub total_events: i64,
    pub upcoming_events: i64,
    pub registered_users: i64,
    pub total_attendees: i64,
    pub active_organizers: i64,
    pub avg_event_capacity: f64,
    pub avg_attendance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestEvent {
    pub id: Uuid,
    pub title: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub venue: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeaturedOrganizer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub event_count: i64,
}

/// Published-event statistics shown on the public landing page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlatformOverview {
    pub stats: OverviewStats,
    pub popular_categories: Vec<CategoryCount>,
    pub latest_events: Vec<LatestEvent>,
    pub featured_organizers: Vec<FeaturedOrganizer>,
}
