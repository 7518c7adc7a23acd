//! Role-scoped dashboard models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::EventView;
use super::stats::{MonthlyCount, MonthlyStat, YearlyCount, YearlyStat};

/// Events split by the viewer's own reaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReactionSplit {
    pub attending: Vec<EventView>,
    pub interested: Vec<EventView>,
}

/// Attendee view: the caller's reacted-to events in exclusive time buckets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendeeDashboard {
    pub today: ReactionSplit,
    pub ongoing: Vec<EventView>,
    pub upcoming: ReactionSplit,
    pub archived: Vec<EventView>,
}

impl AttendeeDashboard {
    pub fn total(&self) -> usize {
        self.today.attending.len()
            + self.today.interested.len()
            + self.ongoing.len()
            + self.upcoming.attending.len()
            + self.upcoming.interested.len()
            + self.archived.len()
    }
}

/// Organizer view over the organizer's own events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizerDashboard {
    pub total_events: i64,
    pub total_attendees: i64,
    pub monthly_stats: Vec<MonthlyStat>,
    pub yearly_stats: Vec<YearlyStat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminTotals {
    pub users: i64,
    pub events: i64,
    pub attendees: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCount {
    pub role: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminBreakdowns {
    pub users_by_role: Vec<RoleCount>,
    pub events_by_status: Vec<StatusCount>,
    pub events_by_category: Vec<CategoryCount>,
}

/// One trend per tracked metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSeries<T> {
    pub users: Vec<T>,
    pub events: Vec<T>,
    pub attendees: Vec<T>,
}

impl<T> Default for TrendSeries<T> {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            events: Vec::new(),
            attendees: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminTrends {
    pub monthly: TrendSeries<MonthlyCount>,
    pub yearly: TrendSeries<YearlyCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopEvent {
    pub id: Uuid,
    pub title: String,
    pub attendee_count: i64,
    pub capacity: i32,
    pub attendance_rate: Option<f64>,
}

/// Per-organizer totals; also used for organizer rankings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizerPerformance {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub events_count: i64,
    pub attendees_count: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminRankings {
    pub top_events_by_attendance: Vec<TopEvent>,
    pub top_organizers_by_events: Vec<OrganizerPerformance>,
    pub top_organizers_by_attendees: Vec<OrganizerPerformance>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemHealth {
    pub draft_events: i64,
    pub cancelled_events: i64,
    pub waitlist_enabled: i64,
    /// Events whose attending count has reached capacity.
    pub full_events: i64,
}

/// System-wide admin view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AdminDashboard {
    pub totals: AdminTotals,
    pub breakdowns: AdminBreakdowns,
    pub trends: AdminTrends,
    pub rankings: AdminRankings,
    pub organizer_performance: Vec<OrganizerPerformance>,
    pub system_health: SystemHealth,
}

/// Dashboard for whichever role the caller holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    Attendee(AttendeeDashboard),
    Organizer(OrganizerDashboard),
    Admin(AdminDashboard),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_tagged_by_role() {
        let json = serde_json::to_value(Dashboard::Organizer(OrganizerDashboard::default())).unwrap();
        assert_eq!(json["role"], "organizer");
        assert_eq!(json["total_events"], 0);
        assert!(json["monthly_stats"].is_array());
    }

    #[test]
    fn test_admin_dashboard_serialization_sections() {
        let json = serde_json::to_value(Dashboard::Admin(AdminDashboard::default())).unwrap();
        assert_eq!(json["role"], "admin");
        for section in [
            "totals",
            "breakdowns",
            "trends",
            "rankings",
            "organizer_performance",
            "system_health",
        ] {
            assert!(json.get(section).is_some(), "missing {section}");
        }
        assert!(json["trends"]["monthly"]["attendees"].is_array());
    }

    #[test]
    fn test_default_trends_are_empty() {
        let trends = AdminTrends::default();
        assert!(trends.monthly.users.is_empty());
        assert!(trends.yearly.attendees.is_empty());
        let series: TrendSeries<MonthlyCount> = TrendSeries::default();
        assert!(series.events.is_empty());
    }

    #[test]
    fn test_empty_attendee_dashboard_total() {
        assert_eq!(AttendeeDashboard::default().total(), 0);
    }
}
