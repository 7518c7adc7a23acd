//! Domain models for Event Pilot.

pub mod dashboard;
pub mod event;
pub mod overview;
pub mod reaction;
pub mod schedule;
pub mod stats;
pub mod user;

pub use dashboard::{
    AdminBreakdowns, AdminDashboard, AdminRankings, AdminTotals, AdminTrends, AttendeeDashboard,
    CategoryCount, Dashboard, OrganizerDashboard, OrganizerPerformance, ReactionSplit, RoleCount,
    StatusCount, SystemHealth, TopEvent, TrendSeries,
};
pub use event::{
    DateFilter, Event, EventCategory, EventStatus, EventView, EventVisibility, ListEventsQuery,
};
pub use overview::{FeaturedOrganizer, LatestEvent, OverviewStats, PlatformOverview};
pub use reaction::{ReactRequest, Reaction, ReactionChoice, ReactionCounts, ReactionStatus};
pub use schedule::{CreateScheduleItem, CreateSchedulesRequest, EventSchedule};
pub use stats::{
    MonthBucket, MonthCount, MonthlyCount, MonthlyStat, RollupSettings, YearBucket, YearCount,
    YearlyCount, YearlyStat,
};
pub use user::{Actor, User, UserRole};
