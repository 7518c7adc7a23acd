//! Domain services for Event Pilot.
//!
//! Services contain business logic that operates on domain models.

pub mod aggregation;
pub mod clock;
pub mod dashboard;
pub mod reaction;
pub mod temporal;

pub use aggregation::{
    attendance_rate, mean_attendance_rate, month_keys, month_name, monthly_counts, monthly_rollup,
    round_rate, top_n, window_start_for_months, window_start_for_years, year_keys, yearly_counts,
    yearly_rollup,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::partition_attendee_events;
pub use reaction::{plan_transition, CapacitySnapshot, ReactionTransition};
pub use temporal::{DayWindow, TimeBucket};
