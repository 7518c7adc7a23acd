//! Repository implementations.
//!
//! Repositories provide data access methods for entities.

pub mod dashboard;
pub mod event;
pub mod overview;
pub mod reaction;
pub mod schedule;
pub mod user;

pub use dashboard::DashboardRepository;
pub use event::{EventListFilter, EventRepository};
pub use overview::OverviewRepository;
pub use reaction::{ReactOutcome, ReactionRepository, ReactionStoreError};
pub use schedule::ScheduleRepository;
pub use user::UserRepository;
