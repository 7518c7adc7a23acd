//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod event;
pub mod reaction;
pub mod schedule;
pub mod stats;
pub mod user;

pub use event::{EventEntity, EventStatusDb, EventViewEntity, EventVisibilityDb};
pub use reaction::{ReactionEntity, ReactionStatusDb};
pub use schedule::EventScheduleEntity;
pub use stats::{MonthBucketEntity, MonthCountEntity, YearBucketEntity, YearCountEntity};
pub use user::{UserEntity, UserRoleDb};
