//! API route handlers.

pub mod dashboard;
pub mod events;
pub mod health;
pub mod overview;
pub mod reactions;
pub mod schedules;
