//! Domain layer for the Event Pilot backend.
//!
//! This crate contains:
//! - Domain models (Event, Reaction, EventSchedule, dashboards)
//! - Business logic services (time classification, reaction transitions,
//!   statistics rollups, dashboard bucketing)
//! - Domain error types

pub mod error;
pub mod models;
pub mod services;

pub use error::DomainError;
