//! Reaction state machine and capacity guard.
//!
//! Planning is pure: the persistence layer reads the current state under an
//! event row lock, asks [`plan_transition`] what to do, and applies the
//! result inside the same transaction.

use crate::error::DomainError;
use crate::models::event::EventStatus;
use crate::models::reaction::{ReactionChoice, ReactionStatus};

/// Attendance of one event at the moment of planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacitySnapshot {
    pub capacity: i32,
    pub attending: i64,
}

impl CapacitySnapshot {
    pub fn new(capacity: i32, attending: i64) -> Self {
        Self {
            capacity,
            attending,
        }
    }

    pub fn is_full(&self) -> bool {
        self.attending >= i64::from(self.capacity)
    }

    pub fn can_mark_attending(&self) -> bool {
        !self.is_full()
    }

    pub fn remaining(&self) -> i64 {
        (i64::from(self.capacity) - self.attending).max(0)
    }
}

/// What to do with the stored reaction row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionTransition {
    Unchanged,
    Set(ReactionStatus),
    Clear,
}

impl ReactionTransition {
    pub fn is_write(&self) -> bool {
        !matches!(self, ReactionTransition::Unchanged)
    }
}

/// Decides the transition from `current` to `choice`.
///
/// Re-requesting the stored status is always a no-op, so an attendee of a
/// full event is never rejected for asking again. Withdrawing is allowed on
/// any event; setting a status on a cancelled event is not.
pub fn plan_transition(
    current: Option<ReactionStatus>,
    choice: ReactionChoice,
    event_status: EventStatus,
    snapshot: CapacitySnapshot,
) -> Result<ReactionTransition, DomainError> {
    let target = match choice.target() {
        None => {
            return Ok(match current {
                Some(_) => ReactionTransition::Clear,
                None => ReactionTransition::Unchanged,
            });
        }
        Some(target) => target,
    };

    if current == Some(target) {
        return Ok(ReactionTransition::Unchanged);
    }

    if event_status == EventStatus::Cancelled {
        return Err(DomainError::Rule(
            "Cannot react to a cancelled event".to_string(),
        ));
    }

    if target == ReactionStatus::Attending && !snapshot.can_mark_attending() {
        return Err(DomainError::CapacityReached {
            capacity: snapshot.capacity,
        });
    }

    Ok(ReactionTransition::Set(target))
}
