//! Event schedule (agenda slot) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A slot on an event's agenda.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EventSchedule {
    pub id: Uuid,
    pub event_id: Uuid,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub title: String,
    pub agenda: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One schedule slot in a bulk creation request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[validate(schema(function = "validate_schedule_window"))]
pub struct CreateScheduleItem {
    pub start_datetime: DateTime<Utc>,

    #[serde(default)]
    pub end_datetime: Option<DateTime<Utc>>,

    #[validate(length(
        min = 1,
        max = 255,
        message = "Title must be between 1 and 255 characters"
    ))]
    #[validate(custom(function = "shared::validation::validate_not_blank"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(max = 255, message = "Agenda must be at most 255 characters"))]
    pub agenda: Option<String>,
}

/// Request payload for creating several schedule slots at once.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSchedulesRequest {
    pub items: Vec<CreateScheduleItem>,
}

fn validate_schedule_window(item: &CreateScheduleItem) -> Result<(), ValidationError> {
    match item.end_datetime {
        Some(end) => shared::validation::validate_time_range(item.start_datetime, end),
        None => Ok(()),
    }
}
