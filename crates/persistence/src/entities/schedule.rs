//! Event schedule entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the event_schedules table.
#[derive(Debug, Clone, FromRow)]
pub struct EventScheduleEntity {
    pub id: Uuid,
    pub event_id: Uuid,
    pub start_datetime: DateTime<Utc>,
    pub end_datetime: Option<DateTime<Utc>>,
    pub title: String,
    pub agenda: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventScheduleEntity> for domain::models::EventSchedule {
    fn from(entity: EventScheduleEntity) -> Self {
        Self {
            id: entity.id,
            event_id: entity.event_id,
            start_datetime: entity.start_datetime,
            end_datetime: entity.end_datetime,
            title: entity.title,
            agenda: entity.agenda,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
