//! Event entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{EventCategory, EventStatus, EventView, EventVisibility};
use sqlx::FromRow;
use uuid::Uuid;

use super::reaction::ReactionStatusDb;

/// Database enum for event_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "event_status", rename_all = "lowercase")]
pub enum EventStatusDb {
    Draft,
    Published,
    Cancelled,
}

impl From<EventStatusDb> for EventStatus {
    fn from(db_status: EventStatusDb) -> Self {
        match db_status {
            EventStatusDb::Draft => EventStatus::Draft,
            EventStatusDb::Published => EventStatus::Published,
            EventStatusDb::Cancelled => EventStatus::Cancelled,
        }
    }
}

impl From<EventStatus> for EventStatusDb {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Draft => EventStatusDb::Draft,
            EventStatus::Published => EventStatusDb::Published,
            EventStatus::Cancelled => EventStatusDb::Cancelled,
        }
    }
}

/// Database enum for event_visibility that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "event_visibility", rename_all = "lowercase")]
pub enum EventVisibilityDb {
    Public,
    Private,
}

impl From<EventVisibilityDb> for EventVisibility {
    fn from(db_visibility: EventVisibilityDb) -> Self {
        match db_visibility {
            EventVisibilityDb::Public => EventVisibility::Public,
            EventVisibilityDb::Private => EventVisibility::Private,
        }
    }
}

/// Database row mapping for the events table.
#[derive(Debug, Clone, FromRow)]
pub struct EventEntity {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub title: String,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub venue: String,
    pub location_map_url: String,
    pub visibility: EventVisibilityDb,
    pub status: EventStatusDb,
    pub capacity: i32,
    pub allow_waitlist: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventEntity> for domain::models::Event {
    fn from(entity: EventEntity) -> Self {
        Self {
            id: entity.id,
            organizer_id: entity.organizer_id,
            title: entity.title,
            description: entity.description,
            category_id: entity.category_id,
            tags: entity.tags,
            start_time: entity.start_time,
            end_time: entity.end_time,
            venue: entity.venue,
            location_map_url: entity.location_map_url,
            visibility: entity.visibility.into(),
            status: entity.status.into(),
            capacity: entity.capacity,
            allow_waitlist: entity.allow_waitlist,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// An event joined with its organizer, category, live counts and the
/// viewer's own reaction.
#[derive(Debug, Clone, FromRow)]
pub struct EventViewEntity {
    pub id: Uuid,
    pub organizer_id: Uuid,
    pub organizer_first_name: String,
    pub organizer_last_name: String,
    pub title: String,
    pub description: String,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub category_description: Option<String>,
    pub tags: Vec<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub venue: String,
    pub location_map_url: String,
    pub visibility: EventVisibilityDb,
    pub status: EventStatusDb,
    pub capacity: i32,
    pub allow_waitlist: bool,
    pub attending_count: i64,
    pub interested_count: i64,
    pub reaction_status: Option<ReactionStatusDb>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EventViewEntity> for EventView {
    fn from(entity: EventViewEntity) -> Self {
        let category = match (entity.category_id, entity.category_name) {
            (Some(id), Some(name)) => Some(EventCategory {
                id,
                name,
                description: entity.category_description.unwrap_or_default(),
            }),
            _ => None,
        };
        let organizer_name = format!(
            "{} {}",
            entity.organizer_first_name, entity.organizer_last_name
        )
        .trim()
        .to_string();

        Self {
            id: entity.id,
            organizer_id: entity.organizer_id,
            organizer_name,
            title: entity.title,
            description: entity.description,
            category,
            tags: entity.tags,
            start_time: entity.start_time,
            end_time: entity.end_time,
            venue: entity.venue,
            location_map_url: entity.location_map_url,
            visibility: entity.visibility.into(),
            status: entity.status.into(),
            capacity: entity.capacity,
            allow_waitlist: entity.allow_waitlist,
            attending_count: entity.attending_count,
            interested_count: entity.interested_count,
            reaction_status: entity.reaction_status.map(Into::into),
            is_full: entity.attending_count >= i64::from(entity.capacity),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
