//! Event reaction entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::ReactionStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database enum for reaction_status that maps to PostgreSQL enum type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "reaction_status", rename_all = "lowercase")]
pub enum ReactionStatusDb {
    Interested,
    Attending,
}

impl From<ReactionStatusDb> for ReactionStatus {
    fn from(db_status: ReactionStatusDb) -> Self {
        match db_status {
            ReactionStatusDb::Interested => ReactionStatus::Interested,
            ReactionStatusDb::Attending => ReactionStatus::Attending,
        }
    }
}

impl From<ReactionStatus> for ReactionStatusDb {
    fn from(status: ReactionStatus) -> Self {
        match status {
            ReactionStatus::Interested => ReactionStatusDb::Interested,
            ReactionStatus::Attending => ReactionStatusDb::Attending,
        }
    }
}

/// Database row mapping for the event_reactions table.
#[derive(Debug, Clone, FromRow)]
pub struct ReactionEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub event_id: Uuid,
    pub status: ReactionStatusDb,
    pub created_at: DateTime<Utc>,
}

impl From<ReactionEntity> for domain::models::Reaction {
    fn from(entity: ReactionEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            event_id: entity.event_id,
            status: entity.status.into(),
            created_at: entity.created_at,
        }
    }
}
