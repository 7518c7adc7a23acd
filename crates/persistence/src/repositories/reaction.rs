//! Event reaction repository.
//!
//! All reaction writes for one event are serialized by a row lock on the
//! event, which closes the race between counting attendees and inserting a
//! new attending row.

use domain::models::{Actor, ReactionChoice, ReactionCounts, ReactionStatus};
use domain::services::{plan_transition, CapacitySnapshot, ReactionTransition};
use domain::DomainError;
use sqlx::{PgPool, Postgres, Row};
use thiserror::Error;
use uuid::Uuid;

use super::event::fetch_view;
use crate::entities::{
    EventStatusDb, EventViewEntity, EventVisibilityDb, ReactionEntity, ReactionStatusDb,
};
use crate::metrics::QueryTimer;

/// Failure of a reaction request.
#[derive(Debug, Error)]
pub enum ReactionStoreError {
    #[error("Event not found")]
    EventNotFound,

    #[error(transparent)]
    Rejected(#[from] DomainError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Result of a successful reaction request.
#[derive(Debug, Clone)]
pub struct ReactOutcome {
    pub transition: ReactionTransition,
    /// The event as seen by the caller after the write.
    pub view: EventViewEntity,
}

/// Inserts or overwrites the reaction of `user_id` on `event_id`.
///
/// The original `created_at` survives an overwrite.
pub async fn upsert_reaction<'e, E>(
    executor: E,
    user_id: Uuid,
    event_id: Uuid,
    status: ReactionStatus,
) -> Result<ReactionEntity, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, ReactionEntity>(
        r#"
        INSERT INTO event_reactions (user_id, event_id, status)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, event_id)
        DO UPDATE SET status = EXCLUDED.status, updated_at = NOW()
        RETURNING id, user_id, event_id, status, created_at
        "#,
    )
    .bind(user_id)
    .bind(event_id)
    .bind(ReactionStatusDb::from(status))
    .fetch_one(executor)
    .await
}

/// Removes the reaction of `user_id` on `event_id`. Returns whether a row existed.
pub async fn delete_reaction<'e, E>(
    executor: E,
    user_id: Uuid,
    event_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let result = sqlx::query("DELETE FROM event_reactions WHERE user_id = $1 AND event_id = $2")
        .bind(user_id)
        .bind(event_id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Repository for reaction-related database operations.
#[derive(Clone)]
pub struct ReactionRepository {
    pool: PgPool,
}

impl ReactionRepository {
    /// Creates a new ReactionRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies a reaction request and returns the refreshed event.
    ///
    /// Runs in one transaction: lock the event row, read the caller's
    /// current reaction and the attending count, plan, write, re-read.
    pub async fn react(
        &self,
        event_id: Uuid,
        actor: &Actor,
        choice: ReactionChoice,
    ) -> Result<ReactOutcome, ReactionStoreError> {
        let timer = QueryTimer::new("react_to_event");
        let mut tx = self.pool.begin().await?;

        let locked = sqlx::query(
            r#"
            SELECT organizer_id, visibility, status, capacity
            FROM events
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(ReactionStoreError::EventNotFound)?;

        let organizer_id: Uuid = locked.try_get("organizer_id")?;
        let visibility: EventVisibilityDb = locked.try_get("visibility")?;
        let status: EventStatusDb = locked.try_get("status")?;
        let capacity: i32 = locked.try_get("capacity")?;

        let current: Option<ReactionStatusDb> = sqlx::query_scalar(
            "SELECT status FROM event_reactions WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id)
        .bind(actor.user_id)
        .fetch_optional(&mut *tx)
        .await?;

        // A user holding a reaction may always withdraw it, even after the
        // event turned private or back to draft.
        let withdrawing = choice == ReactionChoice::None && current.is_some();
        if !withdrawing
            && !domain::models::event::visible_to(
                organizer_id,
                visibility.into(),
                status.into(),
                Some(actor),
            )
        {
            return Err(ReactionStoreError::EventNotFound);
        }

        let attending: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM event_reactions WHERE event_id = $1 AND status = 'attending'",
        )
        .bind(event_id)
        .fetch_one(&mut *tx)
        .await?;

        let transition = plan_transition(
            current.map(Into::into),
            choice,
            status.into(),
            CapacitySnapshot::new(capacity, attending),
        )?;

        match transition {
            ReactionTransition::Set(target) => {
                upsert_reaction(&mut *tx, actor.user_id, event_id, target).await?;
            }
            ReactionTransition::Clear => {
                delete_reaction(&mut *tx, actor.user_id, event_id).await?;
            }
            ReactionTransition::Unchanged => {}
        }

        let view = fetch_view(&mut *tx, event_id, Some(actor.user_id))
            .await?
            .ok_or(ReactionStoreError::EventNotFound)?;

        tx.commit().await?;
        timer.record();

        tracing::debug!(
            event_id = %event_id,
            user_id = %actor.user_id,
            transition = ?transition,
            "Reaction applied"
        );

        Ok(ReactOutcome { transition, view })
    }

    /// Sets a reaction without capacity planning.
    pub async fn set_reaction(
        &self,
        user_id: Uuid,
        event_id: Uuid,
        status: ReactionStatus,
    ) -> Result<ReactionEntity, sqlx::Error> {
        let timer = QueryTimer::new("set_reaction");
        let result = upsert_reaction(&self.pool, user_id, event_id, status).await;
        timer.record();
        result
    }

    /// Clears a reaction. Absent rows are not an error.
    pub async fn clear_reaction(&self, user_id: Uuid, event_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("clear_reaction");
        let result = delete_reaction(&self.pool, user_id, event_id).await;
        timer.record();
        result
    }

    /// Find the reaction of a user on an event.
    pub async fn find(
        &self,
        user_id: Uuid,
        event_id: Uuid,
    ) -> Result<Option<ReactionEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_reaction");
        let result = sqlx::query_as::<_, ReactionEntity>(
            r#"
            SELECT id, user_id, event_id, status, created_at
            FROM event_reactions
            WHERE user_id = $1 AND event_id = $2
            "#,
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Live attending and interested counts for an event.
    pub async fn counts(&self, event_id: Uuid) -> Result<ReactionCounts, sqlx::Error> {
        let timer = QueryTimer::new("count_reactions");
        let row = sqlx::query(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE status = 'attending') AS attending,
                COUNT(*) FILTER (WHERE status = 'interested') AS interested
            FROM event_reactions
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;
        timer.record();

        Ok(ReactionCounts {
            attending: row.get::<i64, _>("attending"),
            interested: row.get::<i64, _>("interested"),
        })
    }
}
