//! Event schedule repository.

use domain::models::CreateScheduleItem;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EventScheduleEntity;
use crate::metrics::QueryTimer;

/// Repository for event schedule database operations.
#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    /// Creates a new ScheduleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Schedules of an event, earliest first.
    pub async fn list_for_event(
        &self,
        event_id: Uuid,
    ) -> Result<Vec<EventScheduleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_event_schedules");
        let result = sqlx::query_as::<_, EventScheduleEntity>(
            r#"
            SELECT id, event_id, start_datetime, end_datetime, title, agenda, created_at, updated_at
            FROM event_schedules
            WHERE event_id = $1
            ORDER BY start_datetime ASC, id ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Inserts all items or none of them.
    pub async fn create_many(
        &self,
        event_id: Uuid,
        items: &[CreateScheduleItem],
    ) -> Result<Vec<EventScheduleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("create_event_schedules");
        let mut tx = self.pool.begin().await?;

        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let schedule = sqlx::query_as::<_, EventScheduleEntity>(
                r#"
                INSERT INTO event_schedules (event_id, start_datetime, end_datetime, title, agenda)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, event_id, start_datetime, end_datetime, title, agenda, created_at, updated_at
                "#,
            )
            .bind(event_id)
            .bind(item.start_datetime)
            .bind(item.end_datetime)
            .bind(item.title.trim())
            .bind(item.agenda.as_deref())
            .fetch_one(&mut *tx)
            .await?;
            created.push(schedule);
        }

        tx.commit().await?;
        timer.record();

        created.sort_by_key(|s| (s.start_datetime, s.id));
        Ok(created)
    }

    /// Deletes one schedule of an event. Returns whether a row was removed.
    pub async fn delete(&self, event_id: Uuid, schedule_id: Uuid) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("delete_event_schedule");
        let result = sqlx::query("DELETE FROM event_schedules WHERE id = $1 AND event_id = $2")
            .bind(schedule_id)
            .bind(event_id)
            .execute(&self.pool)
            .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }
}
