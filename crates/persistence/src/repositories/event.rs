//! Event repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::{DateFilter, EventStatus};
use domain::services::DayWindow;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

use crate::entities::{EventEntity, EventStatusDb, EventViewEntity};
use crate::metrics::QueryTimer;

/// Annotated event projection. `$1` is the viewer's user id (nullable).
macro_rules! event_view_select {
    () => {
        r#"
        SELECT
            e.id, e.organizer_id,
            u.first_name AS organizer_first_name, u.last_name AS organizer_last_name,
            e.title, e.description,
            e.category_id, c.name AS category_name, c.description AS category_description,
            e.tags, e.start_time, e.end_time, e.venue, e.location_map_url,
            e.visibility, e.status, e.capacity, e.allow_waitlist,
            (SELECT COUNT(*) FROM event_reactions r
              WHERE r.event_id = e.id AND r.status = 'attending') AS attending_count,
            (SELECT COUNT(*) FROM event_reactions r
              WHERE r.event_id = e.id AND r.status = 'interested') AS interested_count,
            (SELECT r.status FROM event_reactions r
              WHERE r.event_id = e.id AND r.user_id = $1) AS reaction_status,
            e.created_at, e.updated_at
        FROM events e
        JOIN users u ON u.id = e.organizer_id
        LEFT JOIN event_categories c ON c.id = e.category_id
        "#
    };
}

/// Filters for listing events.
#[derive(Debug, Clone, Default)]
pub struct EventListFilter {
    pub viewer_id: Option<Uuid>,
    /// Admins see private and draft events of every organizer.
    pub viewer_is_admin: bool,
    pub status: Option<EventStatus>,
    pub search: Option<String>,
    pub date_filter: Option<DateFilter>,
    /// Keyset position: events strictly before `(start_time, id)`.
    pub after: Option<(DateTime<Utc>, Uuid)>,
}

/// Reads an annotated event through any executor, so the reaction
/// transaction can read its own writes.
pub async fn fetch_view<'e, E>(
    executor: E,
    event_id: Uuid,
    viewer_id: Option<Uuid>,
) -> Result<Option<EventViewEntity>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query_as::<_, EventViewEntity>(concat!(event_view_select!(), " WHERE e.id = $2"))
        .bind(viewer_id)
        .bind(event_id)
        .fetch_optional(executor)
        .await
}

/// Repository for event-related database operations.
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Creates a new EventRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an event by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<EventEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_by_id");
        let result = sqlx::query_as::<_, EventEntity>(
            r#"
            SELECT id, organizer_id, title, description, category_id, tags, start_time, end_time,
                   venue, location_map_url, visibility, status, capacity, allow_waitlist,
                   created_at, updated_at
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find an event annotated with counts and the viewer's reaction.
    pub async fn find_view(
        &self,
        id: Uuid,
        viewer_id: Option<Uuid>,
    ) -> Result<Option<EventViewEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_event_view");
        let result = fetch_view(&self.pool, id, viewer_id).await;
        timer.record();
        result
    }

    /// List visible events, newest start first, fetching at most `limit` rows.
    ///
    /// Date predicates are evaluated against `window`. The `today` filter
    /// also admits events ongoing now.
    pub async fn list(
        &self,
        filter: &EventListFilter,
        window: &DayWindow,
        limit: i64,
    ) -> Result<Vec<EventViewEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events");
        let (cursor_time, cursor_id) = match filter.after {
            Some((time, id)) => (Some(time), Some(id)),
            None => (None, None),
        };

        let result = sqlx::query_as::<_, EventViewEntity>(concat!(
            event_view_select!(),
            r#"
            WHERE ((e.visibility = 'public' AND e.status <> 'draft')
                   OR $2::boolean
                   OR e.organizer_id = $1)
              AND ($3::event_status IS NULL OR e.status = $3)
              AND ($4::text IS NULL
                   OR e.title ILIKE '%' || $4 || '%'
                   OR e.venue ILIKE '%' || $4 || '%'
                   OR $4 = ANY(e.tags))
              AND ($5::text IS NULL
                   OR ($5 = 'archived' AND e.end_time < $6)
                   OR ($5 = 'today' AND (e.start_time BETWEEN $6 AND $7
                                         OR e.end_time BETWEEN $6 AND $7
                                         OR (e.start_time <= $8 AND e.end_time >= $8)))
                   OR ($5 = 'upcoming' AND e.start_time > $7)
                   OR ($5 = 'ongoing' AND e.start_time <= $8 AND e.end_time >= $8))
              AND ($9::timestamptz IS NULL OR (e.start_time, e.id) < ($9, $10))
            ORDER BY e.start_time DESC, e.id DESC
            LIMIT $11
            "#
        ))
        .bind(filter.viewer_id)
        .bind(filter.viewer_is_admin)
        .bind(filter.status.map(EventStatusDb::from))
        .bind(filter.search.as_deref())
        .bind(filter.date_filter.map(|f| f.as_str()))
        .bind(window.start)
        .bind(window.end)
        .bind(window.now)
        .bind(cursor_time)
        .bind(cursor_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Every event the user has reacted to, oldest start first.
    pub async fn list_reacted_by(&self, user_id: Uuid) -> Result<Vec<EventViewEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_events_reacted_by");
        let result = sqlx::query_as::<_, EventViewEntity>(concat!(
            event_view_select!(),
            r#"
            WHERE EXISTS (
                SELECT 1 FROM event_reactions r
                WHERE r.event_id = e.id AND r.user_id = $1
            )
            ORDER BY e.start_time ASC, e.id ASC
            "#
        ))
        .bind(Some(user_id))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
