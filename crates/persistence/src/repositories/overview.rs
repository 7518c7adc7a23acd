//! Public platform overview repository.

use chrono::{DateTime, Utc};
use domain::models::{CategoryCount, FeaturedOrganizer, LatestEvent, OverviewStats, PlatformOverview};
use domain::services::{mean_attendance_rate, round_rate};
use sqlx::{PgPool, Row};

use crate::metrics::QueryTimer;

const POPULAR_CATEGORIES: i64 = 5;
const LATEST_EVENTS: i64 = 5;
const FEATURED_ORGANIZERS: i64 = 3;

/// Repository for the public overview statistics.
#[derive(Clone)]
pub struct OverviewRepository {
    pool: PgPool,
}

impl OverviewRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Published-event statistics as of `now`.
    pub async fn get_overview(&self, now: DateTime<Utc>) -> Result<PlatformOverview, sqlx::Error> {
        let timer = QueryTimer::new("platform_overview");
        let (stats, popular_categories, latest_events, featured_organizers) = tokio::try_join!(
            self.stats(now),
            self.popular_categories(),
            self.latest_events(),
            self.featured_organizers(),
        )?;
        timer.record();

        Ok(PlatformOverview {
            stats,
            popular_categories,
            latest_events,
            featured_organizers,
        })
    }

    async fn stats(&self, now: DateTime<Utc>) -> Result<OverviewStats, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM events WHERE status = 'published') AS total_events,
                (SELECT COUNT(*) FROM events
                  WHERE status = 'published' AND start_time >= $1) AS upcoming_events,
                (SELECT COUNT(*) FROM users) AS registered_users,
                (SELECT COUNT(*) FROM event_reactions WHERE status = 'attending') AS total_attendees,
                (SELECT COUNT(DISTINCT e.organizer_id) FROM events e
                  JOIN users u ON u.id = e.organizer_id
                  WHERE e.status = 'published' AND u.role = 'organizer') AS active_organizers
            "#,
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        // Per-event (attending, capacity) samples over published events.
        let samples: Vec<(i64, i32)> = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM event_reactions r
                  WHERE r.event_id = e.id AND r.status = 'attending') AS attending,
                e.capacity
            FROM events e
            WHERE e.status = 'published' AND e.capacity > 0
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let avg_event_capacity = if samples.is_empty() {
            0.0
        } else {
            samples.iter().map(|&(_, c)| f64::from(c)).sum::<f64>() / samples.len() as f64
        };

        Ok(OverviewStats {
            total_events: row.get::<i64, _>("total_events"),
            upcoming_events: row.get::<i64, _>("upcoming_events"),
            registered_users: row.get::<i64, _>("registered_users"),
            total_attendees: row.get::<i64, _>("total_attendees"),
            active_organizers: row.get::<i64, _>("active_organizers"),
            avg_event_capacity,
            avg_attendance_rate: round_rate(mean_attendance_rate(&samples)),
        })
    }

    async fn popular_categories(&self) -> Result<Vec<CategoryCount>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT c.name, COUNT(e.id) AS count
            FROM event_categories c
            JOIN events e ON e.category_id = c.id AND e.status = 'published'
            GROUP BY c.id, c.name
            ORDER BY count DESC, c.name ASC
            LIMIT $1
            "#,
        )
        .bind(POPULAR_CATEGORIES)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| CategoryCount {
                name: row.get("name"),
                count: row.get("count"),
            })
            .collect())
    }

    async fn latest_events(&self) -> Result<Vec<LatestEvent>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, start_time, end_time, venue, capacity
            FROM events
            WHERE status = 'published'
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(LATEST_EVENTS)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| LatestEvent {
                id: row.get("id"),
                title: row.get("title"),
                start_time: row.get("start_time"),
                end_time: row.get("end_time"),
                venue: row.get("venue"),
                capacity: row.get("capacity"),
            })
            .collect())
    }

    async fn featured_organizers(&self) -> Result<Vec<FeaturedOrganizer>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.first_name, u.last_name, u.email, COUNT(e.id) AS event_count
            FROM users u
            JOIN events e ON e.organizer_id = u.id AND e.status = 'published'
            WHERE u.role = 'organizer'
            GROUP BY u.id
            ORDER BY event_count DESC, u.id ASC
            LIMIT $1
            "#,
        )
        .bind(FEATURED_ORGANIZERS)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| FeaturedOrganizer {
                id: row.get("id"),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                email: row.get("email"),
                event_count: row.get("event_count"),
            })
            .collect())
    }
}
