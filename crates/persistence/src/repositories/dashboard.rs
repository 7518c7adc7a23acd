//! Dashboard statistics repository.
//!
//! Storage returns sparse grouped counts; skeleton filling and rankings are
//! done by the domain aggregation services.

use chrono::{DateTime, Utc};
use domain::models::{
    AdminBreakdowns, AdminDashboard, AdminRankings, AdminTotals, AdminTrends, CategoryCount,
    MonthBucket, MonthCount, OrganizerDashboard, OrganizerPerformance, RoleCount, RollupSettings,
    StatusCount, SystemHealth, TopEvent, TrendSeries, YearBucket, YearCount,
};
use domain::services::{
    attendance_rate, monthly_counts, monthly_rollup, top_n, window_start_for_months,
    window_start_for_years, yearly_counts, yearly_rollup, DayWindow,
};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::entities::{MonthBucketEntity, MonthCountEntity, YearBucketEntity, YearCountEntity};
use crate::metrics::QueryTimer;

/// Grouping expressions over a timestamp column shifted into the configured
/// UTC offset, given as a parameter placeholder in minutes.
macro_rules! local_year {
    ($ts:literal, $offset:literal) => {
        concat!(
            "EXTRACT(YEAR FROM (",
            $ts,
            " AT TIME ZONE 'UTC') + make_interval(mins => ",
            $offset,
            "))::int"
        )
    };
}

macro_rules! local_month {
    ($ts:literal, $offset:literal) => {
        concat!(
            "EXTRACT(MONTH FROM (",
            $ts,
            " AT TIME ZONE 'UTC') + make_interval(mins => ",
            $offset,
            "))::int"
        )
    };
}

/// Monthly single-metric trend. `$1` is the window start, `$2` the offset.
macro_rules! monthly_trend_sql {
    ($ts:literal, $from:literal) => {
        concat!(
            "SELECT ",
            local_year!($ts, "$2"),
            " AS year, ",
            local_month!($ts, "$2"),
            " AS month, COUNT(*) AS count FROM ",
            $from,
            " AND ",
            $ts,
            " >= $1 GROUP BY 1, 2"
        )
    };
}

/// Yearly single-metric trend. `$1` is the window start, `$2` the offset.
macro_rules! yearly_trend_sql {
    ($ts:literal, $from:literal) => {
        concat!(
            "SELECT ",
            local_year!($ts, "$2"),
            " AS year, COUNT(*) AS count FROM ",
            $from,
            " AND ",
            $ts,
            " >= $1 GROUP BY 1"
        )
    };
}

/// Metrics tracked by the admin trends.
#[derive(Debug, Clone, Copy)]
enum TrendMetric {
    Users,
    Events,
    Attendees,
}

impl TrendMetric {
    fn monthly_sql(self) -> &'static str {
        match self {
            TrendMetric::Users => monthly_trend_sql!("u.date_joined", "users u WHERE TRUE"),
            TrendMetric::Events => monthly_trend_sql!("e.start_time", "events e WHERE TRUE"),
            TrendMetric::Attendees => monthly_trend_sql!(
                "r.created_at",
                "event_reactions r WHERE r.status = 'attending'"
            ),
        }
    }

    fn yearly_sql(self) -> &'static str {
        match self {
            TrendMetric::Users => yearly_trend_sql!("u.date_joined", "users u WHERE TRUE"),
            TrendMetric::Events => yearly_trend_sql!("e.start_time", "events e WHERE TRUE"),
            TrendMetric::Attendees => yearly_trend_sql!(
                "r.created_at",
                "event_reactions r WHERE r.status = 'attending'"
            ),
        }
    }
}

/// Repository for dashboard statistics.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Organizer view over their own events that have started by now.
    pub async fn organizer_dashboard(
        &self,
        organizer_id: Uuid,
        window: &DayWindow,
        settings: &RollupSettings,
    ) -> Result<OrganizerDashboard, sqlx::Error> {
        let timer = QueryTimer::new("organizer_dashboard");
        let month_start = window_start_for_months(window, settings.months_back);
        let year_start = window_start_for_years(window, settings.years_back);

        let ((total_events, total_attendees), months, years) = tokio::try_join!(
            self.organizer_totals(organizer_id, window.now),
            self.organizer_month_buckets(organizer_id, month_start, window),
            self.organizer_year_buckets(organizer_id, year_start, window),
        )?;
        timer.record();

        let today = window.today();
        Ok(OrganizerDashboard {
            total_events,
            total_attendees,
            monthly_stats: monthly_rollup(today, settings.months_back, &months),
            yearly_stats: yearly_rollup(today, settings.years_back, &years),
        })
    }

    async fn organizer_totals(
        &self,
        organizer_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<(i64, i64), sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM events
                  WHERE organizer_id = $1 AND start_time <= $2) AS total_events,
                (SELECT COUNT(*) FROM event_reactions r
                  JOIN events e ON e.id = r.event_id
                  WHERE e.organizer_id = $1 AND e.start_time <= $2
                    AND r.status = 'attending') AS total_attendees
            "#,
        )
        .bind(organizer_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok((
            row.get::<i64, _>("total_events"),
            row.get::<i64, _>("total_attendees"),
        ))
    }

    async fn organizer_month_buckets(
        &self,
        organizer_id: Uuid,
        start: DateTime<Utc>,
        window: &DayWindow,
    ) -> Result<Vec<MonthBucket>, sqlx::Error> {
        let rows = sqlx::query_as::<_, MonthBucketEntity>(concat!(
            "SELECT ",
            local_year!("e.start_time", "$3"),
            " AS year, ",
            local_month!("e.start_time", "$3"),
            r#" AS month,
                COUNT(DISTINCT e.id) AS events,
                COUNT(r.id) AS attendees
            FROM events e
            LEFT JOIN event_reactions r ON r.event_id = e.id AND r.status = 'attending'
            WHERE e.organizer_id = $1 AND e.start_time >= $2 AND e.start_time <= $4
            GROUP BY 1, 2
            "#
        ))
        .bind(organizer_id)
        .bind(start)
        .bind(window.offset_minutes())
        .bind(window.now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn organizer_year_buckets(
        &self,
        organizer_id: Uuid,
        start: DateTime<Utc>,
        window: &DayWindow,
    ) -> Result<Vec<YearBucket>, sqlx::Error> {
        let rows = sqlx::query_as::<_, YearBucketEntity>(concat!(
            "SELECT ",
            local_year!("e.start_time", "$3"),
            r#" AS year,
                COUNT(DISTINCT e.id) AS events,
                COUNT(r.id) AS attendees
            FROM events e
            LEFT JOIN event_reactions r ON r.event_id = e.id AND r.status = 'attending'
            WHERE e.organizer_id = $1 AND e.start_time >= $2 AND e.start_time <= $4
            GROUP BY 1
            "#
        ))
        .bind(organizer_id)
        .bind(start)
        .bind(window.offset_minutes())
        .bind(window.now)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// System-wide admin view.
    pub async fn admin_dashboard(
        &self,
        window: &DayWindow,
        settings: &RollupSettings,
    ) -> Result<AdminDashboard, sqlx::Error> {
        let timer = QueryTimer::new("admin_dashboard");

        // Run all sections in parallel
        let (totals, breakdowns, trends, top_events, organizer_performance, system_health) =
            tokio::try_join!(
                self.admin_totals(),
                self.admin_breakdowns(),
                self.admin_trends(window, settings),
                self.top_events_by_attendance(settings.top_n),
                self.organizer_performance(),
                self.system_health(),
            )?;
        timer.record();

        let rankings = AdminRankings {
            top_events_by_attendance: top_events,
            top_organizers_by_events: top_n(
                organizer_performance.clone(),
                settings.top_n,
                |o| o.events_count,
                |o| o.id,
            ),
            top_organizers_by_attendees: top_n(
                organizer_performance.clone(),
                settings.top_n,
                |o| o.attendees_count,
                |o| o.id,
            ),
        };

        Ok(AdminDashboard {
            totals,
            breakdowns,
            trends,
            rankings,
            organizer_performance,
            system_health,
        })
    }

    async fn admin_totals(&self) -> Result<AdminTotals, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users) AS users,
                (SELECT COUNT(*) FROM events) AS events,
                (SELECT COUNT(*) FROM event_reactions WHERE status = 'attending') AS attendees
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(AdminTotals {
            users: row.get::<i64, _>("users"),
            events: row.get::<i64, _>("events"),
            attendees: row.get::<i64, _>("attendees"),
        })
    }

    async fn admin_breakdowns(&self) -> Result<AdminBreakdowns, sqlx::Error> {
        let role_rows = sqlx::query(
            r#"
            SELECT role::text AS role, COUNT(*) AS count
            FROM users
            GROUP BY role
            ORDER BY role
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let status_rows = sqlx::query(
            r#"
            SELECT status::text AS status, COUNT(*) AS count
            FROM events
            GROUP BY status
            ORDER BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let category_rows = sqlx::query(
            r#"
            SELECT c.name AS name, COUNT(e.id) AS count
            FROM event_categories c
            LEFT JOIN events e ON e.category_id = c.id
            GROUP BY c.id, c.name
            ORDER BY count DESC, c.name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(AdminBreakdowns {
            users_by_role: role_rows
                .iter()
                .map(|row| RoleCount {
                    role: row.get("role"),
                    count: row.get("count"),
                })
                .collect(),
            events_by_status: status_rows
                .iter()
                .map(|row| StatusCount {
                    status: row.get("status"),
                    count: row.get("count"),
                })
                .collect(),
            events_by_category: category_rows
                .iter()
                .map(|row| CategoryCount {
                    name: row.get("name"),
                    count: row.get("count"),
                })
                .collect(),
        })
    }

    async fn admin_trends(
        &self,
        window: &DayWindow,
        settings: &RollupSettings,
    ) -> Result<AdminTrends, sqlx::Error> {
        let month_start = window_start_for_months(window, settings.months_back);
        let year_start = window_start_for_years(window, settings.years_back);
        let offset = window.offset_minutes();

        let (users_m, events_m, attendees_m, users_y, events_y, attendees_y) = tokio::try_join!(
            self.month_counts(TrendMetric::Users, month_start, offset),
            self.month_counts(TrendMetric::Events, month_start, offset),
            self.month_counts(TrendMetric::Attendees, month_start, offset),
            self.year_counts(TrendMetric::Users, year_start, offset),
            self.year_counts(TrendMetric::Events, year_start, offset),
            self.year_counts(TrendMetric::Attendees, year_start, offset),
        )?;

        let today = window.today();
        let (months, years) = (settings.months_back, settings.years_back);
        Ok(AdminTrends {
            monthly: TrendSeries {
                users: monthly_counts(today, months, &users_m),
                events: monthly_counts(today, months, &events_m),
                attendees: monthly_counts(today, months, &attendees_m),
            },
            yearly: TrendSeries {
                users: yearly_counts(today, years, &users_y),
                events: yearly_counts(today, years, &events_y),
                attendees: yearly_counts(today, years, &attendees_y),
            },
        })
    }

    async fn month_counts(
        &self,
        metric: TrendMetric,
        start: DateTime<Utc>,
        offset_minutes: i32,
    ) -> Result<Vec<MonthCount>, sqlx::Error> {
        let rows = sqlx::query_as::<_, MonthCountEntity>(metric.monthly_sql())
            .bind(start)
            .bind(offset_minutes)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn year_counts(
        &self,
        metric: TrendMetric,
        start: DateTime<Utc>,
        offset_minutes: i32,
    ) -> Result<Vec<YearCount>, sqlx::Error> {
        let rows = sqlx::query_as::<_, YearCountEntity>(metric.yearly_sql())
            .bind(start)
            .bind(offset_minutes)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn top_events_by_attendance(&self, limit: usize) -> Result<Vec<TopEvent>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.title, e.capacity, COUNT(r.id) AS attendee_count
            FROM events e
            LEFT JOIN event_reactions r ON r.event_id = e.id AND r.status = 'attending'
            GROUP BY e.id
            ORDER BY attendee_count DESC, e.id ASC
            LIMIT $1
            "#,
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let attendee_count: i64 = row.get("attendee_count");
                let capacity: i32 = row.get("capacity");
                TopEvent {
                    id: row.get("id"),
                    title: row.get("title"),
                    attendee_count,
                    capacity,
                    attendance_rate: attendance_rate(attendee_count, capacity),
                }
            })
            .collect())
    }

    /// Every organizer with event and attendee totals, most events first.
    async fn organizer_performance(&self) -> Result<Vec<OrganizerPerformance>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT u.id, u.first_name, u.last_name,
                   COUNT(DISTINCT e.id) AS events_count,
                   COUNT(r.id) AS attendees_count
            FROM users u
            LEFT JOIN events e ON e.organizer_id = u.id
            LEFT JOIN event_reactions r ON r.event_id = e.id AND r.status = 'attending'
            WHERE u.role = 'organizer'
            GROUP BY u.id
            ORDER BY events_count DESC, u.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| OrganizerPerformance {
                id: row.get("id"),
                first_name: row.get("first_name"),
                last_name: row.get("last_name"),
                events_count: row.get("events_count"),
                attendees_count: row.get("attendees_count"),
            })
            .collect())
    }

    async fn system_health(&self) -> Result<SystemHealth, sqlx::Error> {
        let row = sqlx::query(
            r#"
            WITH attendance AS (
                SELECT e.id, e.status, e.allow_waitlist, e.capacity, COUNT(r.id) AS attending
                FROM events e
                LEFT JOIN event_reactions r ON r.event_id = e.id AND r.status = 'attending'
                GROUP BY e.id
            )
            SELECT
                COUNT(*) FILTER (WHERE status = 'draft') AS draft_events,
                COUNT(*) FILTER (WHERE status = 'cancelled') AS cancelled_events,
                COUNT(*) FILTER (WHERE allow_waitlist) AS waitlist_enabled,
                COUNT(*) FILTER (WHERE attending >= capacity) AS full_events
            FROM attendance
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(SystemHealth {
            draft_events: row.get::<i64, _>("draft_events"),
            cancelled_events: row.get::<i64, _>("cancelled_events"),
            waitlist_enabled: row.get::<i64, _>("waitlist_enabled"),
            full_events: row.get::<i64, _>("full_events"),
        })
    }
}
