//! Event read endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::{EventView, ListEventsQuery};
use domain::services::{DayWindow, TimeBucket};
use persistence::repositories::{EventListFilter, EventRepository};
use serde::Serialize;
use shared::pagination::{decode_cursor, encode_cursor};
use tracing::debug;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::OptionalUserAuth;

/// An event together with its position relative to today.
#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    #[serde(flatten)]
    pub event: EventView,
    pub time_bucket: TimeBucket,
}

impl EventResponse {
    pub fn new(event: EventView, window: &DayWindow) -> Self {
        let time_bucket = window.classify(event.start_time, event.end_time);
        Self { event, time_bucket }
    }
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub limit: i64,
}

#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventResponse>,
    pub pagination: Pagination,
}

/// GET /api/v1/events
///
/// Newest start first, keyset-paginated on `(start_time, id)`. Anonymous
/// callers see public published and cancelled events only.
pub async fn list_events(
    State(state): State<AppState>,
    auth: OptionalUserAuth,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<EventListResponse>, ApiError> {
    query.validate()?;

    let limit = query.limit.unwrap_or(state.config.limits.default_page_size);
    shared::validation::validate_page_size(limit, state.config.limits.max_page_size).map_err(
        |e| {
            ApiError::Validation(
                e.message
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Invalid limit".to_string()),
            )
        },
    )?;

    let after = query.cursor.as_deref().map(decode_cursor).transpose()?;
    let actor = auth.actor();

    let filter = EventListFilter {
        viewer_id: actor.map(|a| a.user_id),
        viewer_is_admin: actor.map(|a| a.is_admin()).unwrap_or(false),
        status: query.parsed_status()?,
        search: query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        date_filter: query.parsed_date_filter()?,
        after,
    };

    let window = state.day_window();
    // One extra row tells whether another page exists.
    let mut rows = EventRepository::new(state.pool.clone())
        .list(&filter, &window, limit + 1)
        .await?;

    let has_more = rows.len() as i64 > limit;
    rows.truncate(limit as usize);

    let next_cursor = if has_more {
        rows.last().map(|row| encode_cursor(row.start_time, row.id))
    } else {
        None
    };

    let events: Vec<EventResponse> = rows
        .into_iter()
        .map(|row| EventResponse::new(row.into(), &window))
        .collect();

    debug!(
        count = events.len(),
        has_more,
        date_filter = ?filter.date_filter,
        "Listed events"
    );

    Ok(Json(EventListResponse {
        events,
        pagination: Pagination {
            next_cursor,
            has_more,
            limit,
        },
    }))
}

/// GET /api/v1/events/:event_id
///
/// Events the caller may not see are reported as missing.
pub async fn get_event(
    State(state): State<AppState>,
    auth: OptionalUserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<EventResponse>, ApiError> {
    let actor = auth.actor();

    let event: EventView = EventRepository::new(state.pool.clone())
        .find_view(event_id, auth.user_id())
        .await?
        .map(Into::into)
        .filter(|view: &EventView| view.is_visible_to(actor.as_ref()))
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))?;

    Ok(Json(EventResponse::new(event, &state.day_window())))
}
