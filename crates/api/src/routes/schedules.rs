//! Event schedule endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{Actor, CreateSchedulesRequest, Event, EventSchedule};
use persistence::repositories::{EventRepository, ScheduleRepository};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{OptionalUserAuth, UserAuth};

/// Loads an event the caller may see, or reports it missing.
async fn visible_event(
    state: &AppState,
    event_id: Uuid,
    actor: Option<&Actor>,
) -> Result<Event, ApiError> {
    EventRepository::new(state.pool.clone())
        .find_by_id(event_id)
        .await?
        .map(Event::from)
        .filter(|event| event.is_visible_to(actor))
        .ok_or_else(|| ApiError::NotFound("Event not found".to_string()))
}

/// Loads an event the caller may manage.
async fn managed_event(state: &AppState, event_id: Uuid, actor: &Actor) -> Result<Event, ApiError> {
    let event = visible_event(state, event_id, Some(actor)).await?;
    if !event.is_managed_by(actor) {
        return Err(ApiError::Forbidden(
            "Only the event organizer or an admin can manage schedules".to_string(),
        ));
    }
    Ok(event)
}

/// Checks every item, reporting the first failure with its position.
fn validate_items(request: &CreateSchedulesRequest, max_items: usize) -> Result<(), ApiError> {
    if request.items.is_empty() {
        return Err(ApiError::Validation(
            "At least one schedule item is required".to_string(),
        ));
    }
    if request.items.len() > max_items {
        return Err(ApiError::Validation(format!(
            "At most {} schedule items can be created at once",
            max_items
        )));
    }

    for (index, item) in request.items.iter().enumerate() {
        if let Err(errors) = item.validate() {
            return match ApiError::from(errors) {
                ApiError::Validation(msg) => {
                    Err(ApiError::Validation(format!("items[{}]: {}", index, msg)))
                }
                other => Err(other),
            };
        }
    }
    Ok(())
}

/// GET /api/v1/events/:event_id/schedules
pub async fn list_schedules(
    State(state): State<AppState>,
    auth: OptionalUserAuth,
    Path(event_id): Path<Uuid>,
) -> Result<Json<Vec<EventSchedule>>, ApiError> {
    visible_event(&state, event_id, auth.actor().as_ref()).await?;

    let schedules = ScheduleRepository::new(state.pool.clone())
        .list_for_event(event_id)
        .await?
        .into_iter()
        .map(EventSchedule::from)
        .collect();

    Ok(Json(schedules))
}

/// POST /api/v1/events/:event_id/schedules
///
/// Creates every item or none of them. Organizer or admin only.
pub async fn create_schedules(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<CreateSchedulesRequest>,
) -> Result<(StatusCode, Json<Vec<EventSchedule>>), ApiError> {
    let actor = auth.actor();
    managed_event(&state, event_id, &actor).await?;
    validate_items(&request, state.config.limits.max_schedules_per_request)?;

    let created: Vec<EventSchedule> = ScheduleRepository::new(state.pool.clone())
        .create_many(event_id, &request.items)
        .await?
        .into_iter()
        .map(EventSchedule::from)
        .collect();

    info!(
        event_id = %event_id,
        user_id = %actor.user_id,
        count = created.len(),
        "Event schedules created"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/v1/events/:event_id/schedules/:schedule_id
pub async fn delete_schedule(
    State(state): State<AppState>,
    auth: UserAuth,
    Path((event_id, schedule_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let actor = auth.actor();
    managed_event(&state, event_id, &actor).await?;

    let removed = ScheduleRepository::new(state.pool.clone())
        .delete(event_id, schedule_id)
        .await?;
    if !removed {
        return Err(ApiError::NotFound("Schedule not found".to_string()));
    }

    info!(
        event_id = %event_id,
        schedule_id = %schedule_id,
        user_id = %actor.user_id,
        "Event schedule deleted"
    );

    Ok(StatusCode::NO_CONTENT)
}
