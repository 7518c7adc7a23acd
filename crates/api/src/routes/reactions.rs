//! Reaction endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::ReactRequest;
use domain::services::ReactionTransition;
use domain::DomainError;
use persistence::repositories::{ReactionRepository, ReactionStoreError};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;
use crate::middleware::metrics::{record_capacity_rejection, record_reaction};
use crate::routes::events::EventResponse;

/// POST /api/v1/events/:event_id/react
///
/// Body `{"status": "interested" | "attending" | "none"}`. Returns the event
/// as it stands after the write, read in the same transaction.
///
/// Returns 400 for an unknown status, 404 for a missing or hidden event and
/// 409 `capacity_full` when no attending slot is left.
pub async fn react_to_event(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(event_id): Path<Uuid>,
    Json(request): Json<ReactRequest>,
) -> Result<Json<EventResponse>, ApiError> {
    let choice = request.choice()?;
    let actor = auth.actor();

    let outcome = match ReactionRepository::new(state.pool.clone())
        .react(event_id, &actor, choice)
        .await
    {
        Ok(outcome) => outcome,
        Err(err) => {
            if let ReactionStoreError::Rejected(DomainError::CapacityReached { .. }) = &err {
                record_capacity_rejection();
            }
            return Err(err.into());
        }
    };

    match outcome.transition {
        ReactionTransition::Set(status) => record_reaction(Some(status)),
        ReactionTransition::Clear => record_reaction(None),
        ReactionTransition::Unchanged => {}
    }

    info!(
        event_id = %event_id,
        user_id = %actor.user_id,
        choice = choice.as_str(),
        changed = outcome.transition.is_write(),
        attending = outcome.view.attending_count,
        "Reaction applied"
    );

    Ok(Json(EventResponse::new(
        outcome.view.into(),
        &state.day_window(),
    )))
}
