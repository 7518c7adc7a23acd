//! Role dashboards.

use axum::{extract::State, Json};
use domain::models::{
    AdminDashboard, AttendeeDashboard, Dashboard, EventView, OrganizerDashboard, UserRole,
};
use domain::services::partition_attendee_events;
use persistence::repositories::{DashboardRepository, EventRepository};
use tracing::debug;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::UserAuth;

async fn attendee_dashboard(state: &AppState, user_id: Uuid) -> Result<AttendeeDashboard, ApiError> {
    let events: Vec<EventView> = EventRepository::new(state.pool.clone())
        .list_reacted_by(user_id)
        .await?
        .into_iter()
        .map(EventView::from)
        .collect();

    let dashboard = partition_attendee_events(&state.day_window(), events);
    debug!(user_id = %user_id, events = dashboard.total(), "Built attendee dashboard");
    Ok(dashboard)
}

async fn organizer_dashboard(
    state: &AppState,
    organizer_id: Uuid,
) -> Result<OrganizerDashboard, ApiError> {
    let dashboard = DashboardRepository::new(state.pool.clone())
        .organizer_dashboard(
            organizer_id,
            &state.day_window(),
            &state.config.rollup_settings(),
        )
        .await?;
    debug!(
        organizer_id = %organizer_id,
        total_events = dashboard.total_events,
        "Built organizer dashboard"
    );
    Ok(dashboard)
}

async fn admin_dashboard(state: &AppState) -> Result<AdminDashboard, ApiError> {
    let dashboard = DashboardRepository::new(state.pool.clone())
        .admin_dashboard(&state.day_window(), &state.config.rollup_settings())
        .await?;
    debug!(
        total_users = dashboard.totals.users,
        total_events = dashboard.totals.events,
        "Built admin dashboard"
    );
    Ok(dashboard)
}

/// GET /api/v1/dashboard
///
/// The dashboard of the caller's role, tagged with `"role"`.
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Dashboard>, ApiError> {
    let dashboard = match auth.user.role {
        UserRole::Attendee => Dashboard::Attendee(attendee_dashboard(&state, auth.user_id()).await?),
        UserRole::Organizer => {
            Dashboard::Organizer(organizer_dashboard(&state, auth.user_id()).await?)
        }
        UserRole::Admin => Dashboard::Admin(admin_dashboard(&state).await?),
    };
    Ok(Json(dashboard))
}

/// GET /api/v1/dashboard/attendee
///
/// Any authenticated user may view the events they reacted to.
pub async fn get_attendee_dashboard(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<AttendeeDashboard>, ApiError> {
    Ok(Json(attendee_dashboard(&state, auth.user_id()).await?))
}

/// GET /api/v1/dashboard/organizer
pub async fn get_organizer_dashboard(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<OrganizerDashboard>, ApiError> {
    if auth.user.role != UserRole::Organizer {
        return Err(ApiError::Forbidden(
            "Organizer dashboard requires the organizer role".to_string(),
        ));
    }
    Ok(Json(organizer_dashboard(&state, auth.user_id()).await?))
}

/// GET /api/v1/dashboard/admin
pub async fn get_admin_dashboard(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<AdminDashboard>, ApiError> {
    if auth.user.role != UserRole::Admin {
        return Err(ApiError::Forbidden(
            "Admin dashboard requires the admin role".to_string(),
        ));
    }
    Ok(Json(admin_dashboard(&state).await?))
}
