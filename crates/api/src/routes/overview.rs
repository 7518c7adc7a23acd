//! Public platform overview.

use axum::{extract::State, Json};
use domain::models::PlatformOverview;
use persistence::repositories::OverviewRepository;
use tracing::debug;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/v1/overview
///
/// Unauthenticated landing-page statistics over published events.
pub async fn get_overview(State(state): State<AppState>) -> Result<Json<PlatformOverview>, ApiError> {
    let overview = OverviewRepository::new(state.pool.clone())
        .get_overview(state.clock.now())
        .await?;

    debug!(
        total_events = overview.stats.total_events,
        upcoming_events = overview.stats.upcoming_events,
        "Fetched platform overview"
    );

    Ok(Json(overview))
}
