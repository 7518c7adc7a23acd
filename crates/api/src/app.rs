use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use domain::services::{Clock, DayWindow, SystemClock};
use shared::jwt::{JwtError, TokenVerifier};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, security_headers_middleware, trace_id};
use crate::routes::{dashboard, events, health, overview, reactions, schedules};

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    /// Today window at the current instant, in the configured local offset.
    pub fn day_window(&self) -> DayWindow {
        DayWindow::new(self.clock.now(), self.config.utc_offset())
    }
}

pub fn create_app(config: Config, pool: PgPool) -> Result<Router, JwtError> {
    create_app_with_clock(config, pool, Arc::new(SystemClock))
}

/// Builds the router with an explicit time source.
pub fn create_app_with_clock(
    config: Config,
    pool: PgPool,
    clock: Arc<dyn Clock>,
) -> Result<Router, JwtError> {
    let verifier = TokenVerifier::from_rsa_pem(&config.jwt.public_key, config.jwt.leeway_secs)?;
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
        clock,
        verifier: Arc::new(verifier),
    };

    let cors = if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Authentication is enforced per handler through the UserAuth extractor;
    // event reads accept anonymous callers.
    let api_routes = Router::new()
        .route("/api/v1/overview", get(overview::get_overview))
        .route("/api/v1/events", get(events::list_events))
        .route("/api/v1/events/:event_id", get(events::get_event))
        .route("/api/v1/events/:event_id/react", post(reactions::react_to_event))
        .route(
            "/api/v1/events/:event_id/schedules",
            get(schedules::list_schedules).post(schedules::create_schedules),
        )
        .route(
            "/api/v1/events/:event_id/schedules/:schedule_id",
            delete(schedules::delete_schedule),
        )
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/dashboard/attendee", get(dashboard::get_attendee_dashboard))
        .route("/api/v1/dashboard/organizer", get(dashboard::get_organizer_dashboard))
        .route("/api/v1/dashboard/admin", get(dashboard::get_admin_dashboard));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Ok(Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state))
}
