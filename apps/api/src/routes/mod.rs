pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction_handlers;
use crate::matching::handlers as matching_handlers;
use crate::sentiment::handlers as sentiment_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route(
            "/api/v1/resumes",
            post(extraction_handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/resumes/parse",
            post(extraction_handlers::handle_parse_resume),
        )
        .route(
            "/api/v1/resumes/:id",
            get(extraction_handlers::handle_get_resume),
        )
        // Job API
        .route("/api/v1/jobs", post(extraction_handlers::handle_create_job))
        .route(
            "/api/v1/jobs/parse",
            post(extraction_handlers::handle_parse_job),
        )
        .route("/api/v1/jobs/:id", get(extraction_handlers::handle_get_job))
        // Screening API
        .route(
            "/api/v1/jobs/:id/screen",
            post(matching_handlers::handle_screen_job),
        )
        .route(
            "/api/v1/jobs/:id/screenings",
            get(matching_handlers::handle_get_screenings),
        )
        // Interview API
        .route(
            "/api/v1/interviews",
            post(sentiment_handlers::handle_create_interview),
        )
        .route(
            "/api/v1/interviews/:id",
            get(sentiment_handlers::handle_get_interview),
        )
        .route(
            "/api/v1/interviews/:id/analyze",
            post(sentiment_handlers::handle_analyze_interview),
        )
        .with_state(state)
}
