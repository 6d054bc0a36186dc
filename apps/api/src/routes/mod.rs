pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::admin;
use crate::analysis::handlers as analysis_handlers;
use crate::matching::handlers as matching_handlers;
use crate::report::handlers as report_handlers;
use crate::state::AppState;

/// Upload size limit. Mirrors the 10 MB cap on resume files.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume intake and analysis
        .route(
            "/api/v1/resumes/upload",
            post(analysis_handlers::handle_upload_resume),
        )
        .route(
            "/api/v1/resumes/analyze-text",
            post(analysis_handlers::handle_analyze_text),
        )
        .route("/api/v1/resumes", get(analysis_handlers::handle_list_resumes))
        .route(
            "/api/v1/resumes/:id",
            get(analysis_handlers::handle_get_resume),
        )
        // Job matching
        .route(
            "/api/v1/matches",
            post(matching_handlers::handle_match_job).get(matching_handlers::handle_list_matches),
        )
        // Reports and aggregate stats
        .route(
            "/api/v1/reports",
            post(report_handlers::handle_generate_report),
        )
        .route("/api/v1/admin/stats", get(admin::handle_stats))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
