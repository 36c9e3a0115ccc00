use super::handlers;
use axum::{
    routing::{get, post},
    Router,
};

/// Creates the matches router with all match-related routes
pub fn matches_routes() -> Router {
    Router::new()
        // Read-side routes
        .route("/api/matches/:id/detail", get(handlers::get_match_detail))
        .route("/api/matches/:id/teams", get(handlers::get_match_teams))
        .route("/api/matches/:id/events", get(handlers::get_match_events))
        .route("/api/matches/:id/media", get(handlers::get_match_media))
        .route(
            "/api/matches/:id/status-history",
            get(handlers::get_match_status_history),
        )
        // Command routes
        .route("/api/matches/:id/score", post(handlers::record_score))
        .route("/api/matches/:id/finalize", post(handlers::finalize_match))
        .route("/api/matches/undo", post(handlers::undo_last_command))
        .route("/api/matches/history", get(handlers::list_command_history))
        // Introspection
        .route("/api/chains", get(handlers::list_chains))
}
