use super::handlers;
use axum::{routing::post, Router};

/// Creates the scheduling router
pub fn scheduling_routes() -> Router {
    Router::new().route("/api/matches", post(handlers::schedule_match))
}
