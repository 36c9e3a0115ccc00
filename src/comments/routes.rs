use super::handlers;
use axum::{routing::get, Router};

/// Creates the comments router
pub fn comments_routes() -> Router {
    Router::new().route(
        "/api/matches/:id/comments",
        get(handlers::get_comments).post(handlers::create_comment),
    )
}
