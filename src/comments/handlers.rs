use super::models::{CommentDraft, CreateCommentRequest};
use crate::common::{ApiError, AppState};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// GET /api/matches/:id/comments
pub async fn get_comments(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(match_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let comments_service = state.read().await.comments.clone();

    let comments = comments_service.list_comments(match_id).await?;

    Ok(Json(comments))
}

/// POST /api/matches/:id/comments - Moderate and store a comment
pub async fn create_comment(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(match_id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comments_service = state.read().await.comments.clone();

    let comment = comments_service
        .post_comment(CommentDraft::new(match_id, request))
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}
