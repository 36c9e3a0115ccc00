use super::models::{ScheduleMatchCommand, ScheduleMatchRequest};
use crate::common::{ApiError, AppState};
use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tokio::sync::RwLock;

/// POST /api/matches - Schedule a new fixture
pub async fn schedule_match(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<ScheduleMatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (scheduling, facade) = {
        let app_state = state.read().await;
        (app_state.scheduling.clone(), app_state.facade.clone())
    };

    let match_id = scheduling
        .schedule_match(&ScheduleMatchCommand::from(request))
        .await?;

    let detail = facade.get_match_detail(match_id).await?;

    Ok((StatusCode::CREATED, Json(detail)))
}
