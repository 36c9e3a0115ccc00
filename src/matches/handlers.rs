use super::commands::{FinalizeMatchCommand, ScoreEntryCommand};
use super::models::{FinalizeMatchRequest, ScoreEntryRequest, UndoRequest};
use crate::common::{ApiError, AppState};
use crate::matches::services::describe;
use axum::{
    extract::{Extension, Path},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

// ============================================================================
// Match Detail Handlers
// ============================================================================

/// GET /api/matches/:id/detail - Full match detail in one response
pub async fn get_match_detail(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(match_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let facade = state.read().await.facade.clone();

    let detail = facade.get_match_detail(match_id).await?;

    Ok(Json(detail))
}

/// GET /api/matches/:id/teams - Team assignments only
pub async fn get_match_teams(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(match_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let facade = state.read().await.facade.clone();

    let teams = facade.get_match_teams(match_id).await?;

    Ok(Json(teams))
}

/// GET /api/matches/:id/events - Player events only
pub async fn get_match_events(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(match_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let facade = state.read().await.facade.clone();

    let events = facade.get_match_events(match_id).await?;

    Ok(Json(events))
}

/// GET /api/matches/:id/media
pub async fn get_match_media(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(match_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let facade = state.read().await.facade.clone();

    let media = facade.get_match_media(match_id).await?;

    Ok(Json(media))
}

/// GET /api/matches/:id/status-history
pub async fn get_match_status_history(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(match_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let facade = state.read().await.facade.clone();

    let history = facade.get_match_status_history(match_id).await?;

    Ok(Json(history))
}

// ============================================================================
// Command Handlers
// ============================================================================

/// POST /api/matches/:id/score - Record the running score
pub async fn record_score(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(match_id): Path<i64>,
    Json(request): Json<ScoreEntryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (commands, facade) = {
        let app_state = state.read().await;
        (app_state.commands.clone(), app_state.facade.clone())
    };

    let command = ScoreEntryCommand::new(match_id, request);
    commands.record_score(&command).await?;

    let detail = facade.get_match_detail(match_id).await?;

    Ok(Json(detail))
}

/// POST /api/matches/:id/finalize - Close the match with its final result
pub async fn finalize_match(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Path(match_id): Path<i64>,
    Json(request): Json<FinalizeMatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (commands, facade) = {
        let app_state = state.read().await;
        (app_state.commands.clone(), app_state.facade.clone())
    };

    let command = FinalizeMatchCommand::new(match_id, request);
    commands.finalize_match(&command).await?;

    info!("Match {} finalized via API", match_id);

    let detail = facade.get_match_detail(match_id).await?;

    Ok(Json(detail))
}

/// POST /api/matches/undo - Reverse the most recent score entry or finalization
pub async fn undo_last_command(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<UndoRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let commands = state.read().await.commands.clone();

    let undone = commands.undo_last(request.author_id).await?;

    info!("Command #{} undone via API", undone.id);

    Ok(Json(undone))
}

/// GET /api/matches/history
pub async fn list_command_history(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
) -> Result<impl IntoResponse, ApiError> {
    let commands = state.read().await.commands.clone();

    Ok(Json(commands.history().await))
}

/// GET /api/chains - Configured validation chains in execution order
pub async fn list_chains(
    Extension(state): Extension<Arc<RwLock<AppState>>>,
) -> Result<impl IntoResponse, ApiError> {
    let app_state = state.read().await;

    let mut chains = app_state.commands.describe_chains();
    chains.push(describe(app_state.scheduling.scheduling_chain()));
    chains.push(describe(app_state.comments.moderation_chain()));

    Ok(Json(chains))
}
