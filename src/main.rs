// src/main.rs
use axum::{extract::Extension, Router};
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::PathBuf;
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

// ============================================================================
// MODULE IMPORTS
// ============================================================================

mod chain;
mod comments;
mod common;
mod matches;
mod scheduling;

// ============================================================================
// COMMON IMPORTS
// ============================================================================

use chain::{ChainObserver, TracingObserver};
use comments::services::CommentsService;
use common::config::{apply_cli_override, log_config_summary, AppConfig};
use common::AppState;
use matches::facade::MatchDetailFacade;
use matches::repository::{
    MatchEventsRepository, MatchMediaRepository, MatchRepository, MatchTeamsRepository,
    StatusHistoryRepository,
};
use matches::services::MatchCommandService;
use scheduling::repository::TeamRepository;
use scheduling::services::SchedulingService;

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = apply_cli_override(AppConfig::from_env());
    log_config_summary(&config);

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    if let Some(path_part) = config.database_url.strip_prefix("sqlite://") {
        let path_without_params = path_part.split('?').next().unwrap_or("");
        if !path_without_params.is_empty() && !path_without_params.starts_with(':') {
            let db_path = PathBuf::from(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
        }
    }

    let connect_options =
        SqliteConnectOptions::from_str(&config.database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await?;

    // Run database migrations
    common::migrations::run_migrations(&pool, config.reset_db).await?;

    // ========================================================================
    // SERVICE INITIALIZATION
    // ========================================================================

    let match_lookup = Arc::new(MatchRepository::new(pool.clone()));
    let match_teams = Arc::new(MatchTeamsRepository::new(pool.clone()));
    let observer: Arc<dyn ChainObserver> = Arc::new(TracingObserver);

    let facade = Arc::new(
        MatchDetailFacade::new(
            match_lookup.clone(),
            match_teams.clone(),
            Arc::new(MatchEventsRepository::new(pool.clone())),
            Arc::new(MatchMediaRepository::new(pool.clone())),
            Arc::new(StatusHistoryRepository::new(pool.clone())),
        )
        .with_fetch_mode(config.detail_fetch_mode),
    );
    info!("MatchDetailFacade initialized");

    let commands = Arc::new(MatchCommandService::new(
        pool.clone(),
        match_lookup.clone(),
        match_teams,
        observer.clone(),
    ));
    info!("MatchCommandService initialized");

    let comments = Arc::new(CommentsService::new(
        pool.clone(),
        match_lookup,
        observer.clone(),
    )?);
    info!("CommentsService initialized");

    let scheduling = Arc::new(SchedulingService::new(
        pool.clone(),
        Arc::new(TeamRepository::new(pool.clone())),
        observer,
    ));
    info!("SchedulingService initialized");

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let app_state = AppState {
        facade,
        commands,
        comments,
        scheduling,
    };

    let shared = Arc::new(RwLock::new(app_state));

    // ========================================================================
    // ROUTER COMPOSITION
    // ========================================================================

    let app = Router::new()
        // ====================================================================
        // MATCH ROUTES (Detail, Score Entry, Finalization, Chains)
        // ====================================================================
        .merge(matches::matches_routes())
        // ====================================================================
        // SCHEDULING ROUTES
        // ====================================================================
        .merge(scheduling::scheduling_routes())
        // ====================================================================
        // COMMENT ROUTES
        // ====================================================================
        .merge(comments::comments_routes())
        // ====================================================================
        // MIDDLEWARE AND LAYERS
        // ====================================================================
        .layer(Extension(shared.clone()))
        .layer({
            let origins: Vec<axum::http::HeaderValue> = config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::CONTENT_TYPE,
                    axum::http::HeaderName::from_static("x-request-id"),
                ])
        })
        .layer(TraceLayer::new_for_http());

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
