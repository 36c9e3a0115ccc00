// src/common/config.rs
//! Environment-driven application configuration

use std::env;
use tracing::info;

const DEFAULT_DATABASE_URL: &str = "sqlite://matchday.db";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

/// How the match detail façade queries its four detail sources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFetchMode {
    Concurrent,
    Sequential,
}

impl DetailFetchMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "concurrent" | "parallel" => Some(DetailFetchMode::Concurrent),
            "sequential" | "serial" => Some(DetailFetchMode::Sequential),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub reset_db: bool,
    pub detail_fetch_mode: DetailFetchMode,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let reset_db = env::var("RESET_DB")
            .unwrap_or_else(|_| "false".to_string())
            .to_lowercase()
            == "true";

        let detail_fetch_mode = env::var("DETAIL_FETCH_MODE")
            .ok()
            .and_then(|mode| DetailFetchMode::parse(&mode))
            .unwrap_or(DetailFetchMode::Concurrent);

        Self {
            database_url,
            port,
            cors_origins,
            reset_db,
            detail_fetch_mode,
        }
    }
}

/// CLI argument parsing for the detail fetch mode
pub fn parse_fetch_mode_args<I>(args: I) -> Option<DetailFetchMode>
where
    I: IntoIterator<Item = String>,
{
    let mut mode = None;
    for arg in args {
        match arg.as_str() {
            "--sequential-detail" => mode = Some(DetailFetchMode::Sequential),
            "--concurrent-detail" => mode = Some(DetailFetchMode::Concurrent),
            _ => {}
        }
    }
    mode
}

/// Override configuration from CLI args
pub fn apply_cli_override(mut config: AppConfig) -> AppConfig {
    if let Some(mode) = parse_fetch_mode_args(env::args()) {
        info!("🔧 CLI override: DETAIL_FETCH_MODE = {:?}", mode);
        config.detail_fetch_mode = mode;
    }

    config
}

/// Log the effective configuration on startup
pub fn log_config_summary(config: &AppConfig) {
    info!(
        database_url = %config.database_url,
        port = config.port,
        reset_db = config.reset_db,
        detail_fetch_mode = ?config.detail_fetch_mode,
        "Configuration loaded"
    );
    info!("CORS origins: {:?}", config.cors_origins);
}
