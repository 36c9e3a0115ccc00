// Common module - shared types and utilities across all modules

pub mod config;
pub mod error;
pub mod migrations;
pub mod state;

// Re-export commonly used types for convenience
pub use error::{ApiError, InfrastructureFault};
pub use state::AppState;
