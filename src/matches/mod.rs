//! # Matches Module
//!
//! This module handles all match-related functionality including:
//! - Match detail aggregation (match, teams, events, media, status history)
//! - Score entry and finalization gated by validation chains
//! - Command history with undo of the latest command
//! - SQLite-backed read repositories

pub mod commands;
pub mod facade;
pub mod handlers;
pub mod history;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod sources;
pub mod validators;

#[cfg(test)]
mod tests;

pub use routes::matches_routes;
