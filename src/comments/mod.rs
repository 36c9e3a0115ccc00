//! # Comments Module
//!
//! Match comments screened by a moderation chain before they are stored.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::comments_routes;
