//! # Scheduling Module
//!
//! Creation of new fixtures, gated by the scheduling chain:
//! - Date and kickoff time sanity
//! - Home/away team pairing
//! - Stadium naming

pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::scheduling_routes;
