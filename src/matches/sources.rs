// src/matches/sources.rs
//! Read-side collaborator contracts used by the validators and the detail façade

use async_trait::async_trait;

use super::models::Match;
use crate::common::InfrastructureFault;

/// Resolves a match identifier to its record
#[async_trait]
pub trait MatchLookup: Send + Sync {
    /// `Ok(None)` when the match does not exist
    async fn find_by_id(&self, match_id: i64) -> Result<Option<Match>, InfrastructureFault>;
}

/// One per-match detail store (team assignments, events, media, status history)
#[async_trait]
pub trait DetailSource<T: Send>: Send + Sync {
    /// Rows for the match in store order. Empty when there are none.
    async fn find_details_for_match(&self, match_id: i64) -> Result<Vec<T>, InfrastructureFault>;
}
