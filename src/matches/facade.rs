// src/matches/facade.rs
//! Match detail façade: one call instead of five round-trips

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::models::{Match, MatchDetail, MatchEvent, MediaItem, StatusEntry, TeamAssignment};
use super::sources::{DetailSource, MatchLookup};
use crate::common::config::DetailFetchMode;
use crate::common::InfrastructureFault;

#[derive(Debug, Error)]
pub enum DetailError {
    #[error("Match {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Infrastructure(#[from] InfrastructureFault),
}

/// Assembles a [`MatchDetail`] from the match lookup and the four detail sources.
///
/// The lookup is a gate: an unknown match fails with [`DetailError::NotFound`] before
/// any detail source is queried. Any infrastructure fault fails the whole call; no
/// partial detail is returned.
pub struct MatchDetailFacade {
    matches: Arc<dyn MatchLookup>,
    teams: Arc<dyn DetailSource<TeamAssignment>>,
    events: Arc<dyn DetailSource<MatchEvent>>,
    media: Arc<dyn DetailSource<MediaItem>>,
    status_history: Arc<dyn DetailSource<StatusEntry>>,
    fetch_mode: DetailFetchMode,
}

impl MatchDetailFacade {
    pub fn new(
        matches: Arc<dyn MatchLookup>,
        teams: Arc<dyn DetailSource<TeamAssignment>>,
        events: Arc<dyn DetailSource<MatchEvent>>,
        media: Arc<dyn DetailSource<MediaItem>>,
        status_history: Arc<dyn DetailSource<StatusEntry>>,
    ) -> Self {
        Self {
            matches,
            teams,
            events,
            media,
            status_history,
            fetch_mode: DetailFetchMode::Concurrent,
        }
    }

    pub fn with_fetch_mode(mut self, fetch_mode: DetailFetchMode) -> Self {
        self.fetch_mode = fetch_mode;
        self
    }

    pub async fn get_match_detail(&self, match_id: i64) -> Result<MatchDetail, DetailError> {
        debug!(match_id, "Fetching match detail");

        let match_record = self.resolve_match(match_id).await?;

        let (teams, events, media, status_history) = match self.fetch_mode {
            DetailFetchMode::Concurrent => futures::try_join!(
                self.teams.find_details_for_match(match_id),
                self.events.find_details_for_match(match_id),
                self.media.find_details_for_match(match_id),
                self.status_history.find_details_for_match(match_id),
            )?,
            DetailFetchMode::Sequential => (
                self.teams.find_details_for_match(match_id).await?,
                self.events.find_details_for_match(match_id).await?,
                self.media.find_details_for_match(match_id).await?,
                self.status_history.find_details_for_match(match_id).await?,
            ),
        };

        info!(
            match_id,
            teams = teams.len(),
            events = events.len(),
            media = media.len(),
            status_history = status_history.len(),
            "✅ Match detail assembled"
        );

        Ok(MatchDetail {
            match_record,
            teams,
            events,
            media,
            status_history,
        })
    }

    pub async fn get_match_teams(
        &self,
        match_id: i64,
    ) -> Result<Vec<TeamAssignment>, InfrastructureFault> {
        self.teams.find_details_for_match(match_id).await
    }

    pub async fn get_match_events(
        &self,
        match_id: i64,
    ) -> Result<Vec<MatchEvent>, InfrastructureFault> {
        self.events.find_details_for_match(match_id).await
    }

    pub async fn get_match_media(
        &self,
        match_id: i64,
    ) -> Result<Vec<MediaItem>, InfrastructureFault> {
        self.media.find_details_for_match(match_id).await
    }

    pub async fn get_match_status_history(
        &self,
        match_id: i64,
    ) -> Result<Vec<StatusEntry>, InfrastructureFault> {
        self.status_history.find_details_for_match(match_id).await
    }

    async fn resolve_match(&self, match_id: i64) -> Result<Match, DetailError> {
        self.matches
            .find_by_id(match_id)
            .await?
            .ok_or(DetailError::NotFound(match_id))
    }
}
