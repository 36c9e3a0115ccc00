// src/matches/repository.rs
//! SQLite-backed implementations of the read-side collaborators

use async_trait::async_trait;
use sqlx::SqlitePool;

use super::models::{Match, MatchEvent, MediaItem, StatusEntry, TeamAssignment};
use super::sources::{DetailSource, MatchLookup};
use crate::common::InfrastructureFault;

pub struct MatchRepository {
    db: SqlitePool,
}

impl MatchRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MatchLookup for MatchRepository {
    async fn find_by_id(&self, match_id: i64) -> Result<Option<Match>, InfrastructureFault> {
        let found = sqlx::query_as::<_, Match>(
            r#"
            SELECT id, match_date, kickoff_time, status, stadium, league, note
            FROM matches
            WHERE id = ?
            "#,
        )
        .bind(match_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(found)
    }
}

pub struct MatchTeamsRepository {
    db: SqlitePool,
}

impl MatchTeamsRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DetailSource<TeamAssignment> for MatchTeamsRepository {
    async fn find_details_for_match(
        &self,
        match_id: i64,
    ) -> Result<Vec<TeamAssignment>, InfrastructureFault> {
        // Home side first
        let teams = sqlx::query_as::<_, TeamAssignment>(
            r#"
            SELECT mt.id, mt.match_id, mt.team_id, t.name AS team_name, mt.is_home, mt.score
            FROM match_teams mt
            JOIN teams t ON t.id = mt.team_id
            WHERE mt.match_id = ?
            ORDER BY mt.is_home DESC, mt.id ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.db)
        .await?;

        Ok(teams)
    }
}

pub struct MatchEventsRepository {
    db: SqlitePool,
}

impl MatchEventsRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DetailSource<MatchEvent> for MatchEventsRepository {
    async fn find_details_for_match(
        &self,
        match_id: i64,
    ) -> Result<Vec<MatchEvent>, InfrastructureFault> {
        let events = sqlx::query_as::<_, MatchEvent>(
            r#"
            SELECT e.id, e.match_id, e.player_id, p.name AS player_name, e.event_type, e.minute
            FROM match_player_events e
            JOIN players p ON p.id = e.player_id
            WHERE e.match_id = ?
            ORDER BY e.minute ASC, e.id ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.db)
        .await?;

        Ok(events)
    }
}

pub struct MatchMediaRepository {
    db: SqlitePool,
}

impl MatchMediaRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DetailSource<MediaItem> for MatchMediaRepository {
    async fn find_details_for_match(
        &self,
        match_id: i64,
    ) -> Result<Vec<MediaItem>, InfrastructureFault> {
        let media = sqlx::query_as::<_, MediaItem>(
            r#"
            SELECT id, match_id, url, media_type, editor_id
            FROM match_media
            WHERE match_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.db)
        .await?;

        Ok(media)
    }
}

pub struct StatusHistoryRepository {
    db: SqlitePool,
}

impl StatusHistoryRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DetailSource<StatusEntry> for StatusHistoryRepository {
    async fn find_details_for_match(
        &self,
        match_id: i64,
    ) -> Result<Vec<StatusEntry>, InfrastructureFault> {
        let history = sqlx::query_as::<_, StatusEntry>(
            r#"
            SELECT id, match_id, status, note, changed_at, changed_by
            FROM match_status_history
            WHERE match_id = ?
            ORDER BY changed_at ASC, id ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.db)
        .await?;

        Ok(history)
    }
}
