// src/matches/commands.rs
//! Command payloads pushed through the validation chains

use serde::Serialize;

use super::models::{FinalizeMatchRequest, MatchStatus, ScoreEntryRequest};

/// Payload that targets a single match
pub trait MatchCommand {
    fn match_id(&self) -> i64;
}

/// Record (part of) the running score of a match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntryCommand {
    pub match_id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub note: Option<String>,
    pub author_id: Option<i64>,
}

impl ScoreEntryCommand {
    pub fn new(match_id: i64, request: ScoreEntryRequest) -> Self {
        Self {
            match_id,
            home_score: request.home_score,
            away_score: request.away_score,
            note: request.note,
            author_id: request.author_id,
        }
    }
}

impl ScoreEntryCommand {
    /// Trimmed note, if it has any content
    pub fn note(&self) -> Option<&str> {
        non_blank(self.note.as_deref())
    }
}

impl MatchCommand for ScoreEntryCommand {
    fn match_id(&self) -> i64 {
        self.match_id
    }
}

/// Close a match with its final score and status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalizeMatchCommand {
    pub match_id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: Option<String>,
    pub outcome: Option<String>,
    pub note: Option<String>,
    pub author_id: Option<i64>,
}

impl FinalizeMatchCommand {
    pub fn new(match_id: i64, request: FinalizeMatchRequest) -> Self {
        Self {
            match_id,
            home_score: request.home_score,
            away_score: request.away_score,
            status: request.status,
            outcome: request.outcome,
            note: request.note,
            author_id: request.author_id,
        }
    }

    /// Trimmed note, if it has any content
    pub fn note(&self) -> Option<&str> {
        non_blank(self.note.as_deref())
    }

    /// Requested final status; an omitted status means the match finished
    pub fn final_status(&self) -> Result<MatchStatus, String> {
        match self.status.as_deref() {
            None => Ok(MatchStatus::Finished),
            Some(raw) if raw.trim().is_empty() => Ok(MatchStatus::Finished),
            Some(raw) => raw.parse(),
        }
    }
}

impl MatchCommand for FinalizeMatchCommand {
    fn match_id(&self) -> i64 {
        self.match_id
    }
}

fn non_blank(note: Option<&str>) -> Option<&str> {
    note.map(str::trim).filter(|note| !note.is_empty())
}
