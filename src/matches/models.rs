// src/matches/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Match Status & Outcome
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Scheduled,
    InProgress,
    Finished,
    Cancelled,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::InProgress => "in_progress",
            MatchStatus::Finished => "finished",
            MatchStatus::Cancelled => "cancelled",
        }
    }

    /// Finished and cancelled matches accept no further lifecycle commands
    pub fn is_terminal(&self) -> bool {
        matches!(self, MatchStatus::Finished | MatchStatus::Cancelled)
    }

    /// Only a finished match has a meaningful result
    pub fn is_completed(&self) -> bool {
        matches!(self, MatchStatus::Finished)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "scheduled" => Ok(MatchStatus::Scheduled),
            "in_progress" | "live" => Ok(MatchStatus::InProgress),
            "finished" => Ok(MatchStatus::Finished),
            "cancelled" | "canceled" => Ok(MatchStatus::Cancelled),
            _ => Err(format!("Unknown match status '{}'", s)),
        }
    }
}

/// Result of a completed match from the home side's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl MatchOutcome {
    /// Higher score wins, equal scores draw
    pub fn from_scores(home: i32, away: i32) -> Self {
        if home > away {
            MatchOutcome::HomeWin
        } else if away > home {
            MatchOutcome::AwayWin
        } else {
            MatchOutcome::Draw
        }
    }
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchOutcome::HomeWin => "home win",
            MatchOutcome::Draw => "draw",
            MatchOutcome::AwayWin => "away win",
        };
        f.write_str(label)
    }
}

impl FromStr for MatchOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "home_win" => Ok(MatchOutcome::HomeWin),
            "draw" => Ok(MatchOutcome::Draw),
            "away_win" => Ok(MatchOutcome::AwayWin),
            _ => Err(format!("Unknown match outcome '{}'", s)),
        }
    }
}

/// Lowercases and folds spaces and hyphens into underscores
fn normalize_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

// ============================================================================
// Stored Rows
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Match {
    pub id: i64,
    pub match_date: String,
    pub kickoff_time: String,
    pub status: String, // scheduled, in_progress, finished, cancelled
    pub stadium: Option<String>,
    pub league: Option<String>,
    pub note: Option<String>,
}

impl Match {
    pub fn current_status(&self) -> Result<MatchStatus, String> {
        self.status.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TeamAssignment {
    pub id: i64,
    pub match_id: i64,
    pub team_id: i64,
    pub team_name: String,
    pub is_home: bool,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MatchEvent {
    pub id: i64,
    pub match_id: i64,
    pub player_id: i64,
    pub player_name: String,
    pub event_type: String, // goal, own_goal, yellow_card, red_card
    pub minute: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MediaItem {
    pub id: i64,
    pub match_id: i64,
    pub url: String,
    pub media_type: String, // photo, video
    pub editor_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct StatusEntry {
    pub id: i64,
    pub match_id: i64,
    pub status: String,
    pub note: Option<String>,
    pub changed_at: String,
    pub changed_by: Option<i64>,
}

// ============================================================================
// Aggregate
// ============================================================================

/// Everything a client needs to render one match, assembled in a single call
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    #[serde(rename = "match")]
    pub match_record: Match,
    pub teams: Vec<TeamAssignment>,
    pub events: Vec<MatchEvent>,
    pub media: Vec<MediaItem>,
    pub status_history: Vec<StatusEntry>,
}

// ============================================================================
// Request Bodies
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreEntryRequest {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub note: Option<String>,
    pub author_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FinalizeMatchRequest {
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub status: Option<String>,
    pub outcome: Option<String>,
    pub note: Option<String>,
    pub author_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UndoRequest {
    pub author_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChainDescription {
    pub name: String,
    pub handler_count: usize,
    pub handlers: Vec<&'static str>,
    pub visualization: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_parsing_accepts_spaces_and_hyphens() {
        assert_eq!("home win".parse::<MatchOutcome>(), Ok(MatchOutcome::HomeWin));
        assert_eq!("Away-Win".parse::<MatchOutcome>(), Ok(MatchOutcome::AwayWin));
        assert_eq!("DRAW".parse::<MatchOutcome>(), Ok(MatchOutcome::Draw));
        assert!("victory".parse::<MatchOutcome>().is_err());
    }

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(MatchOutcome::from_scores(3, 1), MatchOutcome::HomeWin);
        assert_eq!(MatchOutcome::from_scores(0, 2), MatchOutcome::AwayWin);
        assert_eq!(MatchOutcome::from_scores(2, 2), MatchOutcome::Draw);
    }

    #[test]
    fn test_status_terminal_and_completed() {
        assert!(MatchStatus::Finished.is_terminal());
        assert!(MatchStatus::Cancelled.is_terminal());
        assert!(!MatchStatus::InProgress.is_terminal());
        assert!(MatchStatus::Finished.is_completed());
        assert!(!MatchStatus::Cancelled.is_completed());
        assert_eq!("In Progress".parse::<MatchStatus>(), Ok(MatchStatus::InProgress));
    }

    #[test]
    fn test_match_detail_serializes_match_field() {
        let detail = MatchDetail {
            match_record: Match {
                id: 1,
                match_date: "2026-05-01".to_string(),
                kickoff_time: "19:00".to_string(),
                status: "scheduled".to_string(),
                stadium: None,
                league: None,
                note: None,
            },
            teams: vec![],
            events: vec![],
            media: vec![],
            status_history: vec![],
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["match"]["id"], 1);
        assert!(json["status_history"].as_array().unwrap().is_empty());
    }
}
