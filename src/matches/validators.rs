// src/matches/validators.rs

use async_trait::async_trait;
use std::sync::Arc;

use super::commands::{FinalizeMatchCommand, MatchCommand, ScoreEntryCommand};
use super::models::{Match, MatchOutcome, MatchStatus, TeamAssignment};
use super::sources::{DetailSource, MatchLookup};
use crate::chain::{ChainObserver, CommandHandler, FailureKind, HandlerResult, ValidationChain};
use crate::common::InfrastructureFault;

pub const SCORE_ENTRY_CHAIN: &str = "score-entry";
pub const FINALIZATION_CHAIN: &str = "match-finalization";

// ============================================================================
// Shared Validators
// ============================================================================

/// Rejects commands that reference a match the lookup cannot resolve
pub struct MatchExists {
    matches: Arc<dyn MatchLookup>,
}

impl MatchExists {
    pub fn new(matches: Arc<dyn MatchLookup>) -> Self {
        Self { matches }
    }
}

#[async_trait]
impl<T> CommandHandler<T> for MatchExists
where
    T: MatchCommand + Sync,
{
    fn name(&self) -> &'static str {
        "MatchExists"
    }

    fn priority(&self) -> i32 {
        1
    }

    async fn check(&self, payload: &T) -> Result<HandlerResult, InfrastructureFault> {
        match self.matches.find_by_id(payload.match_id()).await? {
            Some(_) => Ok(HandlerResult::passed()),
            None => Ok(not_found(payload.match_id())),
        }
    }
}

/// Scores are stored per side, so the match needs exactly one home and one away team
pub struct MatchHasBothSides {
    teams: Arc<dyn DetailSource<TeamAssignment>>,
}

impl MatchHasBothSides {
    pub fn new(teams: Arc<dyn DetailSource<TeamAssignment>>) -> Self {
        Self { teams }
    }
}

#[async_trait]
impl<T> CommandHandler<T> for MatchHasBothSides
where
    T: MatchCommand + Sync,
{
    fn name(&self) -> &'static str {
        "MatchHasBothSides"
    }

    fn priority(&self) -> i32 {
        3
    }

    async fn check(&self, payload: &T) -> Result<HandlerResult, InfrastructureFault> {
        let teams = self.teams.find_details_for_match(payload.match_id()).await?;
        let home = teams.iter().filter(|team| team.is_home).count();
        let away = teams.len() - home;

        if home != 1 || away != 1 {
            return Ok(HandlerResult::failure(
                FailureKind::InvalidState,
                format!(
                    "Match {} needs exactly one home and one away team (found {} home, {} away)",
                    payload.match_id(),
                    home,
                    away
                ),
            ));
        }

        Ok(HandlerResult::passed())
    }
}

// ============================================================================
// Score Entry Validators
// ============================================================================

/// Scores may only be entered while a match is scheduled or being played
pub struct ScoreEntryAllowed {
    matches: Arc<dyn MatchLookup>,
}

impl ScoreEntryAllowed {
    pub fn new(matches: Arc<dyn MatchLookup>) -> Self {
        Self { matches }
    }
}

#[async_trait]
impl CommandHandler<ScoreEntryCommand> for ScoreEntryAllowed {
    fn name(&self) -> &'static str {
        "ScoreEntryAllowed"
    }

    fn priority(&self) -> i32 {
        2
    }

    async fn check(&self, payload: &ScoreEntryCommand) -> Result<HandlerResult, InfrastructureFault> {
        let Some(found) = self.matches.find_by_id(payload.match_id).await? else {
            return Ok(not_found(payload.match_id));
        };

        let status = match current_status(&found) {
            Ok(status) => status,
            Err(rejection) => return Ok(rejection),
        };

        if status.is_terminal() {
            return Ok(HandlerResult::failure(
                FailureKind::InvalidState,
                format!(
                    "Scores cannot be entered for match {} because it is {}",
                    found.id, status
                ),
            ));
        }

        Ok(HandlerResult::passed())
    }
}

/// At least one score must be given and no score may be negative
pub struct ScoreNonNegative;

#[async_trait]
impl CommandHandler<ScoreEntryCommand> for ScoreNonNegative {
    fn name(&self) -> &'static str {
        "ScoreNonNegative"
    }

    fn priority(&self) -> i32 {
        4
    }

    async fn check(&self, payload: &ScoreEntryCommand) -> Result<HandlerResult, InfrastructureFault> {
        if payload.home_score.is_none() && payload.away_score.is_none() {
            return Ok(HandlerResult::failure(
                FailureKind::InvalidArgument,
                "At least one of home_score or away_score is required",
            ));
        }

        if let Some(rejection) = negative_score("home_score", payload.home_score)
            .or_else(|| negative_score("away_score", payload.away_score))
        {
            return Ok(rejection);
        }

        Ok(HandlerResult::passed())
    }
}

// ============================================================================
// Finalization Validators
// ============================================================================

/// A finished or cancelled match cannot be finalized again
pub struct NotAlreadyFinalized {
    matches: Arc<dyn MatchLookup>,
}

impl NotAlreadyFinalized {
    pub fn new(matches: Arc<dyn MatchLookup>) -> Self {
        Self { matches }
    }
}

#[async_trait]
impl CommandHandler<FinalizeMatchCommand> for NotAlreadyFinalized {
    fn name(&self) -> &'static str {
        "NotAlreadyFinalized"
    }

    fn priority(&self) -> i32 {
        2
    }

    async fn check(
        &self,
        payload: &FinalizeMatchCommand,
    ) -> Result<HandlerResult, InfrastructureFault> {
        let Some(found) = self.matches.find_by_id(payload.match_id).await? else {
            return Ok(not_found(payload.match_id));
        };

        let status = match current_status(&found) {
            Ok(status) => status,
            Err(rejection) => return Ok(rejection),
        };

        if status.is_terminal() {
            return Ok(HandlerResult::failure(
                FailureKind::InvalidState,
                format!("Match {} is already {}", found.id, status),
            ));
        }

        Ok(HandlerResult::passed())
    }
}

/// Both final scores are required and must be non-negative
pub struct ScoresPresent;

#[async_trait]
impl CommandHandler<FinalizeMatchCommand> for ScoresPresent {
    fn name(&self) -> &'static str {
        "ScoresPresent"
    }

    fn priority(&self) -> i32 {
        4
    }

    async fn check(
        &self,
        payload: &FinalizeMatchCommand,
    ) -> Result<HandlerResult, InfrastructureFault> {
        for (field, value) in [
            ("home_score", payload.home_score),
            ("away_score", payload.away_score),
        ] {
            if value.is_none() {
                return Ok(HandlerResult::failure(
                    FailureKind::InvalidArgument,
                    format!("{} is required to finalize a match", field),
                ));
            }
            if let Some(rejection) = negative_score(field, value) {
                return Ok(rejection);
            }
        }

        Ok(HandlerResult::passed())
    }
}

/// The requested final status must be a terminal one
pub struct FinalStatusValid;

#[async_trait]
impl CommandHandler<FinalizeMatchCommand> for FinalStatusValid {
    fn name(&self) -> &'static str {
        "FinalStatusValid"
    }

    fn priority(&self) -> i32 {
        5
    }

    async fn check(
        &self,
        payload: &FinalizeMatchCommand,
    ) -> Result<HandlerResult, InfrastructureFault> {
        match payload.final_status() {
            Ok(status) if status.is_terminal() => Ok(HandlerResult::passed()),
            Ok(status) => Ok(HandlerResult::failure(
                FailureKind::InvalidArgument,
                format!(
                    "A match cannot be finalized as {}; use {} or {}",
                    status,
                    MatchStatus::Finished,
                    MatchStatus::Cancelled
                ),
            )),
            Err(msg) => Ok(HandlerResult::failure(FailureKind::InvalidArgument, msg)),
        }
    }
}

/// For finished matches the claimed outcome must follow from the scores
pub struct OutcomeMatchesScore;

#[async_trait]
impl CommandHandler<FinalizeMatchCommand> for OutcomeMatchesScore {
    fn name(&self) -> &'static str {
        "OutcomeMatchesScore"
    }

    fn priority(&self) -> i32 {
        6
    }

    async fn check(
        &self,
        payload: &FinalizeMatchCommand,
    ) -> Result<HandlerResult, InfrastructureFault> {
        let Some(raw_outcome) = payload.outcome.as_deref() else {
            return Ok(HandlerResult::passed());
        };

        // Cancelled or otherwise incomplete matches carry no result to compare
        match payload.final_status() {
            Ok(status) if status.is_completed() => {}
            _ => return Ok(HandlerResult::passed()),
        }

        let claimed: MatchOutcome = match raw_outcome.parse() {
            Ok(outcome) => outcome,
            Err(msg) => return Ok(HandlerResult::failure(FailureKind::InvalidArgument, msg)),
        };

        let (Some(home), Some(away)) = (payload.home_score, payload.away_score) else {
            return Ok(HandlerResult::failure(
                FailureKind::InvalidArgument,
                "Both scores are required to check the outcome",
            ));
        };

        let expected = MatchOutcome::from_scores(home, away);
        if claimed != expected {
            return Ok(HandlerResult::failure(
                FailureKind::Inconsistent,
                format!(
                    "Outcome '{}' contradicts the score {}-{} (expected '{}')",
                    claimed, home, away, expected
                ),
            ));
        }

        Ok(HandlerResult::passed())
    }
}

// ============================================================================
// Chain Assembly
// ============================================================================

/// MatchExists → ScoreEntryAllowed → MatchHasBothSides → ScoreNonNegative
pub fn score_entry_chain(
    matches: Arc<dyn MatchLookup>,
    teams: Arc<dyn DetailSource<TeamAssignment>>,
    observer: Arc<dyn ChainObserver>,
) -> ValidationChain<ScoreEntryCommand> {
    ValidationChain::new(SCORE_ENTRY_CHAIN)
        .link(MatchExists::new(matches.clone()))
        .link(ScoreEntryAllowed::new(matches))
        .link(MatchHasBothSides::new(teams))
        .link(ScoreNonNegative)
        .with_observer(observer)
}

/// MatchExists → NotAlreadyFinalized → MatchHasBothSides → ScoresPresent → FinalStatusValid
/// → OutcomeMatchesScore
pub fn finalization_chain(
    matches: Arc<dyn MatchLookup>,
    teams: Arc<dyn DetailSource<TeamAssignment>>,
    observer: Arc<dyn ChainObserver>,
) -> ValidationChain<FinalizeMatchCommand> {
    ValidationChain::new(FINALIZATION_CHAIN)
        .link(MatchExists::new(matches.clone()))
        .link(NotAlreadyFinalized::new(matches))
        .link(MatchHasBothSides::new(teams))
        .link(ScoresPresent)
        .link(FinalStatusValid)
        .link(OutcomeMatchesScore)
        .with_observer(observer)
}

// ============================================================================
// Helper Functions
// ============================================================================

fn not_found(match_id: i64) -> HandlerResult {
    HandlerResult::failure(
        FailureKind::NotFound,
        format!("Match {} not found", match_id),
    )
}

fn current_status(found: &Match) -> Result<MatchStatus, HandlerResult> {
    found.current_status().map_err(|msg| {
        HandlerResult::failure(
            FailureKind::InvalidState,
            format!("Match {} has an unrecognised status: {}", found.id, msg),
        )
    })
}

fn negative_score(field: &str, value: Option<i32>) -> Option<HandlerResult> {
    match value {
        Some(score) if score < 0 => Some(HandlerResult::failure(
            FailureKind::InvalidArgument,
            format!("{} cannot be negative (got {})", field, score),
        )),
        _ => None,
    }
}
