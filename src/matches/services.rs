// src/matches/services.rs

use sqlx::{SqliteConnection, SqlitePool};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use super::commands::{FinalizeMatchCommand, ScoreEntryCommand};
use super::history::{AppliedCommand, CommandHistory, CommandKind};
use super::models::{ChainDescription, MatchOutcome, TeamAssignment};
use super::sources::{DetailSource, MatchLookup};
use super::validators::{finalization_chain, score_entry_chain};
use crate::chain::{ChainObserver, FailureKind, HandlerResult, ValidationChain};
use crate::common::InfrastructureFault;

#[derive(Debug, Error)]
pub enum CommandError {
    /// The validation chain refused the command
    #[error("Command rejected: {0}")]
    Rejected(HandlerResult),

    #[error(transparent)]
    Infrastructure(#[from] InfrastructureFault),
}

impl From<sqlx::Error> for CommandError {
    fn from(err: sqlx::Error) -> Self {
        CommandError::Infrastructure(InfrastructureFault::Database(err))
    }
}

/// Scores and status as stored before a command touches them
struct MatchSnapshot {
    home: i32,
    away: i32,
    status: String,
}

/// Gatekeeps and applies score entry and finalization, and undoes them
pub struct MatchCommandService {
    db: SqlitePool,
    score_entry: ValidationChain<ScoreEntryCommand>,
    finalization: ValidationChain<FinalizeMatchCommand>,
    history: CommandHistory,
}

impl MatchCommandService {
    pub fn new(
        db: SqlitePool,
        matches: Arc<dyn MatchLookup>,
        teams: Arc<dyn DetailSource<TeamAssignment>>,
        observer: Arc<dyn ChainObserver>,
    ) -> Self {
        let score_entry = score_entry_chain(matches.clone(), teams.clone(), observer.clone());
        let finalization = finalization_chain(matches, teams, observer);

        info!("🔗 Score entry chain: {}", score_entry.visualize());
        info!("🔗 Finalization chain: {}", finalization.visualize());

        Self {
            db,
            score_entry,
            finalization,
            history: CommandHistory::new(),
        }
    }

    /// Runs the score entry chain without applying anything
    pub async fn validate_score_entry(
        &self,
        command: &ScoreEntryCommand,
    ) -> Result<HandlerResult, InfrastructureFault> {
        self.score_entry.handle(command).await
    }

    /// Runs the finalization chain without applying anything
    pub async fn validate_finalization(
        &self,
        command: &FinalizeMatchCommand,
    ) -> Result<HandlerResult, InfrastructureFault> {
        self.finalization.handle(command).await
    }

    pub async fn record_score(
        &self,
        command: &ScoreEntryCommand,
    ) -> Result<AppliedCommand, CommandError> {
        let verdict = self.validate_score_entry(command).await?;
        if !verdict.is_success() {
            return Err(CommandError::Rejected(verdict));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let mut tx = self.db.begin().await?;

        let before = snapshot(&mut tx, command.match_id).await?;
        let home = command.home_score.unwrap_or(before.home);
        let away = command.away_score.unwrap_or(before.away);

        for (is_home, score) in [(true, command.home_score), (false, command.away_score)] {
            if let Some(score) = score {
                if set_side_score(&mut tx, command.match_id, is_home, score).await? != 1 {
                    tx.rollback().await?;
                    return Err(CommandError::Rejected(missing_side(command.match_id, is_home)));
                }
            }
        }

        sqlx::query("UPDATE matches SET updated_at = ? WHERE id = ?")
            .bind(&now)
            .bind(command.match_id)
            .execute(&mut *tx)
            .await?;

        if let Some(note) = command.note() {
            append_status_history(
                &mut tx,
                command.match_id,
                &before.status,
                Some(note),
                &now,
                command.author_id,
            )
            .await?;
        }

        tx.commit().await?;

        info!(
            match_id = command.match_id,
            home_score = ?command.home_score,
            away_score = ?command.away_score,
            note = command.note().unwrap_or(""),
            "⚽ Score recorded"
        );

        let applied = self
            .history
            .record(AppliedCommand {
                id: 0,
                kind: CommandKind::ScoreEntry,
                match_id: command.match_id,
                author_id: command.author_id,
                description: format!("Score {}-{} for match {}", home, away, command.match_id),
                executed_at: now,
                previous_home: before.home,
                previous_away: before.away,
                applied_status: before.status.clone(),
                previous_status: before.status,
                applied_home: home,
                applied_away: away,
            })
            .await;

        Ok(applied)
    }

    pub async fn finalize_match(
        &self,
        command: &FinalizeMatchCommand,
    ) -> Result<AppliedCommand, CommandError> {
        let verdict = self.validate_finalization(command).await?;
        if !verdict.is_success() {
            return Err(CommandError::Rejected(verdict));
        }

        // The chain has already checked the status and both scores
        let status = command
            .final_status()
            .map_err(|msg| CommandError::Rejected(invalid_argument(msg)))?;
        let (home, away) = match (command.home_score, command.away_score) {
            (Some(home), Some(away)) => (home, away),
            _ => {
                return Err(CommandError::Rejected(invalid_argument(
                    "Both scores are required to finalize a match".to_string(),
                )))
            }
        };

        let now = chrono::Utc::now().to_rfc3339();
        let mut tx = self.db.begin().await?;

        let before = snapshot(&mut tx, command.match_id).await?;

        for (is_home, score) in [(true, home), (false, away)] {
            if set_side_score(&mut tx, command.match_id, is_home, score).await? != 1 {
                tx.rollback().await?;
                return Err(CommandError::Rejected(missing_side(command.match_id, is_home)));
            }
        }

        sqlx::query("UPDATE matches SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(&now)
            .bind(command.match_id)
            .execute(&mut *tx)
            .await?;

        append_status_history(
            &mut tx,
            command.match_id,
            status.as_str(),
            command.note(),
            &now,
            command.author_id,
        )
        .await?;

        tx.commit().await?;

        if status.is_completed() {
            info!(
                match_id = command.match_id,
                "🏁 Match finalized {}-{} ({})",
                home,
                away,
                MatchOutcome::from_scores(home, away)
            );
        } else {
            info!(match_id = command.match_id, status = %status, "🏁 Match closed");
        }

        let applied = self
            .history
            .record(AppliedCommand {
                id: 0,
                kind: CommandKind::Finalization,
                match_id: command.match_id,
                author_id: command.author_id,
                description: format!(
                    "Finalized match {} as {} {}-{}",
                    command.match_id, status, home, away
                ),
                executed_at: now,
                previous_home: before.home,
                previous_away: before.away,
                previous_status: before.status,
                applied_home: home,
                applied_away: away,
                applied_status: status.as_str().to_string(),
            })
            .await;

        Ok(applied)
    }

    /// Reverses the most recent command, restoring the scores and status it replaced.
    /// The entry stays in the history if anything fails.
    pub async fn undo_last(&self, author_id: Option<i64>) -> Result<AppliedCommand, CommandError> {
        let entry = self.history.last().await.ok_or_else(|| {
            CommandError::Rejected(HandlerResult::failure(
                FailureKind::NotFound,
                "No command to undo",
            ))
        })?;

        if !entry.can_be_undone_by(author_id) {
            warn!(
                entry_id = entry.id,
                owner = ?entry.author_id,
                requested_by = ?author_id,
                "⛔ Undo refused"
            );
            return Err(CommandError::Rejected(HandlerResult::failure(
                FailureKind::InvalidState,
                format!("Command #{} belongs to another author", entry.id),
            )));
        }

        let now = chrono::Utc::now().to_rfc3339();
        let mut tx = self.db.begin().await?;

        for (is_home, score) in [(true, entry.previous_home), (false, entry.previous_away)] {
            if set_side_score(&mut tx, entry.match_id, is_home, score).await? != 1 {
                tx.rollback().await?;
                return Err(CommandError::Rejected(missing_side(entry.match_id, is_home)));
            }
        }

        sqlx::query("UPDATE matches SET status = ?, updated_at = ? WHERE id = ?")
            .bind(&entry.previous_status)
            .bind(&now)
            .bind(entry.match_id)
            .execute(&mut *tx)
            .await?;

        if entry.kind == CommandKind::Finalization {
            let note = format!("Undo of command #{}", entry.id);
            append_status_history(
                &mut tx,
                entry.match_id,
                &entry.previous_status,
                Some(&note),
                &now,
                author_id,
            )
            .await?;
        }

        tx.commit().await?;
        self.history.remove_last(entry.id).await;

        info!(
            entry_id = entry.id,
            match_id = entry.match_id,
            "↩️ Undid: {}",
            entry.description
        );

        Ok(entry)
    }

    /// Applied commands still eligible for undo, oldest first
    pub async fn history(&self) -> Vec<AppliedCommand> {
        self.history.entries().await
    }

    pub fn describe_chains(&self) -> Vec<ChainDescription> {
        vec![describe(&self.score_entry), describe(&self.finalization)]
    }
}

// ============================================================================
// Store Helpers
// ============================================================================

async fn snapshot(conn: &mut SqliteConnection, match_id: i64) -> Result<MatchSnapshot, sqlx::Error> {
    let (status,): (String,) = sqlx::query_as("SELECT status FROM matches WHERE id = ?")
        .bind(match_id)
        .fetch_one(&mut *conn)
        .await?;

    let sides: Vec<(bool, i32)> =
        sqlx::query_as("SELECT is_home, score FROM match_teams WHERE match_id = ?")
            .bind(match_id)
            .fetch_all(&mut *conn)
            .await?;

    let score_of = |home: bool| {
        sides
            .iter()
            .find(|(is_home, _)| *is_home == home)
            .map(|(_, score)| *score)
            .unwrap_or(0)
    };

    Ok(MatchSnapshot {
        home: score_of(true),
        away: score_of(false),
        status,
    })
}

/// Returns the number of rows touched; anything but 1 means the side is missing
async fn set_side_score(
    conn: &mut SqliteConnection,
    match_id: i64,
    is_home: bool,
    score: i32,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE match_teams SET score = ? WHERE match_id = ? AND is_home = ?")
        .bind(score)
        .bind(match_id)
        .bind(is_home)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

async fn append_status_history(
    conn: &mut SqliteConnection,
    match_id: i64,
    status: &str,
    note: Option<&str>,
    changed_at: &str,
    changed_by: Option<i64>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO match_status_history (match_id, status, note, changed_at, changed_by) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(match_id)
    .bind(status)
    .bind(note)
    .bind(changed_at)
    .bind(changed_by)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

fn missing_side(match_id: i64, is_home: bool) -> HandlerResult {
    HandlerResult::failure(
        FailureKind::InvalidState,
        format!(
            "Match {} has no {} team to score",
            match_id,
            if is_home { "home" } else { "away" }
        ),
    )
}

pub fn describe<T: Sync>(chain: &ValidationChain<T>) -> ChainDescription {
    ChainDescription {
        name: chain.name().to_string(),
        handler_count: chain.len(),
        handlers: chain.handler_names(),
        visualization: chain.visualize(),
    }
}

fn invalid_argument(message: String) -> HandlerResult {
    HandlerResult::failure(FailureKind::InvalidArgument, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::TracingObserver;
    use crate::common::migrations::run_migrations;
    use crate::matches::models::{FinalizeMatchRequest, ScoreEntryRequest};
    use crate::matches::repository::{MatchRepository, MatchTeamsRepository};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_service() -> (MatchCommandService, SqlitePool) {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        run_migrations(&pool, false).await.unwrap();

        sqlx::query("INSERT INTO teams (id, name) VALUES (1, 'Harbour City'), (2, 'Northgate Rovers')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query(
            "INSERT INTO matches (id, match_date, kickoff_time, status) VALUES (1, '2026-05-01', '19:00', 'in_progress'), (2, '2026-04-01', '15:00', 'finished'), (5, '2026-05-08', '20:00', 'in_progress')",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO match_teams (match_id, team_id, is_home, score) VALUES (1, 1, 1, 0), (1, 2, 0, 0), (2, 1, 1, 1), (2, 2, 0, 1)",
        )
        .execute(&pool)
        .await
        .unwrap();

        // Match 5 has no team rows
        let service = MatchCommandService::new(
            pool.clone(),
            Arc::new(MatchRepository::new(pool.clone())),
            Arc::new(MatchTeamsRepository::new(pool.clone())),
            Arc::new(TracingObserver),
        );
        (service, pool)
    }

    async fn scores(pool: &SqlitePool, match_id: i64) -> (i32, i32) {
        let home: (i32,) =
            sqlx::query_as("SELECT score FROM match_teams WHERE match_id = ? AND is_home = 1")
                .bind(match_id)
                .fetch_one(pool)
                .await
                .unwrap();
        let away: (i32,) =
            sqlx::query_as("SELECT score FROM match_teams WHERE match_id = ? AND is_home = 0")
                .bind(match_id)
                .fetch_one(pool)
                .await
                .unwrap();
        (home.0, away.0)
    }

    #[tokio::test]
    async fn test_record_score_updates_only_given_sides() {
        let (service, pool) = setup_service().await;
        let command = ScoreEntryCommand::new(
            1,
            ScoreEntryRequest {
                home_score: Some(2),
                away_score: None,
                note: None,
                author_id: None,
            },
        );

        service.record_score(&command).await.unwrap();

        assert_eq!(scores(&pool, 1).await, (2, 0));
    }

    #[tokio::test]
    async fn test_rejected_score_leaves_store_untouched() {
        let (service, pool) = setup_service().await;
        let command = ScoreEntryCommand::new(
            2,
            ScoreEntryRequest {
                home_score: Some(4),
                away_score: Some(0),
                note: None,
                author_id: None,
            },
        );

        let err = service.record_score(&command).await.unwrap_err();

        match err {
            CommandError::Rejected(result) => {
                assert_eq!(result.kind(), Some(FailureKind::InvalidState))
            }
            other => panic!("unexpected error: {}", other),
        }
        assert_eq!(scores(&pool, 2).await, (1, 1));
    }

    #[tokio::test]
    async fn test_finalize_match_sets_status_and_history() {
        let (service, pool) = setup_service().await;
        let command = FinalizeMatchCommand::new(
            1,
            FinalizeMatchRequest {
                home_score: Some(3),
                away_score: Some(1),
                status: Some("finished".to_string()),
                outcome: Some("home win".to_string()),
                note: Some("Full time".to_string()),
                author_id: Some(7),
            },
        );

        service.finalize_match(&command).await.unwrap();

        let status: (String,) = sqlx::query_as("SELECT status FROM matches WHERE id = 1")
            .fetch_one(&pool)
            .await
            .unwrap();
        let history: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM match_status_history WHERE match_id = 1")
                .fetch_one(&pool)
                .await
                .unwrap();

        assert_eq!(status.0, "finished");
        assert_eq!(history.0, 1);
        assert_eq!(scores(&pool, 1).await, (3, 1));
    }

    #[tokio::test]
    async fn test_finalize_rejects_contradicting_outcome() {
        let (service, _pool) = setup_service().await;
        let command = FinalizeMatchCommand::new(
            1,
            FinalizeMatchRequest {
                home_score: Some(3),
                away_score: Some(1),
                status: Some("finished".to_string()),
                outcome: Some("away win".to_string()),
                note: None,
                author_id: None,
            },
        );

        match service.finalize_match(&command).await {
            Err(CommandError::Rejected(result)) => {
                assert_eq!(result.kind(), Some(FailureKind::Inconsistent));
                assert_eq!(result.originating_handler(), Some("OutcomeMatchesScore"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_describe_chains_lists_both_chains() {
        let (service, _pool) = setup_service().await;
        let chains = service.describe_chains();

        assert_eq!(chains.len(), 2);
        assert_eq!(
            chains[0].handlers,
            vec![
                "MatchExists",
                "ScoreEntryAllowed",
                "MatchHasBothSides",
                "ScoreNonNegative"
            ]
        );
        assert_eq!(chains[0].handler_count, 4);
        assert!(chains[1]
            .visualization
            .starts_with("1. MatchExists → 2. NotAlreadyFinalized → 3. MatchHasBothSides"));
    }

    // ========================================================================
    // Matches without both sides
    // ========================================================================

    async fn status_of(pool: &SqlitePool, match_id: i64) -> String {
        let status: (String,) = sqlx::query_as("SELECT status FROM matches WHERE id = ?")
            .bind(match_id)
            .fetch_one(pool)
            .await
            .unwrap();
        status.0
    }

    fn finalize_request(home: i32, away: i32, author_id: Option<i64>) -> FinalizeMatchRequest {
        FinalizeMatchRequest {
            home_score: Some(home),
            away_score: Some(away),
            status: None,
            outcome: None,
            note: None,
            author_id,
        }
    }

    fn score_request(home: i32, away: i32, author_id: Option<i64>) -> ScoreEntryRequest {
        ScoreEntryRequest {
            home_score: Some(home),
            away_score: Some(away),
            note: None,
            author_id,
        }
    }

    #[tokio::test]
    async fn test_finalize_without_teams_is_rejected_and_status_kept() {
        let (service, pool) = setup_service().await;
        let command = FinalizeMatchCommand::new(
            5,
            FinalizeMatchRequest {
                home_score: Some(3),
                away_score: Some(1),
                status: Some("finished".to_string()),
                outcome: Some("home win".to_string()),
                note: None,
                author_id: None,
            },
        );

        match service.finalize_match(&command).await {
            Err(CommandError::Rejected(result)) => {
                assert_eq!(result.kind(), Some(FailureKind::InvalidState));
                assert_eq!(result.originating_handler(), Some("MatchHasBothSides"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let history: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM match_status_history WHERE match_id = 5")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(status_of(&pool, 5).await, "in_progress");
        assert_eq!(history.0, 0);
        assert!(service.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_score_entry_without_teams_is_rejected() {
        let (service, _pool) = setup_service().await;
        let command = ScoreEntryCommand::new(5, score_request(1, 0, None));

        match service.record_score(&command).await {
            Err(CommandError::Rejected(result)) => {
                assert_eq!(result.kind(), Some(FailureKind::InvalidState))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_side_row_rolls_back_score_update() {
        let (service, pool) = setup_service().await;
        let entered = service
            .record_score(&ScoreEntryCommand::new(1, score_request(2, 2, None)))
            .await
            .unwrap();

        // The away row disappears after the command was recorded
        sqlx::query("DELETE FROM match_teams WHERE match_id = 1 AND is_home = 0")
            .execute(&pool)
            .await
            .unwrap();

        match service.undo_last(None).await {
            Err(CommandError::Rejected(result)) => {
                assert_eq!(result.kind(), Some(FailureKind::InvalidState))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }

        let home: (i32,) =
            sqlx::query_as("SELECT score FROM match_teams WHERE match_id = 1 AND is_home = 1")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(home.0, 2);
        assert_eq!(service.history().await, vec![entered]);
    }

    // ========================================================================
    // Notes
    // ========================================================================

    #[tokio::test]
    async fn test_score_note_is_written_to_status_history() {
        let (service, pool) = setup_service().await;
        let command = ScoreEntryCommand::new(
            1,
            ScoreEntryRequest {
                home_score: Some(1),
                away_score: None,
                note: Some("  Penalty converted  ".to_string()),
                author_id: Some(3),
            },
        );

        service.record_score(&command).await.unwrap();

        let row: (String, Option<String>, Option<i64>) = sqlx::query_as(
            "SELECT status, note, changed_by FROM match_status_history WHERE match_id = 1",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(
            row,
            (
                "in_progress".to_string(),
                Some("Penalty converted".to_string()),
                Some(3)
            )
        );
    }

    #[tokio::test]
    async fn test_score_without_note_adds_no_history_row() {
        let (service, pool) = setup_service().await;

        service
            .record_score(&ScoreEntryCommand::new(1, score_request(1, 1, None)))
            .await
            .unwrap();

        let history: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM match_status_history")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(history.0, 0);
    }

    // ========================================================================
    // Undo
    // ========================================================================

    #[tokio::test]
    async fn test_undo_restores_previous_score() {
        let (service, pool) = setup_service().await;
        service
            .record_score(&ScoreEntryCommand::new(1, score_request(1, 0, Some(4))))
            .await
            .unwrap();
        service
            .record_score(&ScoreEntryCommand::new(1, score_request(2, 0, Some(4))))
            .await
            .unwrap();

        let undone = service.undo_last(Some(4)).await.unwrap();

        assert_eq!(undone.kind, CommandKind::ScoreEntry);
        assert_eq!((undone.previous_home, undone.previous_away), (1, 0));
        assert_eq!(scores(&pool, 1).await, (1, 0));
        assert_eq!(service.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_undo_finalization_restores_status_and_notes_it() {
        let (service, pool) = setup_service().await;
        service
            .finalize_match(&FinalizeMatchCommand::new(1, finalize_request(3, 1, None)))
            .await
            .unwrap();

        let undone = service.undo_last(Some(11)).await.unwrap();

        assert_eq!(undone.kind, CommandKind::Finalization);
        assert_eq!(undone.applied_status, "finished");
        assert_eq!(status_of(&pool, 1).await, "in_progress");
        assert_eq!(scores(&pool, 1).await, (0, 0));

        let last: (String, Option<String>) = sqlx::query_as(
            "SELECT status, note FROM match_status_history WHERE match_id = 1 ORDER BY id DESC LIMIT 1",
        )
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(last.0, "in_progress");
        assert_eq!(last.1, Some(format!("Undo of command #{}", undone.id)));

        // The match can be finalized again
        service
            .finalize_match(&FinalizeMatchCommand::new(1, finalize_request(2, 2, None)))
            .await
            .unwrap();
        assert_eq!(status_of(&pool, 1).await, "finished");
    }

    #[tokio::test]
    async fn test_undo_with_empty_history_is_not_found() {
        let (service, _pool) = setup_service().await;

        match service.undo_last(None).await {
            Err(CommandError::Rejected(result)) => {
                assert_eq!(result.kind(), Some(FailureKind::NotFound))
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_undo_by_another_author_is_refused() {
        let (service, pool) = setup_service().await;
        service
            .record_score(&ScoreEntryCommand::new(1, score_request(2, 1, Some(4))))
            .await
            .unwrap();

        for intruder in [Some(5), None] {
            match service.undo_last(intruder).await {
                Err(CommandError::Rejected(result)) => {
                    assert_eq!(result.kind(), Some(FailureKind::InvalidState))
                }
                other => panic!("unexpected outcome: {:?}", other),
            }
        }

        assert_eq!(scores(&pool, 1).await, (2, 1));
        assert_eq!(service.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_history_lists_applied_commands_oldest_first() {
        let (service, _pool) = setup_service().await;
        service
            .record_score(&ScoreEntryCommand::new(1, score_request(1, 0, Some(2))))
            .await
            .unwrap();
        service
            .finalize_match(&FinalizeMatchCommand::new(1, finalize_request(1, 0, Some(2))))
            .await
            .unwrap();

        let history = service.history().await;

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kind, CommandKind::ScoreEntry);
        assert_eq!(history[1].kind, CommandKind::Finalization);
        assert_eq!(history[1].previous_status, "in_progress");
        assert_eq!((history[1].previous_home, history[1].previous_away), (1, 0));
        assert!(history[0].id < history[1].id);
    }
}
