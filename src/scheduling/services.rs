// src/scheduling/services.rs

use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

use super::models::ScheduleMatchCommand;
use super::repository::TeamLookup;
use super::validators::{scheduling_chain, ScheduleDateCheck};
use crate::chain::{ChainObserver, FailureKind, HandlerResult, ValidationChain};
use crate::common::InfrastructureFault;
use crate::matches::models::MatchStatus;
use crate::matches::services::CommandError;

pub struct SchedulingService {
    db: SqlitePool,
    scheduling: ValidationChain<ScheduleMatchCommand>,
}

impl SchedulingService {
    pub fn new(
        db: SqlitePool,
        teams: Arc<dyn TeamLookup>,
        observer: Arc<dyn ChainObserver>,
    ) -> Self {
        Self::with_date_check(db, ScheduleDateCheck::new(), teams, observer)
    }

    pub fn with_date_check(
        db: SqlitePool,
        date_check: ScheduleDateCheck,
        teams: Arc<dyn TeamLookup>,
        observer: Arc<dyn ChainObserver>,
    ) -> Self {
        let scheduling = scheduling_chain(date_check, teams, observer);
        info!("🔗 Scheduling chain: {}", scheduling.visualize());

        Self { db, scheduling }
    }

    pub fn scheduling_chain(&self) -> &ValidationChain<ScheduleMatchCommand> {
        &self.scheduling
    }

    /// Validates the fixture and stores it; returns the new match id
    pub async fn schedule_match(&self, command: &ScheduleMatchCommand) -> Result<i64, CommandError> {
        let verdict = self.scheduling.handle(command).await?;
        if !verdict.is_success() {
            return Err(CommandError::Rejected(verdict));
        }

        let (date, kickoff, home, away) = match (
            command.parsed_date(),
            command.parsed_kickoff(),
            command.home_team_id,
            command.away_team_id,
        ) {
            (Ok(date), Ok(kickoff), Some(home), Some(away)) => (date, kickoff, home, away),
            _ => {
                return Err(CommandError::Rejected(HandlerResult::failure(
                    FailureKind::InvalidArgument,
                    "Fixture is incomplete",
                )))
            }
        };

        let now = chrono::Utc::now().to_rfc3339();
        let status = MatchStatus::Scheduled.as_str();
        let mut tx = self.db.begin().await.map_err(InfrastructureFault::from)?;

        let match_id = sqlx::query(
            r#"
            INSERT INTO matches (match_date, kickoff_time, status, stadium, league, note, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(date.to_string())
        .bind(kickoff.format("%H:%M").to_string())
        .bind(status)
        .bind(command.stadium_name())
        .bind(&command.league)
        .bind(&command.note)
        .bind(&now)
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(InfrastructureFault::from)?
        .last_insert_rowid();

        for (team_id, is_home) in [(home, true), (away, false)] {
            sqlx::query(
                "INSERT INTO match_teams (match_id, team_id, is_home, score) VALUES (?, ?, ?, 0)",
            )
            .bind(match_id)
            .bind(team_id)
            .bind(is_home)
            .execute(&mut *tx)
            .await
            .map_err(InfrastructureFault::from)?;
        }

        sqlx::query(
            "INSERT INTO match_status_history (match_id, status, note, changed_at) VALUES (?, ?, ?, ?)",
        )
        .bind(match_id)
        .bind(status)
        .bind("Fixture scheduled")
        .bind(&now)
        .execute(&mut *tx)
        .await
        .map_err(InfrastructureFault::from)?;

        tx.commit().await.map_err(InfrastructureFault::from)?;

        info!(match_id, home, away, date = %date, "📅 Match scheduled");

        Ok(match_id)
    }
}
