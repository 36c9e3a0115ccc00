// src/scheduling/validators.rs

use async_trait::async_trait;
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use std::sync::Arc;
use tracing::warn;

use super::models::ScheduleMatchCommand;
use super::repository::TeamLookup;
use crate::chain::{ChainObserver, CommandHandler, FailureKind, HandlerResult, ValidationChain};
use crate::common::InfrastructureFault;

pub const SCHEDULING_CHAIN: &str = "match-scheduling";

const MAX_DAYS_AHEAD: i64 = 365;
const MIN_STADIUM_CHARS: usize = 3;
const MAX_STADIUM_CHARS: usize = 100;

fn invalid(message: impl Into<String>) -> HandlerResult {
    HandlerResult::failure(FailureKind::InvalidArgument, message)
}

// ============================================================================
// Date & Time
// ============================================================================

/// New fixtures must be dated between today and a year from now
pub struct ScheduleDateCheck {
    today: Option<NaiveDate>,
}

impl ScheduleDateCheck {
    pub fn new() -> Self {
        Self { today: None }
    }

    /// Pins "today" instead of reading the local clock
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[async_trait]
impl CommandHandler<ScheduleMatchCommand> for ScheduleDateCheck {
    fn name(&self) -> &'static str {
        "ScheduleDateCheck"
    }

    fn priority(&self) -> i32 {
        1
    }

    async fn check(
        &self,
        payload: &ScheduleMatchCommand,
    ) -> Result<HandlerResult, InfrastructureFault> {
        let date = match payload.parsed_date() {
            Ok(date) => date,
            Err(msg) => return Ok(invalid(msg)),
        };
        if let Err(msg) = payload.parsed_kickoff() {
            return Ok(invalid(msg));
        }

        let today = self.today();
        if date < today {
            return Ok(invalid(format!("Match date {} is in the past", date)));
        }
        if date > today + Duration::days(MAX_DAYS_AHEAD) {
            return Ok(invalid(format!(
                "Match date can be at most {} days ahead",
                MAX_DAYS_AHEAD
            )));
        }

        Ok(HandlerResult::passed())
    }
}

/// Unusual kickoff hours are reported but never rejected
pub struct KickoffTimeCheck;

impl KickoffTimeCheck {
    fn earliest() -> NaiveTime {
        NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default()
    }

    fn latest() -> NaiveTime {
        NaiveTime::from_hms_opt(23, 0, 0).unwrap_or_default()
    }
}

#[async_trait]
impl CommandHandler<ScheduleMatchCommand> for KickoffTimeCheck {
    fn name(&self) -> &'static str {
        "KickoffTimeCheck"
    }

    fn priority(&self) -> i32 {
        3
    }

    async fn check(
        &self,
        payload: &ScheduleMatchCommand,
    ) -> Result<HandlerResult, InfrastructureFault> {
        let kickoff = match payload.parsed_kickoff() {
            Ok(kickoff) => kickoff,
            Err(msg) => return Ok(invalid(msg)),
        };

        if kickoff < Self::earliest() || kickoff > Self::latest() {
            warn!(
                kickoff = %kickoff,
                "⚠️ Unusual kickoff time (expected {} to {})",
                Self::earliest(),
                Self::latest()
            );
        }

        Ok(HandlerResult::passed())
    }
}

// ============================================================================
// Teams & Venue
// ============================================================================

/// Exactly one home and one away team, distinct and registered
pub struct TeamPairingCheck {
    teams: Arc<dyn TeamLookup>,
}

impl TeamPairingCheck {
    pub fn new(teams: Arc<dyn TeamLookup>) -> Self {
        Self { teams }
    }
}

#[async_trait]
impl CommandHandler<ScheduleMatchCommand> for TeamPairingCheck {
    fn name(&self) -> &'static str {
        "TeamPairingCheck"
    }

    fn priority(&self) -> i32 {
        2
    }

    async fn check(
        &self,
        payload: &ScheduleMatchCommand,
    ) -> Result<HandlerResult, InfrastructureFault> {
        let Some(home) = payload.home_team_id else {
            return Ok(invalid("home_team_id is required"));
        };
        let Some(away) = payload.away_team_id else {
            return Ok(invalid("away_team_id is required"));
        };

        if home == away {
            return Ok(HandlerResult::failure(
                FailureKind::Inconsistent,
                format!("Team {} cannot play both home and away", home),
            ));
        }

        for team_id in [home, away] {
            if !self.teams.team_exists(team_id).await? {
                return Ok(HandlerResult::failure(
                    FailureKind::NotFound,
                    format!("Team {} not found", team_id),
                ));
            }
        }

        Ok(HandlerResult::passed())
    }
}

pub struct StadiumCheck;

#[async_trait]
impl CommandHandler<ScheduleMatchCommand> for StadiumCheck {
    fn name(&self) -> &'static str {
        "StadiumCheck"
    }

    fn priority(&self) -> i32 {
        4
    }

    async fn check(
        &self,
        payload: &ScheduleMatchCommand,
    ) -> Result<HandlerResult, InfrastructureFault> {
        let Some(stadium) = payload.stadium_name() else {
            warn!("⚠️ Match scheduled without a stadium");
            return Ok(HandlerResult::passed());
        };

        let length = stadium.chars().count();
        if length < MIN_STADIUM_CHARS {
            return Ok(invalid(format!(
                "Stadium name must be at least {} characters",
                MIN_STADIUM_CHARS
            )));
        }
        if length > MAX_STADIUM_CHARS {
            return Ok(invalid(format!(
                "Stadium name must not exceed {} characters",
                MAX_STADIUM_CHARS
            )));
        }

        Ok(HandlerResult::passed())
    }
}

/// ScheduleDateCheck → TeamPairingCheck → KickoffTimeCheck → StadiumCheck
pub fn scheduling_chain(
    date_check: ScheduleDateCheck,
    teams: Arc<dyn TeamLookup>,
    observer: Arc<dyn ChainObserver>,
) -> ValidationChain<ScheduleMatchCommand> {
    ValidationChain::new(SCHEDULING_CHAIN)
        .link(StadiumCheck)
        .link(KickoffTimeCheck)
        .link(TeamPairingCheck::new(teams))
        .link(date_check)
        .sorted_by_priority()
        .with_observer(observer)
}
