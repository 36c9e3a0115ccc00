// src/scheduling/models.rs

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleMatchRequest {
    pub match_date: Option<String>,
    pub kickoff_time: Option<String>,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub stadium: Option<String>,
    pub league: Option<String>,
    pub note: Option<String>,
}

/// A fixture waiting to be approved by the scheduling chain
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleMatchCommand {
    pub match_date: Option<String>,
    pub kickoff_time: Option<String>,
    pub home_team_id: Option<i64>,
    pub away_team_id: Option<i64>,
    pub stadium: Option<String>,
    pub league: Option<String>,
    pub note: Option<String>,
}

impl From<ScheduleMatchRequest> for ScheduleMatchCommand {
    fn from(request: ScheduleMatchRequest) -> Self {
        Self {
            match_date: request.match_date,
            kickoff_time: request.kickoff_time,
            home_team_id: request.home_team_id,
            away_team_id: request.away_team_id,
            stadium: request.stadium,
            league: request.league,
            note: request.note,
        }
    }
}

impl ScheduleMatchCommand {
    pub fn parsed_date(&self) -> Result<NaiveDate, String> {
        let raw = required(self.match_date.as_deref(), "match_date")?;
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map_err(|_| format!("match_date '{}' must be formatted as YYYY-MM-DD", raw))
    }

    pub fn parsed_kickoff(&self) -> Result<NaiveTime, String> {
        let raw = required(self.kickoff_time.as_deref(), "kickoff_time")?;
        NaiveTime::parse_from_str(raw, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|_| format!("kickoff_time '{}' must be formatted as HH:MM", raw))
    }

    /// Trimmed stadium name, `None` when missing or blank
    pub fn stadium_name(&self) -> Option<&str> {
        self.stadium
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

fn required<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, String> {
    match value.map(str::trim) {
        Some(raw) if !raw.is_empty() => Ok(raw),
        _ => Err(format!("{} is required", field)),
    }
}
