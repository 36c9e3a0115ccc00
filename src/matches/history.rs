// src/matches/history.rs
//! Bounded log of applied match commands, the source for undo

use serde::Serialize;
use std::collections::VecDeque;
use tokio::sync::Mutex;

pub const MAX_HISTORY_SIZE: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    ScoreEntry,
    Finalization,
}

/// What a command changed, with enough of the prior state to reverse it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedCommand {
    pub id: u64,
    pub kind: CommandKind,
    pub match_id: i64,
    pub author_id: Option<i64>,
    pub description: String,
    pub executed_at: String,
    pub previous_home: i32,
    pub previous_away: i32,
    pub previous_status: String,
    pub applied_home: i32,
    pub applied_away: i32,
    pub applied_status: String,
}

impl AppliedCommand {
    /// Entries without an author are open to anyone
    pub fn can_be_undone_by(&self, author_id: Option<i64>) -> bool {
        match self.author_id {
            None => true,
            Some(owner) => author_id == Some(owner),
        }
    }
}

struct HistoryLog {
    entries: VecDeque<AppliedCommand>,
    next_id: u64,
}

pub struct CommandHistory {
    capacity: usize,
    log: Mutex<HistoryLog>,
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            log: Mutex::new(HistoryLog {
                entries: VecDeque::new(),
                next_id: 1,
            }),
        }
    }

    /// Appends the entry under a fresh id, evicting the oldest once full
    pub async fn record(&self, mut entry: AppliedCommand) -> AppliedCommand {
        let mut log = self.log.lock().await;

        entry.id = log.next_id;
        log.next_id += 1;

        if log.entries.len() == self.capacity {
            log.entries.pop_front();
        }
        log.entries.push_back(entry.clone());

        entry
    }

    pub async fn last(&self) -> Option<AppliedCommand> {
        self.log.lock().await.entries.back().cloned()
    }

    /// Drops the most recent entry, but only if it is still the one with `id`
    pub async fn remove_last(&self, id: u64) -> bool {
        let mut log = self.log.lock().await;
        match log.entries.back() {
            Some(entry) if entry.id == id => {
                log.entries.pop_back();
                true
            }
            _ => false,
        }
    }

    /// Oldest first
    pub async fn entries(&self) -> Vec<AppliedCommand> {
        self.log.lock().await.entries.iter().cloned().collect()
    }
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}
