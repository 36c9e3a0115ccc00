// src/scheduling/repository.rs

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::common::InfrastructureFault;

/// Answers whether a team is registered
#[async_trait]
pub trait TeamLookup: Send + Sync {
    async fn team_exists(&self, team_id: i64) -> Result<bool, InfrastructureFault>;
}

pub struct TeamRepository {
    db: SqlitePool,
}

impl TeamRepository {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TeamLookup for TeamRepository {
    async fn team_exists(&self, team_id: i64) -> Result<bool, InfrastructureFault> {
        let found: Option<(i64,)> = sqlx::query_as("SELECT id FROM teams WHERE id = ?")
            .bind(team_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(found.is_some())
    }
}
