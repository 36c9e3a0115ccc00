// src/comments/services.rs

use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

use super::models::{Comment, CommentDraft};
use super::validators::moderation_chain;
use crate::chain::{ChainObserver, ValidationChain};
use crate::common::InfrastructureFault;
use crate::matches::services::CommandError;
use crate::matches::sources::MatchLookup;

pub struct CommentsService {
    db: SqlitePool,
    moderation: ValidationChain<CommentDraft>,
}

impl CommentsService {
    pub fn new(
        db: SqlitePool,
        matches: Arc<dyn MatchLookup>,
        observer: Arc<dyn ChainObserver>,
    ) -> Result<Self, regex::Error> {
        let moderation = moderation_chain(matches, observer)?;
        info!("🔗 Moderation chain: {}", moderation.visualize());

        Ok(Self { db, moderation })
    }

    pub fn moderation_chain(&self) -> &ValidationChain<CommentDraft> {
        &self.moderation
    }

    /// Moderates the draft and stores it when every check passes
    pub async fn post_comment(&self, draft: CommentDraft) -> Result<Comment, CommandError> {
        let verdict = self.moderation.handle(&draft).await?;
        if !verdict.is_success() {
            return Err(CommandError::Rejected(verdict));
        }

        let created_at = chrono::Utc::now().to_rfc3339();
        let message = draft.message.trim().to_string();

        let result = sqlx::query(
            "INSERT INTO comments (match_id, author_id, message, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(draft.match_id)
        .bind(draft.author_id)
        .bind(&message)
        .bind(&created_at)
        .execute(&self.db)
        .await
        .map_err(InfrastructureFault::from)?;

        info!(match_id = draft.match_id, author_id = ?draft.author_id, "💬 Comment posted");

        Ok(Comment {
            id: result.last_insert_rowid(),
            match_id: draft.match_id,
            author_id: draft.author_id,
            message,
            created_at,
        })
    }

    pub async fn list_comments(&self, match_id: i64) -> Result<Vec<Comment>, InfrastructureFault> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, match_id, author_id, message, created_at
            FROM comments
            WHERE match_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(match_id)
        .fetch_all(&self.db)
        .await?;

        Ok(comments)
    }
}
