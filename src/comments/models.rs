// src/comments/models.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::matches::commands::MatchCommand;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: i64,
    pub match_id: i64,
    pub author_id: Option<i64>,
    pub message: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCommentRequest {
    pub author_id: Option<i64>,
    pub message: String,
}

/// A comment awaiting moderation
#[derive(Debug, Clone, PartialEq)]
pub struct CommentDraft {
    pub match_id: i64,
    pub author_id: Option<i64>,
    pub message: String,
}

impl CommentDraft {
    pub fn new(match_id: i64, request: CreateCommentRequest) -> Self {
        Self {
            match_id,
            author_id: request.author_id,
            message: request.message,
        }
    }
}

impl MatchCommand for CommentDraft {
    fn match_id(&self) -> i64 {
        self.match_id
    }
}
