// src/chain/result.rs
//! Outcome of a single validation step, or of a whole chain run

use serde::Serialize;
use std::fmt;

/// Message carried by the synthetic success a chain returns when every handler approved
pub const CHAIN_SUCCESS_MESSAGE: &str = "All checks passed";

const CHECK_PASSED_MESSAGE: &str = "Check passed";

/// Classification of a rejected command, mapped to a transport code by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    /// The referenced match does not exist
    NotFound,
    /// The command is not allowed from the match's current status
    InvalidState,
    /// A field is missing, malformed or out of range
    InvalidArgument,
    /// Two fields contradict each other
    Inconsistent,
}

impl FailureKind {
    pub fn code(&self) -> &'static str {
        match self {
            FailureKind::NotFound => "NOT_FOUND",
            FailureKind::InvalidState => "INVALID_STATE",
            FailureKind::InvalidArgument => "INVALID_ARGUMENT",
            FailureKind::Inconsistent => "INCONSISTENT",
        }
    }

    fn fallback_message(&self) -> &'static str {
        match self {
            FailureKind::NotFound => "Referenced match was not found",
            FailureKind::InvalidState => "Command is not allowed in the current match state",
            FailureKind::InvalidArgument => "Command contains an invalid field",
            FailureKind::Inconsistent => "Command fields contradict each other",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Immutable result of a handler check.
///
/// A failing result always carries a [`FailureKind`] and a non-empty message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerResult {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    originating_handler: Option<String>,
}

impl HandlerResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            kind: None,
            originating_handler: None,
        }
    }

    /// Plain approval used by individual handlers
    pub fn passed() -> Self {
        Self::success(CHECK_PASSED_MESSAGE)
    }

    pub fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            kind.fallback_message().to_string()
        } else {
            message
        };

        Self {
            success: false,
            message,
            kind: Some(kind),
            originating_handler: None,
        }
    }

    /// Records which handler produced this result, keeping an existing attribution
    pub fn attributed_to(mut self, handler: &str) -> Self {
        if self.originating_handler.is_none() {
            self.originating_handler = Some(handler.to_string());
        }
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> Option<FailureKind> {
        self.kind
    }

    pub fn originating_handler(&self) -> Option<&str> {
        self.originating_handler.as_deref()
    }
}

impl fmt::Display for HandlerResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.originating_handler) {
            (Some(kind), Some(handler)) => write!(f, "[{}] {} ({})", kind, self.message, handler),
            (Some(kind), None) => write!(f, "[{}] {}", kind, self.message),
            _ => f.write_str(&self.message),
        }
    }
}
