// src/comments/validators.rs

use async_trait::async_trait;
use regex::Regex;
use std::sync::Arc;
use tracing::warn;

use super::models::CommentDraft;
use crate::chain::{ChainObserver, CommandHandler, FailureKind, HandlerResult, ValidationChain};
use crate::common::InfrastructureFault;
use crate::matches::sources::MatchLookup;
use crate::matches::validators::MatchExists;

pub const MODERATION_CHAIN: &str = "comment-moderation";

pub const DEFAULT_BANNED_WORDS: &[&str] =
    &["küfür1", "küfür2", "küfür3", "aptal", "salak", "gerizekalı"];

const MAX_REPEATED_CHARS: usize = 5;
const MIN_MESSAGE_CHARS: usize = 3;
const MAX_MESSAGE_CHARS: usize = 500;
const MAX_LINKS: usize = 2;
const SHOUTING_MIN_CHARS: usize = 10;
const SHOUTING_UPPERCASE_PERCENT: usize = 80;

const URL_PATTERN: &str =
    r"(?i)((https?|ftp)://|www\.)[-a-z0-9+&@#/%?=~_|!:,.;]*[-a-z0-9+&@#/%=~_|]";

fn rejected(message: impl Into<String>) -> HandlerResult {
    HandlerResult::failure(FailureKind::InvalidArgument, message)
}

/// Rejects empty comments and comments containing a banned word
pub struct ProfanityFilter {
    banned: Vec<String>,
}

impl ProfanityFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            banned: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }
}

impl Default for ProfanityFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BANNED_WORDS.iter().copied())
    }
}

#[async_trait]
impl CommandHandler<CommentDraft> for ProfanityFilter {
    fn name(&self) -> &'static str {
        "ProfanityFilter"
    }

    async fn check(&self, payload: &CommentDraft) -> Result<HandlerResult, InfrastructureFault> {
        if payload.message.trim().is_empty() {
            return Ok(rejected("Comment cannot be empty"));
        }

        let lowered = payload.message.to_lowercase();
        if self.banned.iter().any(|word| lowered.contains(word.as_str())) {
            return Ok(rejected("Comment contains inappropriate language"));
        }

        Ok(HandlerResult::passed())
    }
}

/// Rejects runs of more than five identical characters ("goooooool").
/// All-caps comments only draw a warning.
pub struct RepeatedCharacters;

impl RepeatedCharacters {
    fn longest_run(message: &str) -> usize {
        let mut longest = 0;
        let mut run = 0;
        let mut previous = None;

        for c in message.chars() {
            if Some(c) == previous {
                run += 1;
            } else {
                run = 1;
                previous = Some(c);
            }
            longest = longest.max(run);
        }

        longest
    }

    /// More than 80% of the letters uppercase, ignoring messages shorter than ten characters
    pub fn is_shouting(message: &str) -> bool {
        if message.chars().count() < SHOUTING_MIN_CHARS {
            return false;
        }

        let (letters, uppercase) = message
            .chars()
            .filter(|c| c.is_alphabetic())
            .fold((0usize, 0usize), |(letters, uppercase), c| {
                (letters + 1, uppercase + usize::from(c.is_uppercase()))
            });

        letters > 0 && uppercase * 100 > letters * SHOUTING_UPPERCASE_PERCENT
    }
}

#[async_trait]
impl CommandHandler<CommentDraft> for RepeatedCharacters {
    fn name(&self) -> &'static str {
        "RepeatedCharacters"
    }

    async fn check(&self, payload: &CommentDraft) -> Result<HandlerResult, InfrastructureFault> {
        if Self::longest_run(&payload.message) > MAX_REPEATED_CHARS {
            return Ok(rejected(format!(
                "Comment cannot repeat a character more than {} times in a row",
                MAX_REPEATED_CHARS
            )));
        }

        if Self::is_shouting(&payload.message) {
            warn!(
                match_id = payload.match_id,
                author_id = ?payload.author_id,
                "📢 Comment is mostly uppercase"
            );
        }

        Ok(HandlerResult::passed())
    }
}

pub struct LengthCheck;

#[async_trait]
impl CommandHandler<CommentDraft> for LengthCheck {
    fn name(&self) -> &'static str {
        "LengthCheck"
    }

    async fn check(&self, payload: &CommentDraft) -> Result<HandlerResult, InfrastructureFault> {
        let length = payload.message.trim().chars().count();

        if length < MIN_MESSAGE_CHARS {
            return Ok(rejected(format!(
                "Comment must be at least {} characters",
                MIN_MESSAGE_CHARS
            )));
        }
        if length > MAX_MESSAGE_CHARS {
            return Ok(rejected(format!(
                "Comment must not exceed {} characters",
                MAX_MESSAGE_CHARS
            )));
        }

        Ok(HandlerResult::passed())
    }
}

/// Rejects comments carrying more than two links
pub struct LinkLimit {
    url: Regex,
}

impl LinkLimit {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            url: Regex::new(URL_PATTERN)?,
        })
    }
}

#[async_trait]
impl CommandHandler<CommentDraft> for LinkLimit {
    fn name(&self) -> &'static str {
        "LinkLimit"
    }

    async fn check(&self, payload: &CommentDraft) -> Result<HandlerResult, InfrastructureFault> {
        let links = self.url.find_iter(&payload.message).count();

        if links > MAX_LINKS {
            return Ok(rejected(format!(
                "Comment may contain at most {} links (found {})",
                MAX_LINKS, links
            )));
        }

        Ok(HandlerResult::passed())
    }
}

/// MatchExists → ProfanityFilter → RepeatedCharacters → LengthCheck → LinkLimit
pub fn moderation_chain(
    matches: Arc<dyn MatchLookup>,
    observer: Arc<dyn ChainObserver>,
) -> Result<ValidationChain<CommentDraft>, regex::Error> {
    Ok(ValidationChain::new(MODERATION_CHAIN)
        .link(MatchExists::new(matches))
        .link(ProfanityFilter::default())
        .link(RepeatedCharacters)
        .link(LengthCheck)
        .link(LinkLimit::new()?)
        .with_observer(observer))
}
