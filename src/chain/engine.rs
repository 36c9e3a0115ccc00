// src/chain/engine.rs
//! Ordered, fail-fast validation chain

use async_trait::async_trait;
use std::sync::Arc;

use super::observer::ChainObserver;
use super::result::{HandlerResult, CHAIN_SUCCESS_MESSAGE};
use crate::common::InfrastructureFault;

const CHAIN_SEPARATOR: &str = " → ";
const EMPTY_CHAIN: &str = "(no handlers)";

/// One validator in a chain.
///
/// A handler inspects the payload and either approves it or returns a failing
/// [`HandlerResult`]. It must not mutate anything; collaborator faults are returned
/// as `Err` and abort the chain.
#[async_trait]
pub trait CommandHandler<T: Sync>: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lower runs earlier when a chain is explicitly sorted
    fn priority(&self) -> i32 {
        0
    }

    async fn check(&self, payload: &T) -> Result<HandlerResult, InfrastructureFault>;
}

/// Handlers linked in a caller-chosen order.
///
/// The sequence is owned by the chain, so a handler can never point back at an
/// earlier one.
pub struct ValidationChain<T> {
    name: String,
    handlers: Vec<Box<dyn CommandHandler<T>>>,
    observer: Option<Arc<dyn ChainObserver>>,
}

impl<T: Sync> ValidationChain<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handlers: Vec::new(),
            observer: None,
        }
    }

    /// Appends a handler after the current tail
    pub fn link<H>(mut self, handler: H) -> Self
    where
        H: CommandHandler<T> + 'static,
    {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn ChainObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Reorders handlers by ascending priority. Equal priorities keep link order.
    pub fn sorted_by_priority(mut self) -> Self {
        self.handlers.sort_by_key(|handler| handler.priority());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|handler| handler.name()).collect()
    }

    /// Runs the payload through every handler until one rejects it.
    ///
    /// Returns the first failure verbatim (attributed to its handler), or a generic
    /// success once the chain is exhausted. An empty chain approves.
    pub async fn handle(&self, payload: &T) -> Result<HandlerResult, InfrastructureFault> {
        for handler in &self.handlers {
            let handler_name = handler.name();

            if let Some(observer) = &self.observer {
                observer.before_check(&self.name, handler_name);
            }

            let result = match handler.check(payload).await {
                Ok(result) => result,
                Err(fault) => {
                    if let Some(observer) = &self.observer {
                        observer.on_fault(&self.name, handler_name, &fault);
                    }
                    return Err(fault);
                }
            };

            let result = if result.is_success() {
                result
            } else {
                result.attributed_to(handler_name)
            };

            if let Some(observer) = &self.observer {
                observer.after_check(&self.name, handler_name, &result);
            }

            if !result.is_success() {
                return Ok(result);
            }
        }

        Ok(HandlerResult::success(CHAIN_SUCCESS_MESSAGE))
    }

    /// Renders the chain as `1. A → 2. B → 3. C`
    pub fn visualize(&self) -> String {
        if self.is_empty() {
            return EMPTY_CHAIN.to_string();
        }

        self.handlers
            .iter()
            .enumerate()
            .map(|(index, handler)| format!("{}. {}", index + 1, handler.name()))
            .collect::<Vec<_>>()
            .join(CHAIN_SEPARATOR)
    }
}
