//! # Validation Chain
//!
//! Generic chain-of-responsibility engine used to gatekeep mutating commands.
//! Handlers share one single-method contract and are composed into ordered chains;
//! the first rejection stops the run.

pub mod engine;
pub mod observer;
pub mod result;


pub use engine::{CommandHandler, ValidationChain};
pub use observer::{ChainObserver, TracingObserver};
pub use result::{FailureKind, HandlerResult, CHAIN_SUCCESS_MESSAGE};
