// src/chain/observer.rs
//! Hooks invoked around every handler check

use tracing::{debug, error, warn};

use super::result::HandlerResult;
use crate::common::InfrastructureFault;

/// Receives notifications while a chain runs. All methods default to no-ops.
pub trait ChainObserver: Send + Sync {
    fn before_check(&self, _chain: &str, _handler: &str) {}

    fn after_check(&self, _chain: &str, _handler: &str, _result: &HandlerResult) {}

    fn on_fault(&self, _chain: &str, _handler: &str, _fault: &InfrastructureFault) {}
}

/// Observer that reports chain progress through `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ChainObserver for TracingObserver {
    fn before_check(&self, chain: &str, handler: &str) {
        debug!(chain = %chain, handler = %handler, "🔗 Running check");
    }

    fn after_check(&self, chain: &str, handler: &str, result: &HandlerResult) {
        if result.is_success() {
            debug!(chain = %chain, handler = %handler, "✅ Check passed");
        } else {
            warn!(
                chain = %chain,
                handler = %handler,
                kind = ?result.kind(),
                message = %result.message(),
                "❌ Check rejected command"
            );
        }
    }

    fn on_fault(&self, chain: &str, handler: &str, fault: &InfrastructureFault) {
        error!(chain = %chain, handler = %handler, error = %fault, "Check aborted by infrastructure fault");
    }
}
