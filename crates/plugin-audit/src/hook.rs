//! The audit hook function.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use hookchain_core::result::AppResult;
use hookchain_plugin::{HookArgs, HookFunction, HookName, Next, Original};

use crate::trail::{AuditPhase, AuditTrail};

/// Pass-through hook that logs and records each call.
///
/// Always continues with the arguments it received and returns the
/// downstream result, error included, unchanged.
#[derive(Debug, Clone)]
pub struct AuditHook {
    /// Owning plugin id.
    plugin_id: String,
    /// Hook name this instance is registered under.
    hook: HookName,
    /// Where records go.
    trail: AuditTrail,
}

impl AuditHook {
    /// Creates an audit hook for `hook`.
    pub fn new(plugin_id: impl Into<String>, hook: HookName, trail: AuditTrail) -> Self {
        Self {
            plugin_id: plugin_id.into(),
            hook,
            trail,
        }
    }
}

#[async_trait]
impl HookFunction for AuditHook {
    fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    async fn call(&self, next: Next, _original: Original, args: HookArgs) -> AppResult<Value> {
        let dispatch_id = Uuid::now_v7();
        let started = Instant::now();

        tracing::info!(
            hook = %self.hook,
            dispatch_id = %dispatch_id,
            args = args.len(),
            "before"
        );
        self.trail
            .record(dispatch_id, &self.hook, AuditPhase::Before)
            .await;

        let result = next.call(args).await;
        let elapsed_us = started.elapsed().as_micros() as u64;

        match &result {
            Ok(_) => {
                tracing::info!(
                    hook = %self.hook,
                    dispatch_id = %dispatch_id,
                    elapsed_us = elapsed_us,
                    "after"
                );
                self.trail
                    .record(dispatch_id, &self.hook, AuditPhase::After)
                    .await;
            }
            Err(e) => {
                tracing::warn!(
                    hook = %self.hook,
                    dispatch_id = %dispatch_id,
                    elapsed_us = elapsed_us,
                    error = %e,
                    "after (failed)"
                );
                self.trail
                    .record(dispatch_id, &self.hook, AuditPhase::Failed)
                    .await;
            }
        }

        result
    }
}
