//! Plugin definition.

use std::sync::Arc;

use async_trait::async_trait;

use hookchain_core::result::AppResult;
use hookchain_plugin::{HookBinding, HookName, Plugin, PluginInfo, plugin_info};

use crate::hook::AuditHook;
use crate::trail::AuditTrail;

/// Plugin id used for registration and configuration.
pub const PLUGIN_ID: &str = "audit";

/// Audit plugin: one [`AuditHook`] per configured hook name.
#[derive(Debug, Clone)]
pub struct AuditPlugin {
    hooks: Vec<HookName>,
    trail: AuditTrail,
}

impl AuditPlugin {
    /// Creates the plugin for the given hook names.
    pub fn new<I, N>(hooks: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<HookName>,
    {
        Self {
            hooks: hooks.into_iter().map(Into::into).collect(),
            trail: AuditTrail::new(),
        }
    }

    /// Returns the shared audit trail.
    pub fn trail(&self) -> &AuditTrail {
        &self.trail
    }
}

#[async_trait]
impl Plugin for AuditPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            id: PLUGIN_ID,
            name: "Audit Trail",
            version: env!("CARGO_PKG_VERSION"),
            description: "Logs and records every call through the configured hooks",
            author: "Hookchain Team"
        )
    }

    async fn on_start(&self) -> AppResult<()> {
        tracing::info!(hooks = self.hooks.len(), "Audit plugin started");
        Ok(())
    }

    fn hooks(&self) -> Vec<HookBinding> {
        self.hooks
            .iter()
            .map(|name| {
                let hook = AuditHook::new(PLUGIN_ID, name.clone(), self.trail.clone());
                HookBinding::new(name.clone(), Arc::new(hook))
            })
            .collect()
    }
}
