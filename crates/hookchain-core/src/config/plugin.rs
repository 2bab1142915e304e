//! Plugin system configuration.

use serde::{Deserialize, Serialize};

/// Plugin system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Whether to load the compiled-in plugins on startup.
    #[serde(default = "default_true")]
    pub auto_load: bool,
    /// Plugin ids that must never be loaded.
    #[serde(default)]
    pub disabled: Vec<String>,
    /// Hook names the audit plugin attaches to.
    #[serde(default = "default_audited_hooks")]
    pub audited_hooks: Vec<String>,
}

impl PluginConfig {
    /// Returns whether the given plugin id is disabled.
    pub fn is_disabled(&self, plugin_id: &str) -> bool {
        self.disabled.iter().any(|id| id == plugin_id)
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            auto_load: true,
            disabled: Vec::new(),
            audited_hooks: default_audited_hooks(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_audited_hooks() -> Vec<String> {
    vec!["checkout.process".to_string()]
}
