//! Plugin registry: stores loaded plugin instances and metadata.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::info;

use hookchain_core::error::AppError;
use hookchain_core::result::AppResult;

use crate::hooks::definitions::HookName;
use crate::hooks::function::HookFunction;

/// Metadata about a loaded plugin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
    /// Author or maintainer.
    pub author: String,
    /// Hook names this plugin registered for (filled in on load).
    pub hooks: Vec<String>,
    /// Whether the plugin is currently enabled.
    pub enabled: bool,
}

/// A hook function together with the hook name it attaches to.
#[derive(Clone)]
pub struct HookBinding {
    /// Hook name to register under.
    pub name: HookName,
    /// The hook function.
    pub hook: Arc<dyn HookFunction>,
}

impl HookBinding {
    /// Creates a binding.
    pub fn new(name: impl Into<HookName>, hook: Arc<dyn HookFunction>) -> Self {
        Self {
            name: name.into(),
            hook,
        }
    }
}

impl std::fmt::Debug for HookBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookBinding")
            .field("name", &self.name)
            .field("plugin_id", &self.hook.plugin_id())
            .finish()
    }
}

/// Trait that all plugins must implement.
#[async_trait::async_trait]
pub trait Plugin: Send + Sync {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Called once before the plugin's hooks are registered.
    async fn on_load(&self) -> AppResult<()> {
        Ok(())
    }

    /// Called once the plugin's hooks are registered.
    async fn on_start(&self) -> AppResult<()> {
        Ok(())
    }

    /// Called on shutdown.
    async fn on_stop(&self) -> AppResult<()> {
        Ok(())
    }

    /// Returns the hook functions this plugin contributes, in the order
    /// they should be registered.
    fn hooks(&self) -> Vec<HookBinding>;
}

/// Registry of all loaded plugins.
pub struct PluginRegistry {
    /// Plugin ID → plugin instance.
    plugins: RwLock<HashMap<String, Arc<dyn Plugin>>>,
    /// Plugin ID → metadata.
    metadata: RwLock<HashMap<String, PluginInfo>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(HashMap::new()),
            metadata: RwLock::new(HashMap::new()),
        }
    }

    /// Registers a plugin with its (load-time) metadata.
    pub async fn register(&self, plugin: Arc<dyn Plugin>, info: PluginInfo) -> AppResult<()> {
        let id = info.id.clone();

        let mut plugins = self.plugins.write().await;
        let mut metadata = self.metadata.write().await;

        if plugins.contains_key(&id) {
            return Err(AppError::conflict(format!(
                "Plugin '{}' is already registered",
                id
            )));
        }

        info!(plugin_id = %id, name = %info.name, version = %info.version, "Registering plugin");

        plugins.insert(id.clone(), plugin);
        metadata.insert(id, info);

        Ok(())
    }

    /// Gets a plugin by ID.
    pub async fn get(&self, plugin_id: &str) -> Option<Arc<dyn Plugin>> {
        let plugins = self.plugins.read().await;
        plugins.get(plugin_id).cloned()
    }

    /// Returns whether a plugin with this ID is registered.
    pub async fn contains(&self, plugin_id: &str) -> bool {
        let plugins = self.plugins.read().await;
        plugins.contains_key(plugin_id)
    }

    /// Lists all registered plugin metadata, sorted by ID.
    pub async fn list(&self) -> Vec<PluginInfo> {
        let metadata = self.metadata.read().await;
        let mut infos: Vec<PluginInfo> = metadata.values().cloned().collect();
        infos.sort_by(|a, b| a.id.cmp(&b.id));
        infos
    }

    /// Returns plugin count.
    pub async fn count(&self) -> usize {
        let plugins = self.plugins.read().await;
        plugins.len()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginRegistry").finish_non_exhaustive()
    }
}
