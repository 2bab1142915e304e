//! Plugin manager: loads plugins and registers their hook functions.

use std::sync::Arc;

use tracing::{error, info, warn};

use hookchain_core::config::plugin::PluginConfig;
use hookchain_core::error::AppError;

use crate::hooks::registry::HookRegistry;
use crate::registry::{Plugin, PluginInfo, PluginRegistry};

/// Manages plugin lifecycle: load, start, stop.
///
/// The hook registry is injected so the same instance can be handed to
/// every [`HookedFn`](crate::hooks::HookedFn) that dispatches on it.
/// Hooks are never unregistered; stopping a plugin leaves its hooks in
/// place.
#[derive(Debug)]
pub struct PluginManager {
    /// Plugin registry.
    plugin_registry: Arc<PluginRegistry>,
    /// Hook registry.
    hook_registry: Arc<HookRegistry>,
    /// Plugin settings.
    config: PluginConfig,
}

impl PluginManager {
    /// Creates a new plugin manager registering into `hook_registry`.
    pub fn new(hook_registry: Arc<HookRegistry>, config: PluginConfig) -> Self {
        Self {
            plugin_registry: Arc::new(PluginRegistry::new()),
            hook_registry,
            config,
        }
    }

    /// Loads and starts a compiled-in plugin.
    ///
    /// Returns `Ok(false)` when the plugin is disabled by configuration.
    pub async fn load_plugin(&self, plugin: Arc<dyn Plugin>) -> Result<bool, AppError> {
        let mut info = plugin.info();
        let plugin_id = info.id.clone();

        if self.config.is_disabled(&plugin_id) {
            info!(plugin_id = %plugin_id, "Plugin disabled by configuration, skipping");
            return Ok(false);
        }

        if self.plugin_registry.contains(&plugin_id).await {
            return Err(AppError::conflict(format!(
                "Plugin '{}' is already registered",
                plugin_id
            )));
        }

        // Load
        plugin.on_load().await.map_err(|e| {
            AppError::plugin(format!("Plugin '{}' load failed: {}", plugin_id, e))
        })?;

        let bindings = plugin.hooks();
        info.hooks = bindings.iter().map(|b| b.name.to_string()).collect();
        let hook_count = bindings.len();

        // Register
        self.plugin_registry.register(plugin.clone(), info.clone()).await?;

        // Register hooks
        for binding in bindings {
            self.hook_registry.register(binding.name, binding.hook).await;
        }

        // Start
        plugin.on_start().await.map_err(|e| {
            error!(plugin_id = %plugin_id, error = %e, "Plugin start failed");
            AppError::plugin(format!("Plugin '{}' start failed: {}", plugin_id, e))
        })?;

        info!(
            plugin_id = %plugin_id,
            name = %info.name,
            version = %info.version,
            hooks = hook_count,
            "Plugin loaded and started"
        );

        Ok(true)
    }

    /// Loads plugins in order, stopping at the first failure.
    ///
    /// Does nothing when `auto_load` is off. Returns the number loaded.
    pub async fn load_all(&self, plugins: Vec<Arc<dyn Plugin>>) -> Result<usize, AppError> {
        if !self.config.auto_load {
            info!(available = plugins.len(), "Plugin auto-load disabled");
            return Ok(0);
        }

        let mut loaded = 0;
        for plugin in plugins {
            if self.load_plugin(plugin).await? {
                loaded += 1;
            }
        }

        info!(loaded = loaded, "Plugins loaded");
        Ok(loaded)
    }

    /// Stops every loaded plugin. Failures are logged, not returned.
    pub async fn shutdown(&self) {
        for info in self.plugin_registry.list().await {
            let Some(plugin) = self.plugin_registry.get(&info.id).await else {
                continue;
            };

            if let Err(e) = plugin.on_stop().await {
                warn!(
                    plugin_id = %info.id,
                    error = %e,
                    "Plugin stop returned error"
                );
            }
        }

        info!("All plugins stopped");
    }

    /// Returns the hook registry.
    pub fn hook_registry(&self) -> &Arc<HookRegistry> {
        &self.hook_registry
    }

    /// Returns the plugin registry.
    pub fn plugin_registry(&self) -> &Arc<PluginRegistry> {
        &self.plugin_registry
    }

    /// Lists all loaded plugins.
    pub async fn list_plugins(&self) -> Vec<PluginInfo> {
        self.plugin_registry.list().await
    }
}
