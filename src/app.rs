//! Application bootstrap.

use std::sync::Arc;

use tracing::info;

use hookchain_core::config::AppConfig;
use hookchain_core::result::AppResult;
use hookchain_plugin::{HookRegistry, HookedFn, Plugin, PluginManager};
use plugin_audit::{AuditPlugin, AuditTrail};

use crate::checkout::{self, DiscountPlugin};
use crate::users::{UserDirectory, UserViews};

/// Everything a request handler needs: wrapped core functions plus the
/// registry and plugin manager behind them.
#[derive(Debug)]
pub struct App {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Shared hook registry.
    pub hooks: Arc<HookRegistry>,
    /// Plugin lifecycle.
    pub plugins: PluginManager,
    /// Records written by the audit plugin.
    pub audit: AuditTrail,
    /// `checkout.process`.
    pub checkout: HookedFn,
    /// `users.*` views.
    pub users: UserViews,
}

impl App {
    /// Builds the registry, wraps the core functions, and loads the
    /// compiled-in plugins.
    ///
    /// Core functions are wrapped before plugins load; the wrappers look up
    /// hooks on every call, so the order does not matter.
    pub async fn bootstrap(config: AppConfig, directory: UserDirectory) -> AppResult<Self> {
        let hooks = Arc::new(HookRegistry::new());

        let checkout = checkout::wrap(hooks.clone());
        let users = UserViews::new(hooks.clone(), Arc::new(directory));

        let plugins = PluginManager::new(hooks.clone(), config.plugins.clone());
        let audit_plugin = AuditPlugin::new(config.plugins.audited_hooks.iter().cloned());
        let audit = audit_plugin.trail().clone();

        let compiled_in: Vec<Arc<dyn Plugin>> =
            vec![Arc::new(DiscountPlugin::default()), Arc::new(audit_plugin)];
        let loaded = plugins.load_all(compiled_in).await?;

        info!(
            plugins = loaded,
            hook_names = hooks.registered_names().await.len(),
            "Application bootstrapped"
        );

        Ok(Self {
            config,
            hooks,
            plugins,
            audit,
            checkout,
            users,
        })
    }

    /// Stops all plugins.
    pub async fn shutdown(&self) {
        self.plugins.shutdown().await;
    }
}
