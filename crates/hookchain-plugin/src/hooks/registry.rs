//! Hook registry: plugins append hook functions under a hook name.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use tracing::info;

use hookchain_core::result::AppResult;

use super::args::HookArgs;
use super::definitions::HookName;
use super::function::{HookFunction, Next, Original, hook_fn};

/// Immutable snapshot of the hooks registered for one name, in
/// registration order.
pub type HookChain = Arc<[Arc<dyn HookFunction>]>;

/// Registry of hook functions organized by hook name.
///
/// Lists are append-only and copy-on-append: a registration publishes a new
/// list, so a lookup always sees either the list before or the list after a
/// concurrent registration, and a dispatch already running keeps the
/// snapshot it started with.
pub struct HookRegistry {
    /// Hook name → hooks in registration order.
    hooks: RwLock<HashMap<HookName, HookChain>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self {
            hooks: RwLock::new(HashMap::new()),
        }
    }

    /// Appends a hook function to the list for `name`.
    ///
    /// Never fails. Registering the same function twice makes it run twice.
    pub async fn register(&self, name: impl Into<HookName>, hook: Arc<dyn HookFunction>) {
        let name = name.into();
        let plugin_id = hook.plugin_id().to_string();

        let mut hooks = self.hooks.write().await;
        let current = hooks.get(&name).map(|chain| &chain[..]).unwrap_or(&[]);

        let mut updated = Vec::with_capacity(current.len() + 1);
        updated.extend(current.iter().cloned());
        updated.push(hook);
        let position = updated.len() - 1;

        hooks.insert(name.clone(), HookChain::from(updated));

        info!(
            hook = %name,
            plugin_id = %plugin_id,
            position = position,
            "Hook function registered"
        );
    }

    /// Registers an async closure as a hook function.
    pub async fn register_fn<F, Fut>(
        &self,
        name: impl Into<HookName>,
        plugin_id: impl Into<String>,
        func: F,
    ) where
        F: Fn(Next, Original, HookArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Value>> + Send + 'static,
    {
        self.register(name, hook_fn(plugin_id, func)).await;
    }

    /// Returns the hooks currently registered for `name`.
    ///
    /// An unregistered name yields an empty chain.
    pub async fn lookup(&self, name: &str) -> HookChain {
        let hooks = self.hooks.read().await;
        hooks.get(name).cloned().unwrap_or_else(|| HookChain::from(Vec::new()))
    }

    /// Returns whether any hooks are registered for `name`.
    pub async fn has_hooks(&self, name: &str) -> bool {
        let hooks = self.hooks.read().await;
        hooks.get(name).is_some_and(|chain| !chain.is_empty())
    }

    /// Returns the number of hooks registered for `name`.
    pub async fn hook_count(&self, name: &str) -> usize {
        let hooks = self.hooks.read().await;
        hooks.get(name).map(|chain| chain.len()).unwrap_or(0)
    }

    /// Returns every name with at least one hook, sorted.
    pub async fn registered_names(&self) -> Vec<HookName> {
        let hooks = self.hooks.read().await;
        let mut names: Vec<HookName> = hooks.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry").finish_non_exhaustive()
    }
}
