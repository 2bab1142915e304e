//! Hook dispatcher: wraps a core function so plugins can intercept it.
//!
//! A [`HookedFn`] is built once per core function. Each call:
//!
//! 1. Looks up the hooks registered for its name *at call time*, so hooks
//!    registered after the wrapper was built still take effect.
//! 2. With no hooks, calls the original directly.
//! 3. Otherwise runs hook 0 with a continuation to hook 1, and so on; the
//!    continuation after the last hook calls the original.
//!
//! Hook errors are neither caught nor logged here.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use hookchain_core::result::AppResult;

use super::args::HookArgs;
use super::definitions::HookName;
use super::function::{Chain, Original};
use super::registry::HookRegistry;

/// A core function wrapped with the hook chain for one hook name.
///
/// Cloning is cheap; clones share the registry and the original.
#[derive(Clone)]
pub struct HookedFn {
    /// Hook name this wrapper dispatches on.
    name: HookName,
    /// The undecorated core function.
    original: Original,
    /// Registry consulted on every call.
    registry: Arc<HookRegistry>,
}

impl HookedFn {
    /// Wraps `original` so that calls run through the hooks for `name`.
    pub fn new(registry: Arc<HookRegistry>, name: impl Into<HookName>, original: Original) -> Self {
        Self {
            name: name.into(),
            original,
            registry,
        }
    }

    /// Invokes the wrapped function.
    pub async fn call(&self, args: HookArgs) -> AppResult<Value> {
        let hooks = self.registry.lookup(self.name.as_str()).await;

        if hooks.is_empty() {
            return self.original.call(args).await;
        }

        debug!(
            hook = %self.name,
            hook_count = hooks.len(),
            "Dispatching through hook chain"
        );

        let chain = Arc::new(Chain {
            name: self.name.clone(),
            hooks,
            original: self.original.clone(),
        });

        chain.call_at(0, args).await
    }

    /// Invokes the wrapped function and deserializes the result into `T`.
    pub async fn call_as<T: DeserializeOwned>(&self, args: HookArgs) -> AppResult<T> {
        let value = self.call(args).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Returns the hook name.
    pub fn name(&self) -> &HookName {
        &self.name
    }

    /// Returns the undecorated function, for callers that must skip all hooks.
    pub fn original(&self) -> &Original {
        &self.original
    }
}

impl fmt::Debug for HookedFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookedFn")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Wraps an async core function with the hook chain for `name`.
///
/// ```rust,ignore
/// let process = call_hooks(registry.clone(), "checkout.process", |args| async move {
///     Ok(json!(args.get_f64("price").unwrap_or_default()))
/// });
/// let total = process.call(hook_args! { "price" => 100 }).await?;
/// ```
pub fn call_hooks<F, Fut>(
    registry: Arc<HookRegistry>,
    name: impl Into<HookName>,
    func: F,
) -> HookedFn
where
    F: Fn(HookArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Value>> + Send + 'static,
{
    HookedFn::new(registry, name, Original::new(func))
}
