//! Hook functions and the continuations handed to them.
//!
//! A hook receives three things: a [`Next`] continuation running the rest of
//! the chain, the [`Original`] undecorated core function, and the current
//! [`HookArgs`]. From there it may:
//!
//! - **continue**: `next.call(args).await`, optionally with modified args and
//!   post-processing of the result;
//! - **bypass**: `original.call(args).await`, skipping every remaining hook;
//! - **short-circuit**: return its own value without calling either;
//! - **replay**: call `next` any number of times.
//!
//! Errors returned by a hook are never caught; they reach the caller of the
//! wrapped function unchanged.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;

use hookchain_core::result::AppResult;

use super::args::HookArgs;
use super::definitions::HookName;

/// Future returned by core functions and continuations.
pub type HookFuture = BoxFuture<'static, AppResult<Value>>;

type CoreFn = dyn Fn(HookArgs) -> HookFuture + Send + Sync;

/// Trait implemented by plugin-supplied hook functions.
#[async_trait]
pub trait HookFunction: Send + Sync {
    /// Plugin that owns this hook. Used for log fields only.
    fn plugin_id(&self) -> &str {
        "anonymous"
    }

    /// Runs the hook.
    async fn call(&self, next: Next, original: Original, args: HookArgs) -> AppResult<Value>;
}

/// Handle to the undecorated core function.
///
/// Captured once when the wrapper is built and shared by every dispatch.
#[derive(Clone)]
pub struct Original {
    func: Arc<CoreFn>,
}

impl Original {
    /// Wraps an async function as the original of a hooked function.
    pub fn new<F, Fut>(func: F) -> Self
    where
        F: Fn(HookArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<Value>> + Send + 'static,
    {
        Self {
            func: Arc::new(move |args| -> HookFuture { Box::pin(func(args)) }),
        }
    }

    /// Invokes the core function directly, bypassing all hooks.
    pub fn call(&self, args: HookArgs) -> HookFuture {
        (self.func)(args)
    }
}

impl fmt::Debug for Original {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Original").finish_non_exhaustive()
    }
}

/// Snapshot of the hooks for one dispatch plus the original they end in.
pub(crate) struct Chain {
    pub(crate) name: HookName,
    pub(crate) hooks: Arc<[Arc<dyn HookFunction>]>,
    pub(crate) original: Original,
}

impl Chain {
    /// Runs the chain from `index`: hook `index` if present, else the original.
    pub(crate) fn call_at(self: Arc<Self>, index: usize, args: HookArgs) -> HookFuture {
        let Some(hook) = self.hooks.get(index).cloned() else {
            return self.original.call(args);
        };

        let original = self.original.clone();
        let next = Next {
            chain: self,
            index: index + 1,
        };

        Box::pin(async move { hook.call(next, original, args).await })
    }
}

/// Continuation representing "the rest of the chain".
///
/// Calling it runs the next registered hook, or the original function when
/// the calling hook was the last one. It can be cloned and called repeatedly.
#[derive(Clone)]
pub struct Next {
    chain: Arc<Chain>,
    index: usize,
}

impl Next {
    /// Advances the chain with the given arguments.
    pub fn call(&self, args: HookArgs) -> HookFuture {
        self.chain.clone().call_at(self.index, args)
    }

    /// Name of the hook point this continuation belongs to.
    pub fn hook_name(&self) -> &HookName {
        &self.chain.name
    }

    /// Number of hooks still ahead of this continuation.
    pub fn remaining(&self) -> usize {
        self.chain.hooks.len().saturating_sub(self.index)
    }
}

impl fmt::Debug for Next {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("hook", &self.chain.name)
            .field("index", &self.index)
            .field("remaining", &self.remaining())
            .finish()
    }
}

/// Hook function backed by an async closure. Built by [`hook_fn`].
pub struct FnHook<F> {
    plugin_id: String,
    func: F,
}

#[async_trait]
impl<F, Fut> HookFunction for FnHook<F>
where
    F: Fn(Next, Original, HookArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Value>> + Send + 'static,
{
    fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    async fn call(&self, next: Next, original: Original, args: HookArgs) -> AppResult<Value> {
        (self.func)(next, original, args).await
    }
}

/// Adapts an async closure into a shareable hook function.
///
/// ```rust,ignore
/// let hook = hook_fn("discount", |next, _original, mut args| async move {
///     let price = args.get_f64("price").unwrap_or_default();
///     args.set("price", price * 0.9);
///     next.call(args).await
/// });
/// ```
pub fn hook_fn<F, Fut>(plugin_id: impl Into<String>, func: F) -> Arc<dyn HookFunction>
where
    F: Fn(Next, Original, HookArgs) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = AppResult<Value>> + Send + 'static,
{
    Arc::new(FnHook {
        plugin_id: plugin_id.into(),
        func,
    })
}
