//! # hookchain-plugin
//!
//! Hook framework for Hookchain. Provides:
//!
//! - Named hook registry with append-only, registration-ordered lists
//! - Dispatch wrapper building a fresh continuation chain per call, so
//!   hooks can continue, bypass to the original, short-circuit, or replay
//! - Plugin lifecycle management (load, start, stop) registering hooks
//!   into an injected registry

pub mod hooks;
pub mod macros;
pub mod manager;
pub mod prelude;
pub mod registry;

pub use hooks::args::HookArgs;
pub use hooks::definitions::HookName;
pub use hooks::dispatcher::{HookedFn, call_hooks};
pub use hooks::function::{HookFunction, Next, Original, hook_fn};
pub use hooks::registry::HookRegistry;
pub use manager::PluginManager;
pub use registry::{HookBinding, Plugin, PluginInfo, PluginRegistry};
