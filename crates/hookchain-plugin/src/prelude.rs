//! Prelude for convenient imports.

pub use async_trait::async_trait;

pub use hookchain_core::error::AppError;
pub use hookchain_core::result::AppResult;

pub use crate::hooks::args::HookArgs;
pub use crate::hooks::definitions::HookName;
pub use crate::hooks::dispatcher::{HookedFn, call_hooks};
pub use crate::hooks::function::{HookFunction, Next, Original, hook_fn};
pub use crate::hooks::registry::HookRegistry;
pub use crate::registry::{HookBinding, Plugin, PluginInfo};

pub use crate::{hook_args, plugin_info};
