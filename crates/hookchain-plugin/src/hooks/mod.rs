//! Hook system: names, argument sets, hook functions, registry, dispatcher.

pub mod args;
pub mod definitions;
pub mod dispatcher;
pub mod function;
pub mod registry;

pub use args::HookArgs;
pub use definitions::HookName;
pub use dispatcher::{HookedFn, call_hooks};
pub use function::{FnHook, HookFunction, HookFuture, Next, Original, hook_fn};
pub use registry::{HookChain, HookRegistry};
