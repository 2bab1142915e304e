//! # hookchain
//!
//! Application wiring: configuration, logging, the hook registry, the
//! compiled-in plugins, and the core functions they can intercept.

pub mod app;
pub mod checkout;
pub mod logging;
pub mod users;

pub use app::App;
