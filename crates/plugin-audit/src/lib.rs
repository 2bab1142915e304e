//! Audit plugin for Hookchain.
//!
//! Attaches a pass-through hook to a configurable set of hook names. Each
//! call through one of those hooks is logged before and after the rest of
//! the chain runs, and recorded in an in-memory [`AuditTrail`].

pub mod hook;
pub mod plugin;
pub mod trail;

pub use hook::AuditHook;
pub use plugin::AuditPlugin;
pub use trail::{AuditPhase, AuditRecord, AuditTrail};
