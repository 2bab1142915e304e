//! # hookchain-core
//!
//! Core crate for Hookchain. Contains the configuration schema, the
//! unified error system, and the result alias shared by every other crate.
//!
//! This crate has **no** internal dependencies on other Hookchain crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
