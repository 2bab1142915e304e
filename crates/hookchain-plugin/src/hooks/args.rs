//! Structured argument set passed through a hook chain.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use hookchain_core::error::AppError;
use hookchain_core::result::AppResult;

/// Positional and named arguments for a wrapped function.
///
/// Every stage of a chain receives the argument set by value. A hook that
/// wants the next stage to see different arguments mutates (or rebuilds)
/// the set and passes it to its continuation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HookArgs {
    /// Positional arguments, in call order.
    #[serde(default)]
    pub positional: Vec<Value>,
    /// Named arguments.
    #[serde(default)]
    pub named: Map<String, Value>,
}

impl HookArgs {
    /// Creates an empty argument set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a positional argument.
    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Inserts a named argument.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.named.insert(key.to_string(), value.into());
        self
    }

    /// Inserts or replaces a named argument, returning the previous value.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Option<Value> {
        self.named.insert(key.to_string(), value.into())
    }

    /// Appends a positional argument in place.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    /// Removes a named argument.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.named.remove(key)
    }

    /// Gets a positional argument.
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Gets a named argument.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.named.get(key)
    }

    /// Gets a named string argument.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.named.get(key).and_then(|v| v.as_str())
    }

    /// Gets a named i64 argument.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.named.get(key).and_then(|v| v.as_i64())
    }

    /// Gets a named f64 argument. Integers are widened.
    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.named.get(key).and_then(|v| v.as_f64())
    }

    /// Gets a named bool argument.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.named.get(key).and_then(|v| v.as_bool())
    }

    /// Deserializes a required named argument into `T`.
    ///
    /// A missing key is a validation error; a value of the wrong shape is a
    /// serialization error.
    pub fn parse<T: DeserializeOwned>(&self, key: &str) -> AppResult<T> {
        let value = self
            .named
            .get(key)
            .ok_or_else(|| AppError::validation(format!("Missing argument '{key}'")))?;

        serde_json::from_value(value.clone()).map_err(|e| {
            AppError::with_source(
                hookchain_core::ErrorKind::Serialization,
                format!("Argument '{key}' has the wrong shape: {e}"),
                e,
            )
        })
    }

    /// Returns the positional arguments.
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Returns the named arguments.
    pub fn named(&self) -> &Map<String, Value> {
        &self.named
    }

    /// Total number of arguments (positional plus named).
    pub fn len(&self) -> usize {
        self.positional.len() + self.named.len()
    }

    /// Returns whether no arguments are present.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}
