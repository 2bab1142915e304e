//! Hook names: the string keys identifying extension points.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of an extension point, namespaced by convention
/// (`"checkout.process"`, `"users.listing"`).
///
/// Names are opaque: any string is accepted, including the empty string.
/// Cloning is cheap, so a name can be captured by every wrapper and
/// registry entry that needs it.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookName(Arc<str>);

impl HookName {
    /// Creates a hook name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(Arc::from(name.into()))
    }

    /// Returns the string form of this name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the namespace part (everything before the last `.`), if any.
    pub fn namespace(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(ns, _)| ns)
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HookName({:?})", &*self.0)
    }
}

impl From<&str> for HookName {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl From<String> for HookName {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&HookName> for HookName {
    fn from(name: &HookName) -> Self {
        name.clone()
    }
}

impl Borrow<str> for HookName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HookName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for HookName {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HookName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
