//! Application context values.
//!
//! Context is a flat set of string key/value pairs that parameterise a
//! deployment. Values are layered:
//!
//! 1. The `context` object of `cdk.json` in the project root
//! 2. `--context KEY=VALUE` arguments (override the file)

pub mod loader;

pub use loader::{load_context, parse_context_pair, CONTEXT_FILE};

use std::collections::BTreeMap;

/// Context key/value store.
///
/// # Example
///
/// ```
/// use devops_agent::context::AppContext;
///
/// let mut ctx = AppContext::new();
/// ctx.set("environment", "prod");
/// assert_eq!(ctx.try_get("environment"), Some("prod"));
/// assert_eq!(ctx.try_get("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppContext {
    values: BTreeMap<String, String>,
}

impl AppContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a context value.
    pub fn try_get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a value, replacing any previous one.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Overlay `other` on top of this context.
    pub fn merge(&mut self, other: AppContext) {
        self.values.extend(other.values);
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AppContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
