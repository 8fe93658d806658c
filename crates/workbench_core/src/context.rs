//! Named boolean flags published to the whole application.

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use tracing::debug;

/// Registry of named boolean flags. A component binds a key once and
/// flips it; any other part of the application can query the flag by
/// name (menu enablement, conditional actions).
#[derive(Clone, Default)]
pub struct ContextKeyRegistry {
    flags: Arc<RwLock<HashMap<String, bool>>>,
}

impl ContextKeyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name`, creating the flag as `false` if it does not exist
    /// yet, and returns the handle that sets it. Binding an existing
    /// name does not reset its value.
    pub fn bind(&self, name: impl Into<String>) -> ContextKey {
        let name = name.into();
        self.flags.write().entry(name.clone()).or_insert(false);
        ContextKey {
            name,
            flags: Arc::clone(&self.flags),
        }
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags.read().get(name).copied().unwrap_or(false)
    }
}

/// Handle to one named flag, obtained from [`ContextKeyRegistry::bind`].
pub struct ContextKey {
    name: String,
    flags: Arc<RwLock<HashMap<String, bool>>>,
}

impl ContextKey {
    pub fn set(&self, value: bool) {
        let previous = self.flags.write().insert(self.name.clone(), value);
        if previous != Some(value) {
            debug!(key = %self.name, value, "context flag changed");
        }
    }

    pub fn get(&self) -> bool {
        self.flags.read().get(&self.name).copied().unwrap_or(false)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
#[path = "tests/context_tests.rs"]
mod tests;
