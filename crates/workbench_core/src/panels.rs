//! Panel bookkeeping for the desktop shell.

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use tracing::debug;

use crate::views::{ViewError, ViewId, ViewService};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    pub visible: bool,
    pub focused: bool,
}

/// Which panels exist, which are visible, and which one holds focus.
/// Focus is exclusive across panels.
#[derive(Clone, Default)]
pub struct PanelRegistry {
    panels: Arc<RwLock<HashMap<ViewId, PanelState>>>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `view` as a known panel, hidden and unfocused.
    /// Registering an existing panel keeps its current state.
    pub fn register(&self, view: ViewId) {
        self.panels.write().entry(view).or_default();
    }

    pub fn state(&self, view: ViewId) -> Option<PanelState> {
        self.panels.read().get(&view).copied()
    }

    pub fn is_visible(&self, view: ViewId) -> bool {
        self.state(view).map(|state| state.visible).unwrap_or(false)
    }

    pub fn focused_view(&self) -> Option<ViewId> {
        self.panels
            .read()
            .iter()
            .find(|(_, state)| state.focused)
            .map(|(view, _)| *view)
    }
}

impl ViewService for PanelRegistry {
    fn open_view(&self, view: ViewId, focus: bool) -> Result<(), ViewError> {
        let mut panels = self.panels.write();
        if !panels.contains_key(&view) {
            return Err(ViewError::UnknownView(view));
        }

        if focus {
            for state in panels.values_mut() {
                state.focused = false;
            }
        }
        if let Some(state) = panels.get_mut(&view) {
            state.visible = true;
            if focus {
                state.focused = true;
            }
        }
        debug!(view = %view, focus, "panel revealed");
        Ok(())
    }

    fn close_view(&self, view: ViewId) -> Result<(), ViewError> {
        let mut panels = self.panels.write();
        match panels.get_mut(&view) {
            Some(state) => {
                state.visible = false;
                state.focused = false;
                debug!(view = %view, "panel hidden");
                Ok(())
            }
            None => Err(ViewError::UnknownView(view)),
        }
    }
}

#[cfg(test)]
#[path = "tests/panels_tests.rs"]
mod tests;
