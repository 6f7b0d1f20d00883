//! Expand/collapse behaviour for nested disclosure regions.
//!
//! Each new child may contain collapsible sections. The controller hands
//! their ids to a [`PanelToggle`] once, right after the child is created.

use std::collections::HashMap;

use inline_panel_core::Signal;
use inline_panel_core::logging::targets;

/// Activates expand/collapse behaviour on a child's nested disclosures.
///
/// `activate` must be idempotent.
pub trait PanelToggle {
    /// Activate the disclosures found under `root`.
    fn activate(&mut self, root: &str, panels: &[String]);
}

/// A [`PanelToggle`] that tracks the expanded state of every activated
/// disclosure. Newly activated disclosures start expanded.
#[derive(Debug, Default)]
pub struct CollapsiblePanels {
    expanded: HashMap<String, bool>,
    /// Emitted with `(panel id, expanded)` whenever a disclosure toggles.
    pub toggled: Signal<(String, bool)>,
}

impl CollapsiblePanels {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a disclosure has been activated.
    pub fn is_active(&self, panel: &str) -> bool {
        self.expanded.contains_key(panel)
    }

    /// Whether a disclosure is expanded. Unknown disclosures report `None`.
    pub fn is_expanded(&self, panel: &str) -> Option<bool> {
        self.expanded.get(panel).copied()
    }

    /// Flip a disclosure. Returns the new state, or `None` if it was never
    /// activated.
    pub fn toggle(&mut self, panel: &str) -> Option<bool> {
        let expanded = self.expanded.get_mut(panel)?;
        *expanded = !*expanded;
        let state = *expanded;
        self.toggled.emit((panel.to_string(), state));
        Some(state)
    }

    /// Number of activated disclosures.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    /// Whether nothing has been activated.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}

impl PanelToggle for CollapsiblePanels {
    fn activate(&mut self, root: &str, panels: &[String]) {
        tracing::trace!(target: targets::RECORD, root, count = panels.len(), "activating disclosures");
        for panel in panels {
            self.expanded.entry(panel.clone()).or_insert(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_is_idempotent() {
        let mut panels = CollapsiblePanels::new();
        let ids = vec!["a".to_string(), "b".to_string()];

        panels.activate("inline_child_x", &ids);
        assert_eq!(panels.toggle("a"), Some(false));
        panels.activate("inline_child_x", &ids);

        assert_eq!(panels.len(), 2);
        assert_eq!(panels.is_expanded("a"), Some(false));
        assert_eq!(panels.is_expanded("b"), Some(true));
    }

    #[test]
    fn test_toggle_unknown_panel() {
        let mut panels = CollapsiblePanels::new();
        assert!(panels.is_empty());
        assert_eq!(panels.toggle("missing"), None);
        assert!(!panels.is_active("missing"));
    }
}
