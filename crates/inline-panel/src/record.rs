//! Child records and their controls.
//!
//! A [`ChildRecord`] is the controller's in-memory handle for one child
//! widget. Records are created by the [`RecordFactory`](crate::factory::RecordFactory)
//! and never destroyed; deleting one only flips its `deleted` flag so the
//! delete intent is submitted with the parent form.

use inline_panel_core::{Property, ReadOnlyProperty};
use slotmap::new_key_type;

new_key_type! {
    /// Stable handle for a child record within one panel.
    pub struct RecordId;
}

/// The per-record controls the controller binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChildControl {
    /// Soft-deletes the record.
    Delete,
    /// Moves the record before its previous active sibling.
    MoveUp,
    /// Moves the record after its next active sibling.
    MoveDown,
}

/// A clickable control: bound once its handler is attached, enabled unless a
/// refresh disabled it.
#[derive(Debug, Clone)]
pub struct Control {
    bound: bool,
    enabled: Property<bool>,
}

impl Control {
    pub(crate) fn new() -> Self {
        Self {
            bound: false,
            enabled: Property::new(true),
        }
    }

    /// Whether a handler is attached.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Whether the control is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Whether clicking the control would do anything.
    pub fn is_clickable(&self) -> bool {
        self.bound && self.is_enabled()
    }

    pub(crate) fn bind(&mut self) {
        self.bound = true;
    }

    /// Returns `true` if the enabled state changed.
    pub(crate) fn set_enabled(&self, enabled: bool) -> bool {
        self.enabled.set(enabled)
    }
}

impl Default for Control {
    fn default() -> Self {
        Self::new()
    }
}

/// One child widget of the panel.
#[derive(Debug)]
pub struct ChildRecord {
    id: RecordId,
    prefix: String,
    deleted: bool,
    visible: bool,
    order: Option<i64>,
    ordinal: Property<Option<usize>>,
    error_messages: Vec<String>,
    panels: Vec<String>,
    delete_control: Control,
    move_up_control: Control,
    move_down_control: Control,
}

impl ChildRecord {
    pub(crate) fn new(
        id: RecordId,
        prefix: String,
        error_messages: Vec<String>,
        panels: Vec<String>,
    ) -> Self {
        Self {
            id,
            prefix,
            deleted: false,
            visible: true,
            order: None,
            ordinal: Property::new(None),
            error_messages,
            panels,
            delete_control: Control::new(),
            move_up_control: Control::new(),
            move_down_control: Control::new(),
        }
    }

    /// The record's handle.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// The prefix addressing this record's form fields.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Whether the record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Whether the record is active (not deleted).
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    /// Whether the record is shown. Deleted records are hidden once their
    /// collapse completes.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The order value, when ordering is enabled and a value is known.
    pub fn order(&self) -> Option<i64> {
        self.order
    }

    /// The 1-based position among active records, as last refreshed.
    pub fn ordinal(&self) -> Option<usize> {
        self.ordinal.get()
    }

    /// Read-only view of the ordinal for observers.
    pub fn ordinal_property(&self) -> ReadOnlyProperty<'_, Option<usize>> {
        self.ordinal.read_only()
    }

    /// The count text shown next to the record heading, e.g. `" 2"`.
    pub fn ordinal_label(&self) -> String {
        self.ordinal().map(|n| format!(" {n}")).unwrap_or_default()
    }

    /// Validation messages attached to this record.
    pub fn error_messages(&self) -> &[String] {
        &self.error_messages
    }

    /// Ids of nested disclosure regions.
    pub fn panels(&self) -> &[String] {
        &self.panels
    }

    /// Access one of the record's controls.
    pub fn control(&self, control: ChildControl) -> &Control {
        match control {
            ChildControl::Delete => &self.delete_control,
            ChildControl::MoveUp => &self.move_up_control,
            ChildControl::MoveDown => &self.move_down_control,
        }
    }

    pub(crate) fn control_mut(&mut self, control: ChildControl) -> &mut Control {
        match control {
            ChildControl::Delete => &mut self.delete_control,
            ChildControl::MoveUp => &mut self.move_up_control,
            ChildControl::MoveDown => &mut self.move_down_control,
        }
    }

    pub(crate) fn set_order(&mut self, order: Option<i64>) {
        self.order = order;
    }

    /// Returns `true` if the ordinal changed.
    pub(crate) fn set_ordinal(&self, ordinal: usize) -> bool {
        self.ordinal.set(Some(ordinal))
    }

    /// Flag the record deleted and disable its controls. Returns `false` if it
    /// already was.
    pub(crate) fn mark_deleted(&mut self) -> bool {
        if self.deleted {
            return false;
        }
        self.deleted = true;
        for control in [ChildControl::Delete, ChildControl::MoveUp, ChildControl::MoveDown] {
            self.control(control).set_enabled(false);
        }
        true
    }

    pub(crate) fn hide(&mut self) {
        self.visible = false;
    }

    pub(crate) fn clear_errors(&mut self) {
        self.error_messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn record(prefix: &str) -> ChildRecord {
        let mut ids: SlotMap<RecordId, ()> = SlotMap::with_key();
        ChildRecord::new(ids.insert(()), prefix.into(), vec!["Required".into()], vec![])
    }

    #[test]
    fn test_new_record_is_active_and_visible() {
        let record = record("items-0");
        assert!(record.is_active());
        assert!(record.is_visible());
        assert_eq!(record.ordinal(), None);
        assert_eq!(record.ordinal_label(), "");
        assert!(!record.control(ChildControl::Delete).is_bound());
    }

    #[test]
    fn test_mark_deleted_is_monotonic() {
        let mut record = record("items-0");
        record.control_mut(ChildControl::Delete).bind();

        assert!(record.mark_deleted());
        assert!(!record.mark_deleted());
        assert!(record.is_deleted());
        assert!(!record.control(ChildControl::Delete).is_clickable());
        assert!(!record.control(ChildControl::MoveUp).is_enabled());
    }

    #[test]
    fn test_ordinal_label() {
        let record = record("items-0");
        assert!(record.set_ordinal(2));
        assert!(!record.set_ordinal(2));
        assert_eq!(record.ordinal_label(), " 2");
        assert_eq!(record.ordinal_property().get(), Some(2));
    }

    #[test]
    fn test_clear_errors() {
        let mut record = record("items-0");
        assert_eq!(record.error_messages().len(), 1);
        record.clear_errors();
        assert!(record.error_messages().is_empty());
    }
}
