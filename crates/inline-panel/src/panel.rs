//! The inline panel controller.
//!
//! [`InlinePanel`] owns the ordered collection of child records of one parent
//! form and keeps three things consistent with each other after every
//! operation:
//!
//! - the record sequence (the on-page arrangement, deleted records included);
//! - the persisted per-record fields (`{prefix}-DELETE`, `{prefix}-ORDER`);
//! - the derived UI state: ordinal labels, move button enablement and the add
//!   affordance.
//!
//! # Example
//!
//! ```
//! use inline_panel::prelude::*;
//!
//! let config = PanelConfig::new(
//!     PanelOptions::new("items").with_can_order(true).with_max_forms(3),
//! )
//! .unwrap();
//! let factory = TemplateFactory::new(&config, RecordTemplate::new());
//! let mut panel = InlinePanel::new(
//!     config,
//!     FormFields::new(),
//!     Vec::new(),
//!     factory,
//!     CollapsiblePanels::new(),
//! )
//! .unwrap();
//!
//! let a = panel.add_record().unwrap();
//! let b = panel.add_record().unwrap();
//! panel.move_up(b).unwrap();
//!
//! let order: Vec<_> = panel.active_records().map(|r| r.prefix()).collect();
//! assert_eq!(order, ["items-1", "items-0"]);
//! assert_eq!(panel.record(a).unwrap().ordinal(), Some(2));
//! ```

use std::collections::HashMap;
use std::time::Instant;

use inline_panel_core::logging::{span_names, targets};
use inline_panel_core::{PerfSpan, Signal};
use slotmap::SlotMap;

use crate::animation::{AnimationKind, AnimationQueue, AnimationState, SwapEffect};
use crate::config::PanelConfig;
use crate::error::{PanelError, Result};
use crate::factory::RecordFactory;
use crate::form::{DELETED_MARKER, FormFields, names};
use crate::panels::PanelToggle;
use crate::record::{ChildControl, ChildRecord, Control, RecordId};
use crate::reorder::{self, Direction, MovePlan};

/// A record already present in the page when the panel starts, e.g. when a
/// form is redisplayed after a validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingRecord {
    /// Prefix addressing the record's fields.
    pub prefix: String,
    /// Validation messages rendered with the record.
    pub error_messages: Vec<String>,
    /// Ids of nested disclosure regions.
    pub panels: Vec<String>,
}

impl ExistingRecord {
    /// An existing record with no errors and no disclosures.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Default::default()
        }
    }

    /// Attach a validation message using builder pattern.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_messages.push(message.into());
        self
    }

    /// Attach a disclosure region using builder pattern.
    pub fn with_panel(mut self, id: impl Into<String>) -> Self {
        self.panels.push(id.into());
        self
    }
}

/// Controller for an ordered, editable collection of child records.
///
/// # Signals
///
/// - `record_added(RecordId)`: after a record was added and initialized
/// - `record_deleted(RecordId)`: when a record is soft-deleted
/// - `record_moved(MovePlan)`: after a move was applied
/// - `add_enabled_changed(bool)`: when the add affordance toggles
/// - `swap_started(SwapEffect)`: when a move starts its swap animation
pub struct InlinePanel<F, P> {
    config: PanelConfig,
    form: FormFields,
    factory: F,
    panel_toggle: P,

    records: SlotMap<RecordId, ChildRecord>,
    prefixes: HashMap<String, RecordId>,
    /// On-page order of every record, deleted ones included.
    sequence: Vec<RecordId>,

    add_control: Control,
    animations: AnimationQueue,

    /// Signal emitted after a record was added.
    pub record_added: Signal<RecordId>,
    /// Signal emitted when a record is soft-deleted.
    pub record_deleted: Signal<RecordId>,
    /// Signal emitted after a move was applied.
    pub record_moved: Signal<MovePlan>,
    /// Signal emitted when the add affordance is enabled or disabled.
    pub add_enabled_changed: Signal<bool>,
    /// Signal emitted when a swap animation starts.
    pub swap_started: Signal<SwapEffect>,
}

impl<F: RecordFactory, P: PanelToggle> InlinePanel<F, P> {
    /// Create a panel over the given form state.
    ///
    /// Every record in `existing` is initialized in order, exactly as a newly
    /// added record would be (minus the order assignment, which the page
    /// already rendered). Records whose delete flag is already set are hidden
    /// and their error messages dropped.
    pub fn new(
        config: PanelConfig,
        form: FormFields,
        existing: impl IntoIterator<Item = ExistingRecord>,
        factory: F,
        panel_toggle: P,
    ) -> Result<Self> {
        let mut add_control = Control::new();
        add_control.bind();

        let mut panel = Self {
            config,
            form,
            factory,
            panel_toggle,
            records: SlotMap::with_key(),
            prefixes: HashMap::new(),
            sequence: Vec::new(),
            add_control,
            animations: AnimationQueue::new(),
            record_added: Signal::new(),
            record_deleted: Signal::new(),
            record_moved: Signal::new(),
            add_enabled_changed: Signal::new(),
            swap_started: Signal::new(),
        };

        for record in existing {
            let id = panel.register(record.prefix, record.error_messages, record.panels)?;
            panel.initialize(id)?;
        }
        panel.sync_total_forms();
        panel.refresh();

        tracing::debug!(
            target: targets::PANEL,
            formset = panel.config.formset_prefix(),
            records = panel.len(),
            active = panel.active_count(),
            "inline panel started"
        );
        Ok(panel)
    }

    // =========================================================================
    // Record Lifecycle
    // =========================================================================

    /// Add a new record at the end of the collection.
    ///
    /// Fails with [`PanelError::AtCapacity`] when the panel already holds
    /// `max_forms` active records; the add affordance is disabled in that
    /// state, so [`click_add`](Self::click_add) never gets here.
    pub fn add_record(&mut self) -> Result<RecordId> {
        if let Some(max) = self.config.max_forms() {
            if self.active_count() >= max {
                return Err(PanelError::AtCapacity { max });
            }
        }

        // The factory writes into a staged copy; a rejected record leaves the
        // submitted form untouched.
        let mut staged = self.form.clone();
        let created = self.factory.create(&mut staged);
        let id = self.register(created.prefix, Vec::new(), created.panels)?;
        self.form = staged;
        self.initialize(id)?;

        if self.config.can_order() {
            // The creation index counts every form ever created, so index + 1
            // exceeds every order value handed out before.
            let order = created.index as i64 + 1;
            let record = &mut self.records[id];
            record.set_order(Some(order));
            self.form
                .set(names::order_field(record.prefix()), order.to_string());
        }

        self.refresh();

        let record = &self.records[id];
        self.panel_toggle
            .activate(&names::child_element_id(record.prefix()), record.panels());

        tracing::debug!(
            target: targets::PANEL,
            prefix = record.prefix(),
            index = created.index,
            order = ?record.order(),
            "record added"
        );
        self.record_added.emit(id);
        if let Some(hook) = self.config.on_add() {
            hook(id);
        }
        Ok(id)
    }

    /// Soft-delete a record.
    ///
    /// Writes the delete marker into the record's delete field and starts the
    /// collapse animation. Labels, move buttons and the add affordance are
    /// refreshed once the collapse completes (immediately when the collapse
    /// duration is zero). Returns `false` if the record was already deleted.
    pub fn delete_record(&mut self, id: RecordId) -> Result<bool> {
        let record = self
            .records
            .get_mut(id)
            .ok_or(PanelError::UnknownRecord(id))?;
        if !record.mark_deleted() {
            tracing::trace!(target: targets::PANEL, prefix = record.prefix(), "record already deleted");
            return Ok(false);
        }
        self.form
            .set(names::delete_field(record.prefix()), DELETED_MARKER);
        tracing::debug!(target: targets::PANEL, prefix = record.prefix(), "record deleted");

        let duration = self.config.collapse_duration();
        if duration.is_zero() {
            self.complete(vec![AnimationKind::Collapse(id)]);
        } else {
            self.animations
                .start(AnimationKind::Collapse(id), duration, Instant::now());
        }

        self.record_deleted.emit(id);
        Ok(true)
    }

    /// Move a record before its previous active sibling.
    ///
    /// Returns `false` when the record is already first among active records
    /// (or is itself deleted).
    pub fn move_up(&mut self, id: RecordId) -> Result<bool> {
        self.move_record(id, Direction::Up)
    }

    /// Move a record after its next active sibling.
    ///
    /// Returns `false` when the record is already last among active records
    /// (or is itself deleted).
    pub fn move_down(&mut self, id: RecordId) -> Result<bool> {
        self.move_record(id, Direction::Down)
    }

    fn move_record(&mut self, id: RecordId, direction: Direction) -> Result<bool> {
        if !self.config.can_order() {
            return Err(PanelError::OrderingDisabled);
        }
        if !self.records.contains_key(id) {
            return Err(PanelError::UnknownRecord(id));
        }

        let records = &self.records;
        let is_active = |rid: RecordId| records.get(rid).is_some_and(ChildRecord::is_active);
        let Some(plan) = reorder::plan_move(&self.sequence, is_active, id, direction) else {
            tracing::trace!(target: targets::REORDER, ?direction, "no active neighbour, move ignored");
            return Ok(false);
        };

        let effect = SwapEffect {
            record: plan.record,
            neighbor: plan.neighbor,
            from: plan.visible_from,
            to: plan.visible_to,
        };
        let duration = self.config.swap_duration();
        if !duration.is_zero() {
            self.animations
                .start(AnimationKind::Swap(effect), duration, Instant::now());
        }
        self.swap_started.emit(effect);

        plan.apply(&mut self.sequence);
        self.swap_orders(plan.record, plan.neighbor);

        tracing::debug!(
            target: targets::REORDER,
            ?direction,
            from = plan.visible_from,
            to = plan.visible_to,
            "record moved"
        );

        self.refresh_ordinal_labels();
        self.refresh_move_button_states();
        self.record_moved.emit(plan);
        Ok(true)
    }

    /// Exchange the order values of two records, in memory and in the form.
    fn swap_orders(&mut self, a: RecordId, b: RecordId) {
        let order_a = self.records[a].order();
        let order_b = self.records[b].order();
        for (id, order) in [(a, order_b), (b, order_a)] {
            let record = &mut self.records[id];
            record.set_order(order);
            let value = order.map(|o| o.to_string()).unwrap_or_default();
            self.form.set(names::order_field(record.prefix()), value);
        }
    }

    /// Track a new record at the end of the sequence.
    fn register(
        &mut self,
        prefix: String,
        error_messages: Vec<String>,
        panels: Vec<String>,
    ) -> Result<RecordId> {
        if self.prefixes.contains_key(&prefix) {
            tracing::warn!(target: targets::RECORD, %prefix, "factory reused a record prefix");
            return Err(PanelError::DuplicatePrefix(prefix));
        }
        let id = self.records.insert_with_key(|id| {
            ChildRecord::new(id, prefix.clone(), error_messages, panels)
        });
        self.prefixes.insert(prefix, id);
        self.sequence.push(id);
        Ok(id)
    }

    /// Raise `TOTAL_FORMS` to at least the number of known records, so the
    /// next creation index cannot collide with a rendered record.
    fn sync_total_forms(&mut self) {
        let field = names::total_forms_field(self.config.formset_prefix());
        let total = self
            .form
            .integer(&field)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        if total < self.len() {
            tracing::debug!(
                target: targets::RECORD,
                %field,
                from = total,
                to = self.len(),
                "form count raised"
            );
            self.form.set(field, self.len().to_string());
        }
    }

    /// Bind a record's controls and pick up its persisted state.
    fn initialize(&mut self, id: RecordId) -> Result<()> {
        let can_order = self.config.can_order();
        let record = self
            .records
            .get_mut(id)
            .ok_or(PanelError::UnknownRecord(id))?;

        record.control_mut(ChildControl::Delete).bind();
        if can_order {
            record.control_mut(ChildControl::MoveUp).bind();
            record.control_mut(ChildControl::MoveDown).bind();

            let field = names::order_field(record.prefix());
            let order = self.form.integer(&field);
            if order.is_none() && self.form.get(&field).is_some_and(|v| !v.trim().is_empty()) {
                tracing::warn!(target: targets::RECORD, %field, "unparseable order value ignored");
            }
            record.set_order(order);
        }

        if self.form.flag(&names::delete_field(record.prefix())) {
            record.mark_deleted();
            record.hide();
            record.clear_errors();
            tracing::debug!(
                target: targets::RECORD,
                prefix = record.prefix(),
                "record initialized as deleted"
            );
        } else {
            tracing::trace!(target: targets::RECORD, prefix = record.prefix(), "record initialized");
        }
        Ok(())
    }

    // =========================================================================
    // UI Gating
    // =========================================================================

    /// Handle a click on the add affordance.
    ///
    /// Does nothing and returns `None` while the affordance is disabled.
    pub fn click_add(&mut self) -> Result<Option<RecordId>> {
        if !self.add_control.is_clickable() {
            tracing::trace!(target: targets::PANEL, "add affordance disabled, click ignored");
            return Ok(None);
        }
        self.add_record().map(Some)
    }

    /// Handle a click on one of a record's controls.
    ///
    /// Unbound or disabled controls do nothing and return `false`.
    pub fn click(&mut self, id: RecordId, control: ChildControl) -> Result<bool> {
        let record = self.records.get(id).ok_or(PanelError::UnknownRecord(id))?;
        if !record.control(control).is_clickable() {
            tracing::trace!(target: targets::PANEL, ?control, "control not clickable");
            return Ok(false);
        }
        match control {
            ChildControl::Delete => self.delete_record(id),
            ChildControl::MoveUp => self.move_up(id),
            ChildControl::MoveDown => self.move_down(id),
        }
    }

    // =========================================================================
    // Refresh
    // =========================================================================

    /// Recompute labels, move buttons and the add affordance.
    pub fn refresh(&mut self) {
        let _span = PerfSpan::new(span_names::REFRESH);
        self.refresh_ordinal_labels();
        self.refresh_move_button_states();
        self.refresh_add_affordance();
    }

    /// Set every active record's ordinal to `1 + visible position`.
    pub fn refresh_ordinal_labels(&mut self) {
        for (position, record) in self.active_records().enumerate() {
            record.set_ordinal(position + 1);
        }
    }

    /// Disable "move up" on the first active record and "move down" on the
    /// last; enable everything in between. No-op without ordering.
    pub fn refresh_move_button_states(&mut self) {
        if !self.config.can_order() {
            return;
        }
        let last = self.active_count().saturating_sub(1);
        for (position, record) in self.active_records().enumerate() {
            record.control(ChildControl::MoveUp).set_enabled(position != 0);
            record.control(ChildControl::MoveDown).set_enabled(position != last);
        }
    }

    /// Disable the add affordance exactly when the record limit is reached.
    /// No-op without a limit.
    pub fn refresh_add_affordance(&mut self) {
        let Some(max) = self.config.max_forms() else {
            return;
        };
        let enabled = self.active_count() < max;
        if self.add_control.set_enabled(enabled) {
            tracing::debug!(target: targets::PANEL, enabled, "add affordance changed");
            self.add_enabled_changed.emit(enabled);
        }
    }

    // =========================================================================
    // Animations
    // =========================================================================

    /// Advance animations to the current time. Returns how many finished.
    pub fn tick(&mut self) -> usize {
        self.tick_at(Instant::now())
    }

    /// Advance animations to `now`. Returns how many finished.
    pub fn tick_at(&mut self, now: Instant) -> usize {
        let finished = self.animations.advance(now);
        self.complete(finished)
    }

    /// Complete every running animation immediately.
    pub fn finish_animations(&mut self) -> usize {
        let finished = self.animations.finish_all();
        self.complete(finished)
    }

    /// Whether any animation is running.
    pub fn is_animating(&self) -> bool {
        !self.animations.is_idle()
    }

    /// The on-screen animation state of a record at `now`.
    pub fn animation_state_at(&self, id: RecordId, now: Instant) -> AnimationState {
        self.animations.state_at(id, now)
    }

    fn complete(&mut self, finished: Vec<AnimationKind>) -> usize {
        let count = finished.len();
        let mut collapsed = false;
        for kind in finished {
            match kind {
                AnimationKind::Collapse(id) => {
                    if let Some(record) = self.records.get_mut(id) {
                        record.hide();
                        collapsed = true;
                    }
                }
                AnimationKind::Swap(effect) => {
                    tracing::trace!(target: targets::ANIMATION, ?effect, "swap finished");
                }
            }
        }
        if collapsed {
            self.refresh();
        }
        count
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The panel configuration.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// The form state to submit.
    pub fn form(&self) -> &FormFields {
        &self.form
    }

    /// Look up a record.
    pub fn record(&self, id: RecordId) -> Option<&ChildRecord> {
        self.records.get(id)
    }

    /// Look up a record handle by prefix.
    pub fn record_id(&self, prefix: &str) -> Option<RecordId> {
        self.prefixes.get(prefix).copied()
    }

    /// Look up a record by prefix.
    pub fn record_by_prefix(&self, prefix: &str) -> Option<&ChildRecord> {
        self.record_id(prefix).and_then(|id| self.records.get(id))
    }

    /// All records in on-page order, deleted ones included.
    pub fn records(&self) -> impl Iterator<Item = &ChildRecord> + '_ {
        self.sequence.iter().map(|&id| &self.records[id])
    }

    /// Active records in on-page order.
    pub fn active_records(&self) -> impl Iterator<Item = &ChildRecord> + '_ {
        self.records().filter(|record| record.is_active())
    }

    /// Number of records ever created, deleted ones included.
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Whether the panel has no records at all.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Number of active records.
    pub fn active_count(&self) -> usize {
        self.active_records().count()
    }

    /// The add affordance.
    pub fn add_control(&self) -> &Control {
        &self.add_control
    }

    /// Whether the add affordance is enabled.
    pub fn is_add_enabled(&self) -> bool {
        self.add_control.is_enabled()
    }

    /// Number of validation messages on visible records.
    pub fn error_count(&self) -> usize {
        self.records()
            .filter(|record| record.is_visible())
            .map(|record| record.error_messages().len())
            .sum()
    }

    /// Element id of the container holding the records.
    pub fn forms_container_id(&self) -> String {
        names::forms_container_id(self.config.formset_prefix())
    }

    /// Element id of the add button.
    pub fn add_button_id(&self) -> String {
        names::add_button_id(self.config.formset_prefix())
    }

    /// The record factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// The disclosure toggle.
    pub fn panel_toggle(&self) -> &P {
        &self.panel_toggle
    }

    /// Mutable access to the disclosure toggle.
    pub fn panel_toggle_mut(&mut self) -> &mut P {
        &mut self.panel_toggle
    }
}
