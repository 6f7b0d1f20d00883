//! Prelude module for Inline Panel.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use inline_panel::prelude::*;
//! ```
//!
//! This provides access to:
//! - The controller (`InlinePanel`) and its records
//! - Configuration (`PanelConfig`, `PanelOptions`)
//! - Collaborators (`RecordFactory`, `PanelToggle` and their standard implementations)
//! - Signal/slot and property primitives

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use inline_panel_core::{ConnectionId, Property, ReadOnlyProperty, Signal};

// ============================================================================
// Controller
// ============================================================================

pub use crate::error::{ConfigError, PanelError};
pub use crate::panel::{ExistingRecord, InlinePanel};
pub use crate::record::{ChildControl, ChildRecord, RecordId};
pub use crate::reorder::{Direction, MovePlan};

// ============================================================================
// Configuration and Form State
// ============================================================================

pub use crate::config::{PanelConfig, PanelOptions};
pub use crate::form::FormFields;

// ============================================================================
// Collaborators
// ============================================================================

pub use crate::factory::{NewRecord, RecordFactory, RecordTemplate, TemplateFactory};
pub use crate::panels::{CollapsiblePanels, PanelToggle};
