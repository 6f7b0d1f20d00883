//! Inline Panel: ordered, editable child-record collections for parent forms.
//!
//! A parent form sometimes needs a variable number of related sub-records
//! (line items, related entries) that the user can add, remove and reorder
//! before the whole form is submitted. This crate provides the controller
//! that keeps such a collection consistent:
//!
//! - **Lifecycle**: records are created from a template, soft-deleted (never
//!   removed, so the delete intent is submitted) and reordered.
//! - **Bookkeeping**: the hidden `DELETE` and `ORDER` fields always match the
//!   visible arrangement.
//! - **Enablement**: ordinal labels, move button states and the add
//!   affordance (with an optional record limit) are derived after every
//!   operation.
//!
//! Record creation and disclosure expand/collapse are collaborators behind
//! the [`RecordFactory`] and [`PanelToggle`] traits; [`TemplateFactory`] and
//! [`CollapsiblePanels`] are the standard implementations.
//!
//! # Example
//!
//! ```
//! use inline_panel::prelude::*;
//!
//! let config = PanelConfig::from_json(
//!     r#"{"formsetPrefix": "items", "canOrder": true, "maxForms": 2}"#,
//! )
//! .unwrap();
//! let template = RecordTemplate::new()
//!     .with_field("items-__prefix__-title", "")
//!     .with_field("items-__prefix__-DELETE", "");
//! let factory = TemplateFactory::new(&config, template);
//!
//! let mut panel = InlinePanel::new(
//!     config,
//!     FormFields::new(),
//!     Vec::new(),
//!     factory,
//!     CollapsiblePanels::new(),
//! )
//! .unwrap();
//!
//! panel.click_add().unwrap();
//! panel.click_add().unwrap();
//! assert!(!panel.is_add_enabled());
//! assert_eq!(panel.click_add().unwrap(), None);
//! assert_eq!(panel.form().get("items-1-ORDER"), Some("2"));
//! ```

pub mod animation;
pub mod config;
pub mod debug;
pub mod error;
pub mod factory;
pub mod form;
pub mod panel;
pub mod panels;
pub mod prelude;
pub mod record;
pub mod reorder;

pub use config::{PanelConfig, PanelOptions};
pub use error::{ConfigError, PanelError, Result};
pub use factory::{NewRecord, RecordFactory, RecordTemplate, TemplateFactory};
pub use form::FormFields;
pub use panel::{ExistingRecord, InlinePanel};
pub use panels::{CollapsiblePanels, PanelToggle};
pub use record::{ChildControl, ChildRecord, Control, RecordId};
pub use reorder::{Direction, MovePlan};
