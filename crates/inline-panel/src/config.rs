//! Panel configuration.
//!
//! The embedding page describes a panel with a small options object:
//!
//! ```json
//! {
//!     "formsetPrefix": "id_items",
//!     "canOrder": true,
//!     "emptyChildFormPrefix": "items-__prefix__",
//!     "maxForms": 5
//! }
//! ```
//!
//! [`PanelOptions`] mirrors that object (and doubles as a builder for Rust
//! callers). [`PanelConfig`] is the validated, immutable form the controller
//! is constructed with; the optional post-add hook is attached to it since it
//! cannot come from a serialized document.
//!
//! # Example
//!
//! ```
//! use inline_panel::config::{PanelConfig, PanelOptions};
//!
//! let config = PanelConfig::new(
//!     PanelOptions::new("items")
//!         .with_can_order(true)
//!         .with_max_forms(3),
//! )
//! .unwrap();
//!
//! assert!(config.can_order());
//! assert_eq!(config.max_forms(), Some(3));
//! assert_eq!(config.empty_child_form_prefix(), "items-__prefix__");
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use inline_panel_core::logging::targets;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::form::PREFIX_PLACEHOLDER;
use crate::record::RecordId;

/// Default duration of the cosmetic swap animation.
pub const DEFAULT_SWAP_DURATION: Duration = Duration::from_millis(200);

/// Default duration of the collapse animation played on delete.
pub const DEFAULT_COLLAPSE_DURATION: Duration = Duration::from_millis(400);

/// Hook invoked after each successful add.
pub type AddHook = Arc<dyn Fn(RecordId) + Send + Sync>;

/// Panel options as supplied by the embedding page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelOptions {
    /// Identifies the field-group container and its management fields.
    pub formset_prefix: Option<String>,
    /// Enables order-value maintenance and the move controls.
    pub can_order: bool,
    /// Template prefix; `__prefix__` is replaced by the creation index.
    pub empty_child_form_prefix: Option<String>,
    /// Cap on the number of non-deleted records. `0` means unbounded.
    pub max_forms: Option<usize>,
    /// Swap animation duration in milliseconds.
    pub swap_duration_ms: Option<u64>,
    /// Collapse animation duration in milliseconds.
    pub collapse_duration_ms: Option<u64>,
}

impl PanelOptions {
    /// Options for the given formset prefix, with everything else defaulted.
    pub fn new(formset_prefix: impl Into<String>) -> Self {
        Self {
            formset_prefix: Some(formset_prefix.into()),
            ..Default::default()
        }
    }

    /// Parse options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set ordering support using builder pattern.
    pub fn with_can_order(mut self, can_order: bool) -> Self {
        self.can_order = can_order;
        self
    }

    /// Set the template prefix using builder pattern.
    pub fn with_empty_child_form_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.empty_child_form_prefix = Some(prefix.into());
        self
    }

    /// Set the record limit using builder pattern.
    pub fn with_max_forms(mut self, max_forms: usize) -> Self {
        self.max_forms = Some(max_forms);
        self
    }

    /// Set the swap animation duration using builder pattern.
    pub fn with_swap_duration(mut self, duration: Duration) -> Self {
        self.swap_duration_ms = Some(duration.as_millis() as u64);
        self
    }

    /// Set the collapse animation duration using builder pattern.
    pub fn with_collapse_duration(mut self, duration: Duration) -> Self {
        self.collapse_duration_ms = Some(duration.as_millis() as u64);
        self
    }
}

/// Validated, immutable panel configuration.
#[derive(Clone)]
pub struct PanelConfig {
    formset_prefix: String,
    can_order: bool,
    empty_child_form_prefix: String,
    max_forms: Option<usize>,
    swap_duration: Duration,
    collapse_duration: Duration,
    on_add: Option<AddHook>,
}

impl PanelConfig {
    /// Validate options into a configuration.
    ///
    /// Fails when ordering or a record limit is requested without a formset
    /// prefix, or when the template prefix lacks the `__prefix__` placeholder.
    /// Without an explicit template prefix, `{formsetPrefix}-__prefix__` is
    /// used.
    pub fn new(options: PanelOptions) -> Result<Self, ConfigError> {
        let max_forms = options.max_forms.filter(|&max| max > 0);
        let formset_prefix = options
            .formset_prefix
            .filter(|prefix| !prefix.is_empty());

        if formset_prefix.is_none() {
            let feature = if options.can_order {
                Some("ordering")
            } else if max_forms.is_some() {
                Some("maxForms")
            } else if options.empty_child_form_prefix.is_none() {
                Some("record creation")
            } else {
                None
            };
            if let Some(feature) = feature {
                return Err(ConfigError::MissingFormsetPrefix { feature });
            }
        }
        let formset_prefix = formset_prefix.unwrap_or_default();

        let empty_child_form_prefix = options
            .empty_child_form_prefix
            .unwrap_or_else(|| format!("{formset_prefix}-{PREFIX_PLACEHOLDER}"));
        if !empty_child_form_prefix.contains(PREFIX_PLACEHOLDER) {
            return Err(ConfigError::MissingPlaceholder {
                template: empty_child_form_prefix,
            });
        }

        let config = Self {
            formset_prefix,
            can_order: options.can_order,
            empty_child_form_prefix,
            max_forms,
            swap_duration: options
                .swap_duration_ms
                .map_or(DEFAULT_SWAP_DURATION, Duration::from_millis),
            collapse_duration: options
                .collapse_duration_ms
                .map_or(DEFAULT_COLLAPSE_DURATION, Duration::from_millis),
            on_add: None,
        };
        tracing::debug!(target: targets::CONFIG, ?config, "panel configuration validated");
        Ok(config)
    }

    /// Parse and validate a JSON options document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::new(PanelOptions::from_json(json)?)
    }

    /// Attach a hook invoked after each successful add.
    pub fn with_on_add<F>(mut self, hook: F) -> Self
    where
        F: Fn(RecordId) + Send + Sync + 'static,
    {
        self.on_add = Some(Arc::new(hook));
        self
    }

    /// The formset prefix (empty when none was configured).
    pub fn formset_prefix(&self) -> &str {
        &self.formset_prefix
    }

    /// Whether ordering is supported.
    pub fn can_order(&self) -> bool {
        self.can_order
    }

    /// Template prefix containing `__prefix__`.
    pub fn empty_child_form_prefix(&self) -> &str {
        &self.empty_child_form_prefix
    }

    /// Child prefix for the given creation index.
    pub fn child_prefix(&self, index: usize) -> String {
        self.empty_child_form_prefix
            .replace(PREFIX_PLACEHOLDER, &index.to_string())
    }

    /// The record limit, if any.
    pub fn max_forms(&self) -> Option<usize> {
        self.max_forms
    }

    /// Duration of the swap animation.
    pub fn swap_duration(&self) -> Duration {
        self.swap_duration
    }

    /// Duration of the delete collapse animation.
    pub fn collapse_duration(&self) -> Duration {
        self.collapse_duration
    }

    /// The post-add hook, if any.
    pub fn on_add(&self) -> Option<&AddHook> {
        self.on_add.as_ref()
    }
}

impl fmt::Debug for PanelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelConfig")
            .field("formset_prefix", &self.formset_prefix)
            .field("can_order", &self.can_order)
            .field("empty_child_form_prefix", &self.empty_child_form_prefix)
            .field("max_forms", &self.max_forms)
            .field("swap_duration", &self.swap_duration)
            .field("collapse_duration", &self.collapse_duration)
            .field("on_add", &self.on_add.is_some())
            .finish()
    }
}
