//! Record creation.
//!
//! The controller never builds child widgets itself. It asks a
//! [`RecordFactory`] for one, and the factory reports back the creation index
//! and prefix of the record it inserted. [`TemplateFactory`] is the standard
//! implementation: it clones an empty-form template, substituting the
//! `__prefix__` placeholder with the formset's running form count.

use inline_panel_core::logging::targets;

use crate::config::PanelConfig;
use crate::form::{FormFields, PREFIX_PLACEHOLDER, names};

/// What a factory reports after inserting a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    /// Zero-based creation index.
    pub index: usize,
    /// Prefix addressing the record's fields. Must be unique for the session.
    pub prefix: String,
    /// Ids of the record's nested disclosure regions.
    pub panels: Vec<String>,
}

/// Creates child records from a template.
///
/// When `create` returns, the record's fields must already exist in `form`.
pub trait RecordFactory {
    /// Instantiate a new record and report it.
    fn create(&mut self, form: &mut FormFields) -> NewRecord;
}

/// The empty form a new child is cloned from.
///
/// Field names and panel ids may contain `__prefix__`, which is replaced by
/// the creation index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTemplate {
    fields: Vec<(String, String)>,
    panels: Vec<String>,
}

impl RecordTemplate {
    /// Create an empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field with its initial value using builder pattern.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Add a nested disclosure region using builder pattern.
    pub fn with_panel(mut self, id: impl Into<String>) -> Self {
        self.panels.push(id.into());
        self
    }

    /// The template's fields.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// The template's disclosure ids.
    pub fn panels(&self) -> &[String] {
        &self.panels
    }
}

/// Factory that instantiates records from a [`RecordTemplate`].
///
/// The creation index is the formset's `TOTAL_FORMS` management field, which
/// counts every form ever created (deleted ones included) and is incremented
/// after each creation.
#[derive(Debug, Clone)]
pub struct TemplateFactory {
    formset_prefix: String,
    empty_child_form_prefix: String,
    template: RecordTemplate,
}

impl TemplateFactory {
    /// Create a factory for the panel described by `config`.
    pub fn new(config: &PanelConfig, template: RecordTemplate) -> Self {
        Self {
            formset_prefix: config.formset_prefix().to_string(),
            empty_child_form_prefix: config.empty_child_form_prefix().to_string(),
            template,
        }
    }

    /// The template new records are cloned from.
    pub fn template(&self) -> &RecordTemplate {
        &self.template
    }
}

impl RecordFactory for TemplateFactory {
    fn create(&mut self, form: &mut FormFields) -> NewRecord {
        let total_field = names::total_forms_field(&self.formset_prefix);
        let index = form
            .integer(&total_field)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);

        let substitute = |text: &str| text.replace(PREFIX_PLACEHOLDER, &index.to_string());
        let prefix = substitute(&self.empty_child_form_prefix);

        for (name, value) in &self.template.fields {
            form.set(substitute(name), value.clone());
        }
        let panels = self.template.panels.iter().map(|id| substitute(id)).collect();

        form.set(total_field, (index + 1).to_string());
        tracing::debug!(target: targets::RECORD, index, %prefix, "record instantiated from template");

        NewRecord {
            index,
            prefix,
            panels,
        }
    }
}
