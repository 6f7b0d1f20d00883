//! Persisted form state.
//!
//! Every child record owns a handful of form fields that are submitted with
//! the parent form. The controller reads and writes two of them directly: the
//! delete flag and (when ordering is enabled) the order value. Their names are
//! derived from the record prefix by the functions in [`names`].
//!
//! [`FormFields`] holds the submitted name/value pairs. It serializes as a
//! flat JSON object, which is also how an embedding page hands over its
//! initial state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the creation index in template prefixes.
pub const PREFIX_PLACEHOLDER: &str = "__prefix__";

/// Value written to a delete field to mark its record as deleted.
pub const DELETED_MARKER: &str = "1";

/// Field and element naming derived from prefixes.
pub mod names {
    /// Delete flag field of a child record.
    pub fn delete_field(prefix: &str) -> String {
        format!("{prefix}-DELETE")
    }

    /// Order field of a child record.
    pub fn order_field(prefix: &str) -> String {
        format!("{prefix}-ORDER")
    }

    /// Element id of the child record's container.
    pub fn child_element_id(prefix: &str) -> String {
        format!("inline_child_{prefix}")
    }

    /// Element id of the child record's delete button.
    pub fn delete_button_id(prefix: &str) -> String {
        format!("id_{prefix}-DELETE-button")
    }

    /// Management field holding the number of forms ever created.
    pub fn total_forms_field(formset_prefix: &str) -> String {
        format!("{formset_prefix}-TOTAL_FORMS")
    }

    /// Element id of the container holding all child records.
    pub fn forms_container_id(formset_prefix: &str) -> String {
        format!("{formset_prefix}-FORMS")
    }

    /// Element id of the add button.
    pub fn add_button_id(formset_prefix: &str) -> String {
        format!("{formset_prefix}-ADD")
    }
}

/// Parse a submitted boolean the way form backends do.
///
/// Empty strings, `"0"`, `"false"` and `"off"` (case-insensitive) are falsy;
/// anything else is truthy.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("off"))
}

/// Submitted name/value pairs of the parent form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormFields {
    values: BTreeMap<String, String>,
}

impl FormFields {
    /// Create an empty field set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a field set from a JSON object of strings.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serialize the field set to a JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Get a field's value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Set a field's value, returning the previous one.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Whether a field exists.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether a field holds a truthy value. Missing fields are falsy.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(is_truthy)
    }

    /// Parse a field as an integer.
    ///
    /// Returns `None` when the field is missing, empty or not a number.
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(|value| value.trim().parse().ok())
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}
