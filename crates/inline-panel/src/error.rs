//! Error types for the inline panel controller.

use crate::record::RecordId;

/// Result type alias for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors raised while validating panel configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A feature that addresses formset-level fields was requested without
    /// naming the formset.
    #[error("formsetPrefix is required when {feature} is enabled")]
    MissingFormsetPrefix { feature: &'static str },

    /// The empty-form prefix cannot produce distinct child prefixes.
    #[error("emptyChildFormPrefix '{template}' does not contain the __prefix__ placeholder")]
    MissingPlaceholder { template: String },

    /// The options document could not be parsed.
    #[error("Invalid panel options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while operating an inline panel.
///
/// None of these arise from well-formed page state; they surface integration
/// bugs in a collaborator or a caller addressing a record that does not exist.
#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    /// The record handle does not belong to this panel.
    #[error("Unknown record {0:?}")]
    UnknownRecord(RecordId),

    /// The record factory produced a prefix that is already in use.
    #[error("Record prefix '{0}' is already in use")]
    DuplicatePrefix(String),

    /// A move was requested on a panel that does not support ordering.
    #[error("Ordering is not enabled for this panel")]
    OrderingDisabled,

    /// An add was requested while the panel is at its record limit.
    #[error("Panel already holds the maximum of {max} records")]
    AtCapacity { max: usize },
}
