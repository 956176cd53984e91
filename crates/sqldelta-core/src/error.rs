//! Error types for update generation.

use thiserror::Error;

/// Errors that can occur while generating an update statement.
///
/// Every variant is a pre-render validation failure: generation either
/// returns a complete [`crate::UpdateStatement`] or one of these, never a
/// partial result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeltaError {
    /// The new and old records are of different concrete types.
    #[error("records are of different types: {new} vs {old}")]
    TypeMismatch {
        /// Type name of the new record.
        new: &'static str,
        /// Type name of the old record.
        old: &'static str,
    },

    /// A record value could not be inspected, e.g. a nested record that is
    /// set on only one side of a diff.
    #[error("invalid record value: {0}")]
    InvalidValue(String),

    /// The declared key field does not resolve to any field of the record.
    #[error("record has no key field named '{0}'")]
    MissingKeyField(String),

    /// A requested field name does not resolve to any field of the record.
    #[error("record has no field named '{0}'")]
    MissingField(String),

    /// Two fields would be emitted under the same parameter name while the
    /// generator requires unique names.
    #[error("duplicate field name '{0}' in changed set")]
    DuplicateField(String),
}

/// Result type alias for update generation.
pub type Result<T> = std::result::Result<T, DeltaError>;
