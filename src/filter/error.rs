//! Errors for filter parsing and validation.
//!
//! All of these are deterministic input-validation failures: a malformed
//! filter indicates either a client bug or a malicious request, so the
//! compiler fails fast and loud rather than emitting partial SQL.

use thiserror::Error;

/// Errors that can occur while parsing or validating a filter expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// The serialized filter is not valid JSON.
    #[error("the filter is not valid JSON: {0}")]
    Syntax(String),

    /// A filter node matches none of the known combinators or predicates.
    #[error("{0} does not represent a recognized filter node")]
    UnrecognizedNode(String),

    /// Column missing, null, or not of the form `Table.Column`.
    #[error("{0}")]
    InvalidColumn(String),

    /// Predicate value missing or of an unsupported type.
    #[error("{0}")]
    InvalidValue(String),

    /// A WITHIN_RADIUS parameter is missing, non-numeric or out of range.
    #[error("{0}")]
    InvalidGeometry(String),

    /// The pruning utility was handed something other than a JSON object.
    #[error("the filter condition must be an object")]
    NotAnObject,
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
