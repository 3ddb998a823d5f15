//! Errors for schema graph construction and traversal.

use thiserror::Error;

/// Errors that can occur while building or querying the schema graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("table {0} does not exist")]
    TableNotFound(String),

    #[error("cyclic table dependency detected: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },

    #[error(
        "the requested tables span more than one root table ({}); \
         a FROM expression can only be anchored at a single root",
        roots.join(", ")
    )]
    MultipleRoots { roots: Vec<String> },

    #[error("at least one table is required to build a FROM expression")]
    EmptyTableSet,

    #[error("table {0} is defined more than once")]
    DuplicateTable(String),
}

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
