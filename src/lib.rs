//! # Starchive
//!
//! Dynamic SQL query construction for an astronomical observation archive.
//!
//! ## Architecture
//!
//! The crate turns a client-supplied filter plus a set of output columns into
//! one parameterized SQL query:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │        Serialized filter (JSON) + output columns         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [filter::parse]
//! ┌─────────────────────────────────────────────────────────┐
//! │              FilterExpression (typed AST)                │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [filter::compile]
//! ┌─────────────────────────────────────────────────────────┐
//! │   CompiledCondition (WHERE SQL + values + columns)       │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [query::from_expr + schema::DatabaseModel]
//! ┌─────────────────────────────────────────────────────────┐
//! │        FROM expression (root + LEFT JOIN chain)          │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [query::select]
//! ┌─────────────────────────────────────────────────────────┐
//! │        SELECT DISTINCT ... FROM ... WHERE ... + values   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The schema graph ([`schema::DatabaseModel`]) is constructed once at process
//! start and shared by reference; every operation here is a pure function of
//! its inputs, so the whole crate is safe to call concurrently without
//! locking. Executing the produced SQL against a pooled connection is the
//! caller's concern.

pub mod filter;
pub mod query;
pub mod schema;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::filter::{
        compile, parse_filter, prune, CompiledCondition, ComparisonOp, FilterError,
        FilterExpression, FilterValue, QualifiedColumn, RadiusSearch, SqlValue,
    };
    pub use crate::query::{build_from_expression, observations_query, QueryError, SqlQuery};
    pub use crate::schema::{catalog, DatabaseModel, SchemaError, TableNode};
}
