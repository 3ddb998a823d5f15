//! Filter compiler - turn client-supplied boolean filter trees into
//! parameterized SQL.
//!
//! The pipeline is parse → compile:
//!
//! - [`parse_filter`] deserializes and validates the JSON wire format into a
//!   typed [`FilterExpression`];
//! - [`compile`] emits a [`CompiledCondition`] (WHERE SQL, positional values,
//!   referenced columns) in one pass;
//! - [`prune`] is the companion utility callers run over raw filter objects
//!   first, removing empty combinator groups a UI may have left behind.
//!
//! Everything here is pure and synchronous; all failures are validation
//! errors surfaced immediately.

mod ast;
mod compile;
mod error;
mod parse;
mod prune;

pub use ast::{
    ComparisonOp, FilterExpression, FilterValue, QualifiedColumn, RadiusSearch, SqlValue,
};
pub use compile::{compile, CompiledCondition};
pub use error::{FilterError, FilterResult};
pub use parse::parse_filter;
pub use prune::prune;
