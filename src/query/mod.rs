//! Query construction - FROM expressions and the observations query.
//!
//! [`build_from_expression`] turns a set of referenced tables into a single
//! connected LEFT JOIN chain; [`observations_query`] wires output columns,
//! the compiled filter and the FROM expression into an executable SQL string
//! with positional values.

mod from_expr;
mod select;

pub use from_expr::build_from_expression;
pub use select::{observations_query, QueryError, QueryResult, SqlQuery};
