//! Assemble the observations query.
//!
//! This is the entry point the archive's API resolvers call: it combines the
//! caller-mandated output columns, the client-supplied filter and the schema
//! graph into one executable `SELECT DISTINCT ... FROM ... WHERE ...` string
//! with positional values. Pagination and ordering are wrapped around the
//! result by the caller.

use std::collections::HashSet;

use thiserror::Error;

use crate::filter::{compile, parse_filter, FilterError, QualifiedColumn, SqlValue};
use crate::schema::{DatabaseModel, SchemaError};

use super::from_expr::build_from_expression;

/// Errors from assembling an observations query.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error("at least one output column is required")]
    NoColumns,
}

/// Result type for query assembly.
pub type QueryResult<T> = Result<T, QueryError>;

/// An executable query: SQL with `?` placeholders plus the values to bind.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// Build the observations query.
///
/// `columns` are the `Table.Column` names the caller wants returned, in
/// order (duplicates are dropped, first occurrence wins). `filter` is the
/// serialized filter expression. The FROM expression spans every table the
/// output columns or the filter reference, plus the dependencies needed to
/// join them. DISTINCT because left joins along the dependency chain can fan
/// rows out.
pub fn observations_query(
    columns: &[&str],
    filter: &str,
    model: &DatabaseModel,
) -> QueryResult<SqlQuery> {
    if columns.is_empty() {
        return Err(QueryError::NoColumns);
    }

    let mut select_list = Vec::new();
    let mut seen = HashSet::new();
    for raw in columns {
        let column = QualifiedColumn::parse(raw)?;
        if seen.insert(column.qualified_name()) {
            select_list.push(column);
        }
    }

    let condition = compile(&parse_filter(filter)?);

    // Union of output and filter columns decides which tables get joined.
    let mut referenced: HashSet<String> = condition.columns().clone();
    referenced.extend(seen);
    let tables: HashSet<String> = referenced
        .iter()
        .map(|name| {
            name.split_once('.')
                .expect("validated as Table.Column")
                .0
                .to_string()
        })
        .collect();

    let from = build_from_expression(&tables, model)?;

    let select: Vec<String> = select_list.iter().map(QualifiedColumn::quoted).collect();
    let sql = format!(
        "SELECT DISTINCT {} FROM {} WHERE {}",
        select.join(", "),
        from,
        condition.sql()
    );

    Ok(SqlQuery {
        sql,
        values: condition.values(),
    })
}
