//! Filter expression AST - a closed sum type for the boolean filter tree.
//!
//! Clients send filters as nested JSON objects; [`crate::filter::parse`]
//! turns them into this AST, and [`crate::filter::compile`] emits SQL from
//! it. Every variant must be handled in the compiler - the compiler of the
//! *Rust* kind enforces this, so there is no runtime "unknown node" fallback
//! past the parsing stage.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::error::{FilterError, FilterResult};

/// `Table.Column` with both parts restricted to `[A-Za-z0-9_]+`.
static COLUMN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+\.[A-Za-z0-9_]+$").expect("valid regex"));

/// A validated, fully qualified column reference.
///
/// Construction is the only place column syntax is checked; once a
/// `QualifiedColumn` exists it is safe to splice into SQL identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedColumn {
    table: String,
    column: String,
}

impl QualifiedColumn {
    /// Parse a `Table.Column` string.
    ///
    /// The string must split into exactly two non-empty dot-separated parts,
    /// each containing only letters, digits and underscores. Anything else
    /// (wrong dot count, empty parts, backticks, semicolons, whitespace)
    /// is rejected.
    pub fn parse(raw: &str) -> FilterResult<Self> {
        if !COLUMN_PATTERN.is_match(raw) {
            return Err(FilterError::InvalidColumn(format!(
                "the column {raw:?} must be of the form A.B, where A is a table name \
                 and B a column name, both made up of letters, digits and underscores"
            )));
        }
        let (table, column) = raw.split_once('.').expect("pattern guarantees one dot");
        Ok(Self {
            table: table.to_string(),
            column: column.to_string(),
        })
    }

    /// The table part.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The unquoted `Table.Column` form, used for column tracking.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.table, self.column)
    }

    /// The backtick-quoted form used in emitted SQL.
    pub fn quoted(&self) -> String {
        format!("`{}`.`{}`", self.table, self.column)
    }
}

/// A leaf predicate value as supplied by the client.
///
/// Booleans are kept as-is here; they are normalized to `1`/`0` when the
/// compiled condition hands its values to the database driver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FilterValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
    Null,
}

/// A value ready to be bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SqlValue {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl From<&FilterValue> for SqlValue {
    fn from(value: &FilterValue) -> Self {
        match value {
            FilterValue::Int(i) => SqlValue::Int(*i),
            FilterValue::Float(f) => SqlValue::Float(*f),
            FilterValue::Text(s) => SqlValue::Text(s.clone()),
            FilterValue::Bool(true) => SqlValue::Int(1),
            FilterValue::Bool(false) => SqlValue::Int(0),
            FilterValue::Null => SqlValue::Null,
        }
    }
}

/// Binary comparison operators available to leaf predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOp {
    Equals,
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    /// Substring match; compiles to `LIKE` with the value as given.
    Contains,
}

impl ComparisonOp {
    /// The SQL operator token.
    pub fn sql(&self) -> &'static str {
        match self {
            ComparisonOp::Equals => "=",
            ComparisonOp::LessThan => "<",
            ComparisonOp::GreaterThan => ">",
            ComparisonOp::LessEqual => "<=",
            ComparisonOp::GreaterEqual => ">=",
            ComparisonOp::Contains => "LIKE",
        }
    }
}

/// A circular sky-position search.
///
/// Validated on construction: right ascension in `[0, 360]` degrees,
/// declination in `[-90, 90]` degrees, radius in `(0, 1]` degrees.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RadiusSearch {
    pub right_ascension_column: QualifiedColumn,
    pub declination_column: QualifiedColumn,
    pub right_ascension: f64,
    pub declination: f64,
    pub radius: f64,
}

impl RadiusSearch {
    pub fn new(
        right_ascension_column: QualifiedColumn,
        declination_column: QualifiedColumn,
        right_ascension: f64,
        declination: f64,
        radius: f64,
    ) -> FilterResult<Self> {
        if !(0.0..=360.0).contains(&right_ascension) {
            return Err(FilterError::InvalidGeometry(
                "the right ascension must be in the range [0, 360]".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&declination) {
            return Err(FilterError::InvalidGeometry(
                "the declination must be in the range [-90, 90]".to_string(),
            ));
        }
        if radius <= 0.0 {
            return Err(FilterError::InvalidGeometry(
                "the radius must be positive".to_string(),
            ));
        }
        if radius > 1.0 {
            return Err(FilterError::InvalidGeometry(
                "the radius must not be greater than 1".to_string(),
            ));
        }
        Ok(Self {
            right_ascension_column,
            declination_column,
            right_ascension,
            declination,
            radius,
        })
    }
}

/// A boolean filter tree: combinators over typed leaf predicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum FilterExpression {
    And(Vec<FilterExpression>),
    Or(Vec<FilterExpression>),
    Not(Box<FilterExpression>),
    Comparison {
        op: ComparisonOp,
        column: QualifiedColumn,
        value: FilterValue,
    },
    IsNull(QualifiedColumn),
    WithinRadius(RadiusSearch),
}
