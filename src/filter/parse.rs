//! Parse a serialized filter into a [`FilterExpression`].
//!
//! The wire format is a nested JSON object with exactly one recognized key
//! per node:
//!
//! ```json
//! {
//!   "AND": [
//!     { "EQUALS": { "column": "Proposal.proposalCode", "value": "2019-1-SCI-042" } },
//!     { "NOT": { "IS_NULL": { "column": "Target.name" } } }
//!   ]
//! }
//! ```
//!
//! Parsing walks the `serde_json::Value` tree directly rather than using a
//! derived deserializer: the validation messages (missing vs. null columns,
//! the canonical `A.B` example, geometry ranges) are part of the contract
//! with the archive UI and have to be produced here.

use serde_json::Value;

use super::ast::{ComparisonOp, FilterExpression, FilterValue, QualifiedColumn, RadiusSearch};
use super::error::{FilterError, FilterResult};

/// Parse a serialized filter expression.
pub fn parse_filter(input: &str) -> FilterResult<FilterExpression> {
    let value: Value =
        serde_json::from_str(input).map_err(|err| FilterError::Syntax(err.to_string()))?;
    parse_node(&value)
}

fn parse_node(node: &Value) -> FilterResult<FilterExpression> {
    let object = match node {
        Value::Object(map) => map,
        other => return Err(FilterError::UnrecognizedNode(other.to_string())),
    };

    // Exactly one recognized key per node; a node with zero or several keys
    // is ambiguous and rejected outright.
    if object.len() != 1 {
        return Err(FilterError::UnrecognizedNode(node.to_string()));
    }
    let (key, payload) = object.iter().next().expect("length checked above");

    match key.as_str() {
        "AND" => Ok(FilterExpression::And(parse_children(key, payload)?)),
        "OR" => Ok(FilterExpression::Or(parse_children(key, payload)?)),
        "NOT" => Ok(FilterExpression::Not(Box::new(parse_node(payload)?))),
        "EQUALS" => parse_comparison(ComparisonOp::Equals, payload),
        "LESS_THAN" => parse_comparison(ComparisonOp::LessThan, payload),
        "GREATER_THAN" => parse_comparison(ComparisonOp::GreaterThan, payload),
        "LESS_EQUAL" => parse_comparison(ComparisonOp::LessEqual, payload),
        "GREATER_EQUAL" => parse_comparison(ComparisonOp::GreaterEqual, payload),
        "CONTAINS" => parse_comparison(ComparisonOp::Contains, payload),
        "IS_NULL" => Ok(FilterExpression::IsNull(column_field(payload, "column")?)),
        "WITHIN_RADIUS" => parse_within_radius(payload),
        _ => Err(FilterError::UnrecognizedNode(node.to_string())),
    }
}

fn parse_children(combinator: &str, payload: &Value) -> FilterResult<Vec<FilterExpression>> {
    let children = payload.as_array().ok_or_else(|| {
        FilterError::UnrecognizedNode(format!("the value of {combinator} must be an array"))
    })?;
    children.iter().map(parse_node).collect()
}

fn parse_comparison(op: ComparisonOp, payload: &Value) -> FilterResult<FilterExpression> {
    let column = column_field(payload, "column")?;
    let value = value_field(payload)?;
    Ok(FilterExpression::Comparison { op, column, value })
}

fn parse_within_radius(payload: &Value) -> FilterResult<FilterExpression> {
    let right_ascension_column = column_field(payload, "rightAscensionColumn")?;
    let declination_column = column_field(payload, "declinationColumn")?;
    let right_ascension = number_field(payload, "rightAscension", "right ascension")?;
    let declination = number_field(payload, "declination", "declination")?;
    let radius = number_field(payload, "radius", "radius")?;
    Ok(FilterExpression::WithinRadius(RadiusSearch::new(
        right_ascension_column,
        declination_column,
        right_ascension,
        declination,
        radius,
    )?))
}

/// Validate a column field: present, non-null, a string of the form `A.B`.
fn column_field(payload: &Value, field: &str) -> FilterResult<QualifiedColumn> {
    match payload.get(field) {
        None => Err(FilterError::InvalidColumn(format!(
            "the column {field} is undefined"
        ))),
        Some(Value::Null) => Err(FilterError::InvalidColumn(format!(
            "the column {field} is null"
        ))),
        Some(Value::String(raw)) => QualifiedColumn::parse(raw),
        Some(other) => Err(FilterError::InvalidColumn(format!(
            "the column {field} must be a string of the form A.B, got {other}"
        ))),
    }
}

/// Validate a predicate value: present; null, numeric, string and boolean
/// values are accepted as-is.
fn value_field(payload: &Value) -> FilterResult<FilterValue> {
    match payload.get("value") {
        None => Err(FilterError::InvalidValue(
            "the value is undefined".to_string(),
        )),
        Some(Value::Null) => Ok(FilterValue::Null),
        Some(Value::Bool(b)) => Ok(FilterValue::Bool(*b)),
        Some(Value::Number(n)) => Ok(number_to_value(n)),
        Some(Value::String(s)) => Ok(FilterValue::Text(s.clone())),
        Some(other) => Err(FilterError::InvalidValue(format!(
            "the value must be a string, a number, a boolean or null, got {other}"
        ))),
    }
}

fn number_to_value(n: &serde_json::Number) -> FilterValue {
    if let Some(i) = n.as_i64() {
        FilterValue::Int(i)
    } else {
        FilterValue::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

/// Validate a numeric geometry parameter.
fn number_field(payload: &Value, field: &str, label: &str) -> FilterResult<f64> {
    match payload.get(field) {
        Some(Value::Number(n)) => Ok(n.as_f64().unwrap_or(f64::NAN)),
        _ => Err(FilterError::InvalidGeometry(format!(
            "the {label} must be a number"
        ))),
    }
}
