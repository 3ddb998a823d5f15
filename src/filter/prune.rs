//! Remove empty combinator nodes from a raw filter object.
//!
//! The archive UI lets users delete filter rows, which can leave `AND`/`OR`
//! nodes with empty child arrays behind. The compiler does not interpret
//! those (it would emit degenerate SQL like `()`), so callers run this
//! utility over the raw JSON before handing it to
//! [`crate::filter::parse_filter`]. An entirely empty tree collapses to `{}`.

use serde_json::{Map, Value};

use super::error::{FilterError, FilterResult};

/// Recursively remove empty `AND`/`OR` arrays and combinators whose payload
/// pruned away. Pure function; the input is not modified.
pub fn prune(condition: &Value) -> FilterResult<Value> {
    let object = match condition {
        Value::Object(map) => map,
        _ => return Err(FilterError::NotAnObject),
    };

    let mut pruned = Map::new();
    for (key, payload) in object {
        match (key.as_str(), payload) {
            ("AND" | "OR", Value::Array(children)) => {
                let children: Vec<Value> = children
                    .iter()
                    .map(prune_child)
                    .filter(|child| !is_empty_object(child))
                    .collect();
                if !children.is_empty() {
                    pruned.insert(key.clone(), Value::Array(children));
                }
            }
            ("NOT", child) => {
                let child = prune_child(child);
                if !is_empty_object(&child) {
                    pruned.insert(key.clone(), child);
                }
            }
            // Leaf predicates (and anything unrecognized) pass through
            // untouched; the parser decides whether they are valid.
            _ => {
                pruned.insert(key.clone(), payload.clone());
            }
        }
    }

    Ok(Value::Object(pruned))
}

/// Prune a child node, leaving non-objects alone so the parser can reject
/// them with its own message.
fn prune_child(child: &Value) -> Value {
    match prune(child) {
        Ok(pruned) => pruned,
        Err(_) => child.clone(),
    }
}

fn is_empty_object(value: &Value) -> bool {
    matches!(value, Value::Object(map) if map.is_empty())
}
