//! Build a FROM expression covering a set of tables.
//!
//! Given the tables a query references, this expands them with their
//! transitive dependencies, checks that the closure hangs off a single root,
//! and emits the root plus one `LEFT JOIN ... ON (...)` per remaining table
//! in dependency order.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::schema::{DatabaseModel, SchemaError, SchemaResult};

/// Build a FROM expression for the given tables.
///
/// The output covers exactly the requested tables plus whatever transitive
/// dependencies are needed to join them, each exactly once. Every table is
/// emitted after all of its dependencies, and unblocked siblings are ordered
/// lexicographically, so the result is identical for any permutation of the
/// input set.
pub fn build_from_expression(
    tables: &HashSet<String>,
    model: &DatabaseModel,
) -> SchemaResult<String> {
    if tables.is_empty() {
        return Err(SchemaError::EmptyTableSet);
    }

    // Closure: the requested tables and everything they transitively depend
    // on. BTreeSet so the rest of the walk is deterministic.
    let mut closure = BTreeSet::new();
    for name in tables {
        model.table(name)?;
        closure.insert(name.clone());
        closure.extend(model.dependencies(name)?);
    }

    let roots: Vec<String> = closure
        .iter()
        .filter(|name| {
            model
                .table(name)
                .map(|node| node.is_root())
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    if roots.len() > 1 {
        return Err(SchemaError::MultipleRoots { roots });
    }

    // Kahn's algorithm over the closure. The ready set is a BTreeSet, so
    // among tables whose dependencies are all emitted the lexicographically
    // smallest goes first.
    let mut blocking: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for name in &closure {
        let node = model.table(name)?;
        let pending: BTreeSet<String> = node
            .depends_on
            .iter()
            .filter(|dep| closure.contains(*dep))
            .cloned()
            .collect();
        blocking.insert(name.clone(), pending);
    }

    let mut ready: BTreeSet<String> = blocking
        .iter()
        .filter(|(_, pending)| pending.is_empty())
        .map(|(name, _)| name.clone())
        .collect();

    let mut from = String::new();
    let mut emitted = 0usize;
    while let Some(name) = ready.iter().next().cloned() {
        ready.remove(&name);
        blocking.remove(&name);

        let node = model.table(&name)?;
        if from.is_empty() {
            from.push_str(&format!("`{name}`"));
        } else {
            from.push_str(&format!(" LEFT JOIN `{}` ON ({})", name, node.join_clause));
        }
        emitted += 1;

        for (candidate, pending) in blocking.iter_mut() {
            if pending.remove(&name) && pending.is_empty() {
                ready.insert(candidate.clone());
            }
        }
    }

    // Every closure member has acyclic dependencies (checked above), so the
    // topological walk must consume the whole closure.
    debug_assert_eq!(emitted, closure.len());

    Ok(from)
}
