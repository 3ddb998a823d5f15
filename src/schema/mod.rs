//! Schema graph model - the static dependency graph of archive tables.
//!
//! A [`DatabaseModel`] describes which tables can be left-joined to which
//! others and how. It answers two structural questions:
//!
//! - what are the transitive dependencies of table `T`
//!   ([`DatabaseModel::dependencies`])
//! - what is the direct join clause for a table
//!   ([`TableNode::join_clause`])
//!
//! The model is built once at process start, never mutated afterwards, and
//! shared by reference across request handlers.

mod error;

pub mod catalog;

pub use error::{SchemaError, SchemaResult};

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet};

/// One schema entity: a table, the tables it must be joined against, and the
/// raw SQL fragment that joins it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNode {
    /// Unique, case-sensitive table name, used verbatim in generated SQL.
    pub name: String,
    /// Tables that must already be present in a FROM clause before this table
    /// can be joined.
    pub depends_on: HashSet<String>,
    /// Fully qualified join condition, e.g. `A.b_id=B.id`. Empty for roots.
    pub join_clause: String,
}

impl TableNode {
    /// A root table: no dependencies, no join clause.
    pub fn root(name: &str) -> Self {
        Self {
            name: name.to_string(),
            depends_on: HashSet::new(),
            join_clause: String::new(),
        }
    }

    /// A dependent table joined against `depends_on` via `join_clause`.
    pub fn new<'a>(
        name: &str,
        depends_on: impl IntoIterator<Item = &'a str>,
        join_clause: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            depends_on: depends_on.into_iter().map(str::to_string).collect(),
            join_clause: join_clause.to_string(),
        }
    }

    /// Whether this table is a root (anchors a FROM clause).
    pub fn is_root(&self) -> bool {
        self.depends_on.is_empty()
    }
}

/// The static dependency graph of archive tables.
///
/// Nodes are table names; edges run from a dependent table to each of its
/// dependencies. The graph must be acyclic for correct operation - cycles are
/// reported lazily by [`DatabaseModel::dependencies`], which walks the graph
/// keeping the current ancestor path.
#[derive(Debug, Clone)]
pub struct DatabaseModel {
    graph: DiGraph<String, ()>,
    table_index: HashMap<String, NodeIndex>,
    tables: HashMap<String, TableNode>,
}

impl DatabaseModel {
    /// Build a model from a list of table nodes.
    ///
    /// Fails fast on duplicate table names and on `depends_on` entries that
    /// name a table not in the list - both indicate a schema-definition bug.
    pub fn new(nodes: Vec<TableNode>) -> SchemaResult<Self> {
        let mut graph = DiGraph::new();
        let mut table_index = HashMap::new();
        let mut tables = HashMap::new();

        for node in &nodes {
            if tables.contains_key(&node.name) {
                return Err(SchemaError::DuplicateTable(node.name.clone()));
            }
            let idx = graph.add_node(node.name.clone());
            table_index.insert(node.name.clone(), idx);
            tables.insert(node.name.clone(), node.clone());
        }

        // Dependent -> dependency edges.
        for node in &nodes {
            let from = table_index[&node.name];
            for dep in &node.depends_on {
                let to = *table_index
                    .get(dep)
                    .ok_or_else(|| SchemaError::TableNotFound(dep.clone()))?;
                graph.add_edge(from, to, ());
            }
        }

        Ok(Self {
            graph,
            table_index,
            tables,
        })
    }

    /// Exact-name table lookup.
    pub fn table(&self, name: &str) -> SchemaResult<&TableNode> {
        self.tables
            .get(name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    /// The full transitive closure of tables reachable from `name` via
    /// `depends_on` edges, excluding `name` itself.
    ///
    /// Detects cycles anywhere along the walk, not just cycles through `name`:
    /// the traversal keeps the set of ancestors on the current path (seeded
    /// with `name`) and fails as soon as an edge leads back into it.
    pub fn dependencies(&self, name: &str) -> SchemaResult<HashSet<String>> {
        let start = *self
            .table_index
            .get(name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))?;

        let mut path = vec![name.to_string()];
        let mut collected = HashSet::new();
        self.walk_dependencies(start, &mut path, &mut collected)?;
        Ok(collected)
    }

    fn walk_dependencies(
        &self,
        idx: NodeIndex,
        path: &mut Vec<String>,
        collected: &mut HashSet<String>,
    ) -> SchemaResult<()> {
        for dep_idx in self.graph.neighbors(idx) {
            let dep = &self.graph[dep_idx];
            if path.iter().any(|ancestor| ancestor == dep) {
                let mut cycle = path.clone();
                cycle.push(dep.clone());
                return Err(SchemaError::CyclicDependency { cycle });
            }
            // A subtree that was already walked without error cannot
            // contribute a cycle when re-entered through another path.
            if collected.contains(dep) {
                continue;
            }
            collected.insert(dep.clone());
            path.push(dep.clone());
            self.walk_dependencies(dep_idx, path, collected)?;
            path.pop();
        }
        Ok(())
    }

    /// Iterate over all table nodes in the model.
    pub fn tables(&self) -> impl Iterator<Item = &TableNode> {
        self.tables.values()
    }
}
