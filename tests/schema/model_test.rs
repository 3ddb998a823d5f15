// tests/schema/model_test.rs
use std::collections::HashSet;

use starchive::schema::{DatabaseModel, SchemaError, TableNode};

fn names(set: &HashSet<String>) -> Vec<&str> {
    let mut names: Vec<&str> = set.iter().map(String::as_str).collect();
    names.sort();
    names
}

/// A <- B <- C <- D linear chain.
fn chain() -> DatabaseModel {
    DatabaseModel::new(vec![
        TableNode::root("A"),
        TableNode::new("B", ["A"], "B.aId=A.aId"),
        TableNode::new("C", ["B"], "C.bId=B.bId"),
        TableNode::new("D", ["C"], "D.cId=C.cId"),
    ])
    .unwrap()
}

#[test]
fn test_table_lookup_is_exact() {
    let model = chain();
    assert_eq!(model.table("B").unwrap().join_clause, "B.aId=A.aId");
    assert_eq!(
        model.table("b"),
        Err(SchemaError::TableNotFound("b".to_string()))
    );
}

#[test]
fn test_dependencies_of_a_chain() {
    let model = chain();
    assert_eq!(names(&model.dependencies("D").unwrap()), vec!["A", "B", "C"]);
    assert_eq!(names(&model.dependencies("B").unwrap()), vec!["A"]);
    assert!(model.dependencies("A").unwrap().is_empty());
}

#[test]
fn test_dependencies_of_a_diamond_are_deduplicated() {
    let model = DatabaseModel::new(vec![
        TableNode::root("A"),
        TableNode::new("B", ["A"], "B.aId=A.aId"),
        TableNode::new("C", ["A"], "C.aId=A.aId"),
        TableNode::new("D", ["B", "C"], "D.bId=B.bId AND D.cId=C.cId"),
    ])
    .unwrap();
    assert_eq!(names(&model.dependencies("D").unwrap()), vec!["A", "B", "C"]);
}

#[test]
fn test_dependencies_of_unknown_table_fail() {
    let model = chain();
    assert_eq!(
        model.dependencies("Nope"),
        Err(SchemaError::TableNotFound("Nope".to_string()))
    );
}

#[test]
fn test_direct_cycle_is_detected() {
    let model = DatabaseModel::new(vec![
        TableNode::new("A", ["B"], "A.bId=B.bId"),
        TableNode::new("B", ["A"], "B.aId=A.aId"),
    ])
    .unwrap();
    assert!(matches!(
        model.dependencies("A"),
        Err(SchemaError::CyclicDependency { .. })
    ));
}

#[test]
fn test_transitive_cycle_is_detected() {
    // The cycle is B <-> C; A is not on it but depends on it.
    let model = DatabaseModel::new(vec![
        TableNode::new("A", ["B"], "A.bId=B.bId"),
        TableNode::new("B", ["C"], "B.cId=C.cId"),
        TableNode::new("C", ["B"], "C.bId=B.bId"),
    ])
    .unwrap();
    let err = model.dependencies("A").unwrap_err();
    match err {
        SchemaError::CyclicDependency { cycle } => {
            assert_eq!(cycle, vec!["A", "B", "C", "B"]);
        }
        other => panic!("expected CyclicDependency, got {other:?}"),
    }
}

#[test]
fn test_self_dependency_is_a_cycle() {
    let model =
        DatabaseModel::new(vec![TableNode::new("A", ["A"], "A.id=A.id")]).unwrap();
    assert!(matches!(
        model.dependencies("A"),
        Err(SchemaError::CyclicDependency { .. })
    ));
}

#[test]
fn test_duplicate_table_names_are_rejected() {
    assert!(matches!(
        DatabaseModel::new(vec![TableNode::root("A"), TableNode::root("A")]),
        Err(SchemaError::DuplicateTable(name)) if name == "A"
    ));
}

#[test]
fn test_unknown_dependency_is_rejected_at_construction() {
    assert!(matches!(
        DatabaseModel::new(vec![TableNode::new("B", ["Missing"], "B.x=Missing.x")]),
        Err(SchemaError::TableNotFound(name)) if name == "Missing"
    ));
}
