// tests/query/from_expression_test.rs
use std::collections::HashSet;

use starchive::query::build_from_expression;
use starchive::schema::{DatabaseModel, SchemaError, TableNode};

fn set<'a>(names: impl IntoIterator<Item = &'a str>) -> HashSet<String> {
    names.into_iter().map(str::to_string).collect()
}

/// Root A; B and C both depend on A; D depends on B and C.
fn diamond() -> DatabaseModel {
    DatabaseModel::new(vec![
        TableNode::root("A"),
        TableNode::new("B", ["A"], "B.aId=A.aId"),
        TableNode::new("C", ["A"], "C.aId=A.aId"),
        TableNode::new("D", ["B", "C"], "D.bId=B.bId AND D.cId=C.cId"),
        TableNode::new("E", ["A"], "E.aId=A.aId"),
    ])
    .unwrap()
}

#[test]
fn test_single_root_table() {
    let model = diamond();
    let from = build_from_expression(&set(["A"]), &model).unwrap();
    assert_eq!(from, "`A`");
}

#[test]
fn test_dependencies_are_pulled_in_and_ordered() {
    let model = diamond();
    let from = build_from_expression(&set(["B", "D"]), &model).unwrap();

    // A precedes B and C; B and C precede D; E never appears.
    assert_eq!(
        from,
        "`A` LEFT JOIN `B` ON (B.aId=A.aId) \
         LEFT JOIN `C` ON (C.aId=A.aId) \
         LEFT JOIN `D` ON (D.bId=B.bId AND D.cId=C.cId)"
    );
}

#[test]
fn test_output_is_permutation_independent() {
    let model = diamond();
    let reference = build_from_expression(&set(["A", "B", "C", "D"]), &model).unwrap();
    for permutation in [
        vec!["D", "C", "B", "A"],
        vec!["B", "D", "A", "C"],
        vec!["C", "A", "D", "B"],
    ] {
        assert_eq!(
            build_from_expression(&set(permutation), &model).unwrap(),
            reference
        );
    }
}

#[test]
fn test_no_duplicate_joins() {
    let model = diamond();
    // D's closure already covers B; requesting both must not join B twice.
    let from = build_from_expression(&set(["B", "D"]), &model).unwrap();
    assert_eq!(from.matches("LEFT JOIN `B`").count(), 1);
    assert_eq!(from.matches("LEFT JOIN").count(), 3);
}

#[test]
fn test_empty_table_set_fails() {
    let model = diamond();
    assert_eq!(
        build_from_expression(&HashSet::new(), &model),
        Err(SchemaError::EmptyTableSet)
    );
}

#[test]
fn test_unknown_table_fails_by_name() {
    let model = diamond();
    assert_eq!(
        build_from_expression(&set(["B", "Nope"]), &model),
        Err(SchemaError::TableNotFound("Nope".to_string()))
    );
}

#[test]
fn test_multiple_roots_are_rejected() {
    let model = DatabaseModel::new(vec![
        TableNode::root("A"),
        TableNode::root("X"),
        TableNode::new("B", ["A"], "B.aId=A.aId"),
        TableNode::new("Y", ["X"], "Y.xId=X.xId"),
    ])
    .unwrap();
    assert_eq!(
        build_from_expression(&set(["B", "Y"]), &model),
        Err(SchemaError::MultipleRoots {
            roots: vec!["A".to_string(), "X".to_string()],
        })
    );
}

#[test]
fn test_cycles_surface_from_closure_expansion() {
    let model = DatabaseModel::new(vec![
        TableNode::new("A", ["B"], "A.bId=B.bId"),
        TableNode::new("B", ["A"], "B.aId=A.aId"),
    ])
    .unwrap();
    assert!(matches!(
        build_from_expression(&set(["A"]), &model),
        Err(SchemaError::CyclicDependency { .. })
    ));
}
