use plume_runtime::Operator;

use crate::error::Error;
use crate::node::Node;

#[test]
fn fresh_node_has_no_role() {
    let node = Node::new();
    assert!(!node.is_role_set());
    assert!(!node.is_stmt());
    assert!(!node.is_arg());
}

#[test]
fn first_as_arg_fixes_the_role() {
    let mut node = Node::new();
    node.as_arg_named("x").unwrap();
    assert!(node.is_role_set());
    assert!(node.is_arg());
    assert_eq!(node.arg().unwrap().name, "x");
}

#[test]
fn repeated_as_arg_returns_the_same_state() {
    let mut node = Node::new();
    node.as_arg_named("x").unwrap();
    // Second call of the matching kind is an idempotent accessor.
    let arg = node.as_arg().unwrap();
    assert_eq!(arg.name, "x");
}

#[test]
fn cross_kind_access_is_a_contract_violation() {
    let mut node = Node::new();
    node.as_arg_named("x").unwrap();

    let err = node.as_stmt().unwrap_err();
    assert!(matches!(err, Error::RoleMismatch { .. }), "got {err}");

    let mut stmt_node = Node::new_stmt("relu", vec![], Operator::new("relu"));
    let err = stmt_node.as_arg().unwrap_err();
    assert!(matches!(err, Error::RoleMismatch { .. }), "got {err}");
}

#[test]
fn as_stmt_with_fills_the_payload() {
    let mut node = Node::new();
    node.as_stmt_with("conv2d", vec![], Operator::new("conv2d")).unwrap();
    let stmt = node.stmt().unwrap();
    assert_eq!(stmt.op_type, "conv2d");
    assert!(stmt.valid_kernels.is_empty());
}

#[test]
fn read_accessors_require_the_matching_role() {
    let node = Node::new_arg("x");
    assert!(node.arg().is_ok());
    assert!(matches!(node.stmt().unwrap_err(), Error::RoleMismatch { .. }));

    let unset = Node::new();
    assert!(unset.arg().is_err());
    assert!(unset.stmt().is_err());
}

#[test]
fn display_names_the_role() {
    assert_eq!(Node::new_arg("x").to_string(), "Argument x");
    assert_eq!(Node::new_stmt("relu", vec![], Operator::new("relu")).to_string(), "Statement relu");
    assert_eq!(Node::new().to_string(), "unset node");
}
