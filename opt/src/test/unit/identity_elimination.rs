use plume_ir::{Graph, NodeId};
use plume_runtime::Operator;

use crate::fuser::Fuser;
use crate::passes::IdentityEliminationPass;

fn stmt(graph: &mut Graph, op_type: &str) -> NodeId {
    graph.new_stmt_node(op_type, vec![], Operator::new(op_type))
}

#[test]
fn relu_chain_collapses_to_one_argument() {
    let mut graph = Graph::new();
    let var1 = graph.new_arg_node("var1");
    let op = stmt(&mut graph, "relu");
    let var2 = graph.new_arg_node("var2");
    graph.add_edge(var1, op).unwrap();
    graph.add_edge(op, var2).unwrap();

    let pass = IdentityEliminationPass::with_op_types(["relu"]);
    let rewritten = pass.apply(&mut graph).unwrap();

    assert_eq!(rewritten, 1);
    assert_eq!(graph.len(), 1);
    let (_, survivor) = graph.iter().next().unwrap();
    assert!(survivor.is_arg());
    assert_eq!(graph.iter().filter(|(_, node)| node.is_stmt()).count(), 0);
    graph.validate().unwrap();
}

#[test]
fn consumers_are_spliced_onto_the_producer() {
    // x -> identity -> y -> relu -> z
    let mut graph = Graph::new();
    let x = graph.new_arg_node("x");
    let id = stmt(&mut graph, "identity");
    let y = graph.new_arg_node("y");
    let relu = stmt(&mut graph, "relu");
    let z = graph.new_arg_node("z");
    graph.add_edge(x, id).unwrap();
    graph.add_edge(id, y).unwrap();
    graph.add_edge(y, relu).unwrap();
    graph.add_edge(relu, z).unwrap();
    graph.node_mut(relu).unwrap().as_stmt().unwrap().op.op_info_mut().add_input("X", ["y"]).add_output(
        "Out",
        ["z"],
    );

    let pass = IdentityEliminationPass::new();
    assert_eq!(pass.apply(&mut graph).unwrap(), 1);

    assert_eq!(graph.len(), 3);
    assert!(graph.has_edge(x, relu), "consumer must now read the producer argument");
    let relu_info = graph.node(relu).unwrap().stmt().unwrap().op.op_info().clone();
    assert_eq!(relu_info.input("X").unwrap(), ["x"], "descriptor re-aliased to the surviving name");
    graph.validate().unwrap();
}

#[test]
fn chained_identities_settle_over_repeated_applies() {
    // a -> id1 -> b -> id2 -> c; the second match goes stale once the first
    // rewrite removes b, so one apply eliminates one link.
    let mut graph = Graph::new();
    let a = graph.new_arg_node("a");
    let id1 = stmt(&mut graph, "identity");
    let b = graph.new_arg_node("b");
    let id2 = stmt(&mut graph, "identity");
    let c = graph.new_arg_node("c");
    graph.add_edge(a, id1).unwrap();
    graph.add_edge(id1, b).unwrap();
    graph.add_edge(b, id2).unwrap();
    graph.add_edge(id2, c).unwrap();

    let pass = IdentityEliminationPass::new();
    assert_eq!(pass.apply(&mut graph).unwrap(), 1);
    assert_eq!(graph.len(), 3);
    graph.validate().unwrap();

    assert_eq!(pass.apply(&mut graph).unwrap(), 1);
    assert_eq!(graph.len(), 1);
    graph.validate().unwrap();
}

#[test]
fn multi_producer_outputs_are_left_alone() {
    // y has a second producer, so eliminating the identity would orphan it.
    let mut graph = Graph::new();
    let x = graph.new_arg_node("x");
    let id = stmt(&mut graph, "identity");
    let y = graph.new_arg_node("y");
    let other = stmt(&mut graph, "conv2d");
    graph.add_edge(x, id).unwrap();
    graph.add_edge(id, y).unwrap();
    graph.add_edge(other, y).unwrap();

    let pass = IdentityEliminationPass::new();
    pass.apply(&mut graph).unwrap();

    assert_eq!(graph.len(), 4, "guarded rewrite must leave the subgraph untouched");
    assert!(graph.has_edge(id, y));
}

#[test]
fn non_identity_ops_never_match() {
    let mut graph = Graph::new();
    let x = graph.new_arg_node("x");
    let conv = stmt(&mut graph, "conv2d");
    let y = graph.new_arg_node("y");
    graph.add_edge(x, conv).unwrap();
    graph.add_edge(conv, y).unwrap();

    assert_eq!(IdentityEliminationPass::new().apply(&mut graph).unwrap(), 0);
    assert_eq!(graph.len(), 3);
}
