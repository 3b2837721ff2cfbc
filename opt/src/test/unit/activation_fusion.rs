use plume_ir::{Graph, NodeId};
use plume_runtime::{AttrValue, Operator};

use crate::fuser::Fuser;
use crate::passes::ActivationFusionPass;

fn stmt(graph: &mut Graph, op_type: &str) -> NodeId {
    graph.new_stmt_node(op_type, vec![], Operator::new(op_type))
}

/// `input -> conv2d -> mid -> relu -> out`
fn conv_relu_graph() -> (Graph, NodeId, NodeId, NodeId, NodeId, NodeId) {
    let mut graph = Graph::new();
    let input = graph.new_arg_node("input");
    let conv = stmt(&mut graph, "conv2d");
    let mid = graph.new_arg_node("mid");
    let relu = stmt(&mut graph, "relu");
    let out = graph.new_arg_node("out");
    graph.add_edge(input, conv).unwrap();
    graph.add_edge(conv, mid).unwrap();
    graph.add_edge(mid, relu).unwrap();
    graph.add_edge(relu, out).unwrap();
    graph.node_mut(conv).unwrap().as_stmt().unwrap().op.op_info_mut().add_input("Input", ["input"]).add_output(
        "Output",
        ["mid"],
    );
    (graph, input, conv, mid, relu, out)
}

#[test]
fn conv_relu_fuses_into_one_statement() {
    let (mut graph, input, conv, _, _, out) = conv_relu_graph();

    let pass = ActivationFusionPass::new();
    assert_eq!(pass.apply(&mut graph).unwrap(), 1);

    assert_eq!(graph.len(), 3);
    assert!(graph.has_edge(input, conv));
    assert!(graph.has_edge(conv, out), "producer must feed the former activation output");

    let info = graph.node(conv).unwrap().stmt().unwrap().op.op_info().clone();
    assert_eq!(info.attr("act_type"), Some(&AttrValue::String("relu".into())));
    assert_eq!(info.output("Output").unwrap(), ["out"], "descriptor re-aliased past the removed argument");
    graph.validate().unwrap();
}

#[test]
fn observed_intermediate_blocks_fusion() {
    // mid is also consumed by a second statement, so removing it would be
    // visible; boundary validation must discard the match.
    let (mut graph, _, _, mid, _, _) = conv_relu_graph();
    let spy = stmt(&mut graph, "softmax");
    let spy_out = graph.new_arg_node("spy_out");
    graph.add_edge(mid, spy).unwrap();
    graph.add_edge(spy, spy_out).unwrap();

    let pass = ActivationFusionPass::new();
    assert_eq!(pass.apply(&mut graph).unwrap(), 0);
    assert_eq!(graph.len(), 7);
}

#[test]
fn unrelated_base_ops_do_not_fuse() {
    let mut graph = Graph::new();
    let input = graph.new_arg_node("input");
    let pool = stmt(&mut graph, "pool2d");
    let mid = graph.new_arg_node("mid");
    let relu = stmt(&mut graph, "relu");
    let out = graph.new_arg_node("out");
    graph.add_edge(input, pool).unwrap();
    graph.add_edge(pool, mid).unwrap();
    graph.add_edge(mid, relu).unwrap();
    graph.add_edge(relu, out).unwrap();

    assert_eq!(ActivationFusionPass::new().apply(&mut graph).unwrap(), 0);
}

#[test]
fn custom_op_sets_are_honored() {
    let mut graph = Graph::new();
    let input = graph.new_arg_node("input");
    let fc = stmt(&mut graph, "fc");
    let mid = graph.new_arg_node("mid");
    let sigmoid = stmt(&mut graph, "sigmoid");
    let out = graph.new_arg_node("out");
    graph.add_edge(input, fc).unwrap();
    graph.add_edge(fc, mid).unwrap();
    graph.add_edge(mid, sigmoid).unwrap();
    graph.add_edge(sigmoid, out).unwrap();

    let pass = ActivationFusionPass::with_ops(["fc"], ["sigmoid"]);
    assert_eq!(pass.apply(&mut graph).unwrap(), 1);
    let info = graph.node(fc).unwrap().stmt().unwrap().op.op_info().clone();
    assert_eq!(info.attr("act_type"), Some(&AttrValue::String("sigmoid".into())));
}
