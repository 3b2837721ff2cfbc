use std::sync::Arc;

use plume_ir::Graph;
use plume_place::{DataLayoutType, Place, PrecisionType, TargetType};
use plume_runtime::registry::{self, ReferenceKernel};
use plume_runtime::{AttrValue, Operator};

use crate::error::Error;
use crate::pass::{Pass, PassManager};
use crate::passes::{ActivationFusionPass, StaticKernelPickPass};
use crate::Result;

#[test]
fn passes_run_in_sequence_and_revalidate() {
    registry::global()
        .register(
            "pipe.conv",
            "ref",
            Place::new(TargetType::Host, PrecisionType::Any, DataLayoutType::Any),
            Arc::new(|| Box::new(ReferenceKernel)),
        )
        .unwrap();

    // input -> pipe.conv -> mid -> pipe.relu -> out
    let mut graph = Graph::new();
    let input = graph.new_arg_node("input");
    let conv = graph.new_stmt_node("pipe.conv", vec![], Operator::new("pipe.conv"));
    let mid = graph.new_arg_node("mid");
    let relu = graph.new_stmt_node("pipe.relu", vec![], Operator::new("pipe.relu"));
    let out = graph.new_arg_node("out");
    graph.add_edge(input, conv).unwrap();
    graph.add_edge(conv, mid).unwrap();
    graph.add_edge(mid, relu).unwrap();
    graph.add_edge(relu, out).unwrap();

    let mut manager = PassManager::new();
    manager
        .add(ActivationFusionPass::with_ops(["pipe.conv"], ["pipe.relu"]))
        .add(StaticKernelPickPass::new([Place::new(
            TargetType::Host,
            PrecisionType::Float,
            DataLayoutType::NCHW,
        )]));
    manager.run(&mut graph).unwrap();

    // The activation folded away and the surviving statement is bound.
    assert_eq!(graph.len(), 3);
    let stmt = graph.node(conv).unwrap().stmt().unwrap();
    assert_eq!(stmt.op.op_info().attr("act_type"), Some(&AttrValue::String("pipe.relu".into())));
    assert!(stmt.op.kernel().is_some());
    graph.topological_order().unwrap();
}

/// A pass that violates the argument-name uniqueness invariant.
struct BreakerPass;

impl Pass for BreakerPass {
    fn name(&self) -> &str {
        "breaker"
    }

    fn apply(&self, graph: &mut Graph) -> Result<()> {
        graph.new_arg_node("dup");
        graph.new_arg_node("dup");
        Ok(())
    }
}

#[test]
fn invalid_graph_after_a_pass_is_surfaced() {
    let mut graph = Graph::new();
    let mut manager = PassManager::new();
    manager.add(BreakerPass);

    let err = manager.run(&mut graph).unwrap_err();
    assert!(matches!(err, Error::InvalidGraphAfterPass { .. }), "got {err}");
}

#[test]
fn empty_manager_is_a_no_op() {
    let mut graph = Graph::new();
    graph.new_arg_node("x");
    PassManager::new().run(&mut graph).unwrap();
    assert_eq!(graph.len(), 1);
}
