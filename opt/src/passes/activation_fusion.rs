//! Fusion of an activation statement into its producer.
//!
//! Rewrites `base -> mid -> act -> out` into `base -> out`, recording the
//! folded activation as an `act_type` attribute on the base statement. The
//! mid argument and the activation statement disappear; the matcher's
//! boundary validation guarantees neither is observed elsewhere.

use plume_ir::{helpers, Graph, Match, Pattern};
use plume_runtime::AttrValue;

use crate::fuser::{required_node, Fuser};
use crate::pass::Pass;
use crate::Result;

pub struct ActivationFusionPass {
    base_ops: Vec<String>,
    act_ops: Vec<String>,
}

impl ActivationFusionPass {
    pub fn new() -> Self {
        Self::with_ops(["conv2d", "fc"], ["relu"])
    }

    pub fn with_ops(
        base_ops: impl IntoIterator<Item = impl Into<String>>,
        act_ops: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            base_ops: base_ops.into_iter().map(Into::into).collect(),
            act_ops: act_ops.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ActivationFusionPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Fuser for ActivationFusionPass {
    fn name(&self) -> &str {
        "activation_fusion"
    }

    fn build_pattern(&self, pattern: &mut Pattern) -> plume_ir::Result<()> {
        let base = pattern.new_op_node("base")?;
        let mid = pattern.new_var_node("mid")?;
        let act = pattern.new_op_node("act")?;
        let out = pattern.new_var_node("out")?;

        pattern.node_mut(base).add_assert(helpers::stmt_op_type_in(self.base_ops.clone()))?.as_input();
        pattern.node_mut(mid).as_intermediate();
        pattern.node_mut(act).add_assert(helpers::stmt_op_type_in(self.act_ops.clone()))?.as_intermediate();
        pattern.node_mut(out).as_output();

        pattern.add_edge(base, mid)?;
        pattern.add_edge(mid, act)?;
        pattern.add_edge(act, out)?;
        Ok(())
    }

    fn rewrite(&self, subgraph: &Match, pattern: &Pattern, graph: &mut Graph) -> plume_ir::Result<()> {
        let base = subgraph.node(required_node(pattern, "base")?);
        let mid = subgraph.node(required_node(pattern, "mid")?);
        let act = subgraph.node(required_node(pattern, "act")?);
        let out = subgraph.node(required_node(pattern, "out")?);

        let mid_name = graph.node(mid)?.arg()?.name.clone();
        let out_name = graph.node(out)?.arg()?.name.clone();
        let act_type = graph.node(act)?.stmt()?.op_type.clone();

        {
            let stmt = graph.node_mut(base)?.as_stmt()?;
            stmt.op.op_info_mut().set_attr("act_type", AttrValue::String(act_type));
            stmt.op.op_info_mut().update_all_outputs(&mid_name, &out_name);
        }

        graph.remove_edge(base, mid)?;
        graph.add_edge(base, out)?;
        graph.remove_node(act)?;
        graph.remove_node(mid)?;
        Ok(())
    }
}

impl Pass for ActivationFusionPass {
    fn name(&self) -> &str {
        Fuser::name(self)
    }

    fn apply(&self, graph: &mut Graph) -> Result<()> {
        Fuser::apply(self, graph).map(drop)
    }
}
