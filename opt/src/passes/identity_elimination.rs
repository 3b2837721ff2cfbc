//! Elimination of pass-through statements.
//!
//! Removes statements that forward their single input unchanged (identity
//! ops, inference-time dropout) and splices consumers of the removed
//! output onto the producer's argument.

use plume_ir::{helpers, Graph, Match, Pattern};

use crate::fuser::{required_node, Fuser};
use crate::pass::Pass;
use crate::Result;

/// Eliminates `in -> op -> out` chains where `op` is a pass-through.
pub struct IdentityEliminationPass {
    op_types: Vec<String>,
}

impl IdentityEliminationPass {
    pub fn new() -> Self {
        Self::with_op_types(["identity"])
    }

    /// Treat the given operator types as pass-throughs.
    pub fn with_op_types(op_types: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { op_types: op_types.into_iter().map(Into::into).collect() }
    }
}

impl Default for IdentityEliminationPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Fuser for IdentityEliminationPass {
    fn name(&self) -> &str {
        "identity_elimination"
    }

    fn build_pattern(&self, pattern: &mut Pattern) -> plume_ir::Result<()> {
        let input = pattern.new_var_node("input")?;
        let op = pattern.new_op_node("op")?;
        let output = pattern.new_var_node("output")?;
        pattern.node_mut(op).add_assert(helpers::stmt_op_type_in(self.op_types.clone()))?.as_intermediate();
        pattern.node_mut(input).as_input();
        pattern.node_mut(output).as_output();
        pattern.add_edge(input, op)?;
        pattern.add_edge(op, output)?;
        Ok(())
    }

    fn rewrite(&self, subgraph: &Match, pattern: &Pattern, graph: &mut Graph) -> plume_ir::Result<()> {
        let input = subgraph.node(required_node(pattern, "input")?);
        let op = subgraph.node(required_node(pattern, "op")?);
        let output = subgraph.node(required_node(pattern, "output")?);

        // The output argument goes away, so it must have no producer other
        // than the eliminated op; otherwise leave this occurrence alone.
        if graph.inputs(output)? != [op] {
            return Ok(());
        }

        let in_name = graph.node(input)?.arg()?.name.clone();
        let out_name = graph.node(output)?.arg()?.name.clone();

        // Splice every consumer of the output onto the input argument.
        let consumers = graph.outputs(output)?.to_vec();
        for consumer in consumers {
            graph.remove_edge(output, consumer)?;
            graph.add_edge(input, consumer)?;
            graph.node_mut(consumer)?.as_stmt()?.op.op_info_mut().update_all_inputs(&out_name, &in_name);
        }

        graph.remove_node(op)?;
        graph.remove_node(output)?;
        Ok(())
    }
}

impl Pass for IdentityEliminationPass {
    fn name(&self) -> &str {
        Fuser::name(self)
    }

    fn apply(&self, graph: &mut Graph) -> Result<()> {
        Fuser::apply(self, graph).map(drop)
    }
}
