//! The mutable IR graph.
//!
//! Nodes live in a graph-owned arena addressed by stable [`NodeId`]
//! indices. Removal tombstones the slot and never reuses the index within
//! one graph's lifetime, so ids held by rewrite handlers cannot start
//! pointing at unrelated nodes.
//!
//! Mutation primitives do local bookkeeping only; global invariants
//! (acyclicity, argument-name uniqueness, statement/argument edge
//! alternation) are restored by the pass driver through [`Graph::validate`]
//! after every rewrite pass.

use std::collections::VecDeque;

use plume_runtime::{Kernel, Operator};
use smallvec::SmallVec;

use crate::error::{
    CyclicSnafu, DuplicateArgumentSnafu, EdgeNotFoundSnafu, MalformedEdgeSnafu, Result, SelfEdgeSnafu,
    UnknownNodeSnafu,
};
use crate::node::Node;

/// Stable handle of one node within its owning [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

#[derive(Debug)]
struct Slot {
    node: Node,
    ins: SmallVec<[NodeId; 4]>,
    outs: SmallVec<[NodeId; 4]>,
}

/// Directed acyclic multigraph of statement and argument nodes.
#[derive(Debug, Default)]
pub struct Graph {
    slots: Vec<Option<Slot>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, id: NodeId) -> Result<&Slot> {
        self.slots
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or_else(|| UnknownNodeSnafu { id }.build())
    }

    fn slot_mut(&mut self, id: NodeId) -> Result<&mut Slot> {
        self.slots
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or_else(|| UnknownNodeSnafu { id }.build())
    }

    /// Insert a node, returning its stable id.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Some(Slot { node, ins: SmallVec::new(), outs: SmallVec::new() }));
        id
    }

    /// Insert a role-less node.
    pub fn new_node(&mut self) -> NodeId {
        self.add_node(Node::new())
    }

    pub fn new_arg_node(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(Node::new_arg(name))
    }

    pub fn new_stmt_node(&mut self, op_type: impl Into<String>, valid_kernels: Vec<Kernel>, op: Operator) -> NodeId {
        self.add_node(Node::new_stmt(op_type, valid_kernels, op))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.slots.get(id.index()).is_some_and(Option::is_some)
    }

    pub fn node(&self, id: NodeId) -> Result<&Node> {
        Ok(&self.slot(id)?.node)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        Ok(&mut self.slot_mut(id)?.node)
    }

    /// Add a directed edge. Parallel edges are allowed; self edges are not.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        snafu::ensure!(from != to, SelfEdgeSnafu { id: from });
        // Validate both endpoints before touching either adjacency list.
        self.slot(from)?;
        self.slot(to)?;
        self.slot_mut(from)?.outs.push(to);
        self.slot_mut(to)?.ins.push(from);
        Ok(())
    }

    /// Remove one instance of the edge `from -> to`.
    pub fn remove_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let out_pos = self.slot(from)?.outs.iter().position(|&id| id == to);
        let Some(out_pos) = out_pos else {
            return EdgeNotFoundSnafu { from, to }.fail();
        };
        self.slot_mut(from)?.outs.remove(out_pos);

        let in_pos = self.slot(to)?.ins.iter().position(|&id| id == from);
        let Some(in_pos) = in_pos else {
            return EdgeNotFoundSnafu { from, to }.fail();
        };
        self.slot_mut(to)?.ins.remove(in_pos);
        Ok(())
    }

    /// Remove a node and all incident edges, tombstoning its slot.
    pub fn remove_node(&mut self, id: NodeId) -> Result<()> {
        let slot = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .ok_or_else(|| UnknownNodeSnafu { id }.build())?;
        for pred in slot.ins {
            if let Ok(pred_slot) = self.slot_mut(pred) {
                pred_slot.outs.retain(|out| *out != id);
            }
        }
        for succ in slot.outs {
            if let Ok(succ_slot) = self.slot_mut(succ) {
                succ_slot.ins.retain(|inp| *inp != id);
            }
        }
        Ok(())
    }

    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.slot(from).is_ok_and(|slot| slot.outs.contains(&to))
    }

    /// Predecessors of `id`, one entry per edge instance.
    pub fn inputs(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.slot(id)?.ins)
    }

    /// Successors of `id`, one entry per edge instance.
    pub fn outputs(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(&self.slot(id)?.outs)
    }

    /// Live nodes in insertion order. This is the graph traversal order the
    /// pattern matcher's determinism guarantee is defined over.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| slot.as_ref().map(|slot| (NodeId(idx as u32), &slot.node)))
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the argument node carrying `name`.
    pub fn retrieve_arg(&self, name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.arg().map(|arg| arg.name == name).unwrap_or(false))
            .map(|(id, _)| id)
    }

    /// Kahn topological order over live nodes; the order the execution
    /// driver launches kernels in.
    pub fn topological_order(&self) -> Result<Vec<NodeId>> {
        let total = self.len();
        let mut indegree = vec![0usize; self.slots.len()];
        let mut ready = VecDeque::new();
        for (id, _) in self.iter() {
            let degree = self.slot(id)?.ins.len();
            indegree[id.index()] = degree;
            if degree == 0 {
                ready.push_back(id);
            }
        }

        let mut order = Vec::with_capacity(total);
        while let Some(id) = ready.pop_front() {
            order.push(id);
            for &succ in &self.slot(id)?.outs {
                let degree = &mut indegree[succ.index()];
                *degree -= 1;
                if *degree == 0 {
                    ready.push_back(succ);
                }
            }
        }

        snafu::ensure!(order.len() == total, CyclicSnafu { remaining: total - order.len(), total });
        Ok(order)
    }

    /// Argument names must be unique within the graph's scope.
    pub fn check_arg_names_unique(&self) -> Result<()> {
        let mut seen = std::collections::HashSet::new();
        for (_, node) in self.iter() {
            if let Ok(arg) = node.arg()
                && !seen.insert(arg.name.as_str())
            {
                return DuplicateArgumentSnafu { name: arg.name.clone() }.fail();
            }
        }
        Ok(())
    }

    /// Every edge must join a statement and an argument, in either
    /// direction.
    pub fn check_edge_roles(&self) -> Result<()> {
        for (from, node) in self.iter() {
            for &to in &self.slot(from)?.outs {
                let joined = node.is_stmt() && self.node(to)?.is_arg()
                    || node.is_arg() && self.node(to)?.is_stmt();
                snafu::ensure!(joined, MalformedEdgeSnafu { from, to });
            }
        }
        Ok(())
    }

    /// Full structural validation, run by the pass driver after each pass.
    pub fn validate(&self) -> Result<()> {
        self.topological_order()?;
        self.check_arg_names_unique()?;
        self.check_edge_roles()
    }
}
