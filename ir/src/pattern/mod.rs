//! Declarative subgraph patterns over the IR.
//!
//! A [`Pattern`] is a small template graph: nodes carry a predicate
//! ("teller") deciding which IR nodes they may stand for, a kind (operator
//! or variable) and a role (input/output boundary or intermediate), wired
//! together by directed edges. The [`PatternMatcher`] finds every valid,
//! non-overlapping, role-consistent embedding of a pattern in an IR graph
//! and hands each one to a caller-supplied rewrite handler.
//!
//! Patterns are built once per optimization pass and are immutable once
//! matching begins.
//!
//! # Example
//!
//! ```ignore
//! let mut pattern = Pattern::new();
//! let x = pattern.new_var_node("x")?;
//! let relu = pattern.new_op_node("relu")?;
//! let y = pattern.new_var_node("y")?;
//! pattern.node_mut(relu).add_assert(helpers::stmt_op_type("relu"))?.as_intermediate();
//! pattern.node_mut(x).as_input();
//! pattern.node_mut(y).as_output();
//! pattern.add_edge(x, relu)?;
//! pattern.add_edge(relu, y)?;
//!
//! let matcher = PatternMatcher::new(pattern);
//! matcher.run(&mut graph, |subgraph, graph| { /* rewrite */ Ok(()) })?;
//! ```

pub mod helpers;
pub mod matcher;
pub mod node;

pub use matcher::{Match, PatternMatcher};
pub use node::{PatternKind, PatternNode, PatternRole, Teller};

use std::collections::HashMap;

use crate::error::{DuplicatePatternNodeSnafu, PatternSelfEdgeSnafu, Result, UnknownPatternNodeSnafu};

/// Handle of one node within its owning [`Pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatternNodeId(pub(crate) usize);

impl PatternNodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for PatternNodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// A template subgraph: pattern nodes plus directed edges between them.
///
/// Edges are pattern-level metadata; a pattern node has no notion of its
/// own edges beyond what the owning pattern records.
#[derive(Default)]
pub struct Pattern {
    nodes: Vec<PatternNode>,
    edges: Vec<(PatternNodeId, PatternNodeId)>,
    index: HashMap<String, PatternNodeId>,
}

impl Pattern {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern node standing for a statement.
    pub fn new_op_node(&mut self, identity: impl Into<String>) -> Result<PatternNodeId> {
        self.insert(identity.into(), PatternKind::Op)
    }

    /// Add a pattern node standing for an argument.
    pub fn new_var_node(&mut self, identity: impl Into<String>) -> Result<PatternNodeId> {
        self.insert(identity.into(), PatternKind::Var)
    }

    /// Add an operator pattern node with a generated identity.
    pub fn anon_op_node(&mut self) -> PatternNodeId {
        let identity = self.anon_identity();
        self.insert_unchecked(identity, PatternKind::Op)
    }

    /// Add a variable pattern node with a generated identity.
    pub fn anon_var_node(&mut self) -> PatternNodeId {
        let identity = self.anon_identity();
        self.insert_unchecked(identity, PatternKind::Var)
    }

    fn anon_identity(&self) -> String {
        let mut n = self.nodes.len();
        loop {
            let identity = format!("pnode-{n}");
            if !self.index.contains_key(&identity) {
                return identity;
            }
            n += 1;
        }
    }

    fn insert(&mut self, identity: String, kind: PatternKind) -> Result<PatternNodeId> {
        snafu::ensure!(!self.index.contains_key(&identity), DuplicatePatternNodeSnafu { identity });
        Ok(self.insert_unchecked(identity, kind))
    }

    fn insert_unchecked(&mut self, identity: String, kind: PatternKind) -> PatternNodeId {
        let id = PatternNodeId(self.nodes.len());
        self.index.insert(identity.clone(), id);
        self.nodes.push(PatternNode::new(identity, kind));
        id
    }

    /// Look up a node by identity.
    pub fn retrieve(&self, identity: &str) -> Option<PatternNodeId> {
        self.index.get(identity).copied()
    }

    /// Access a node. Ids come from this pattern's `new_*_node` calls.
    pub fn node(&self, id: PatternNodeId) -> &PatternNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: PatternNodeId) -> &mut PatternNode {
        &mut self.nodes[id.0]
    }

    /// Record the directed pattern edge `from -> to`.
    pub fn add_edge(&mut self, from: PatternNodeId, to: PatternNodeId) -> Result<()> {
        snafu::ensure!(from.0 < self.nodes.len(), UnknownPatternNodeSnafu { id: from.0 });
        snafu::ensure!(to.0 < self.nodes.len(), UnknownPatternNodeSnafu { id: to.0 });
        snafu::ensure!(from != to, PatternSelfEdgeSnafu { identity: self.node(from).identity() });
        self.edges.push((from, to));
        Ok(())
    }

    /// Nodes in declaration order; the matcher assigns them in this order.
    pub fn nodes(&self) -> impl Iterator<Item = (PatternNodeId, &PatternNode)> {
        self.nodes.iter().enumerate().map(|(idx, node)| (PatternNodeId(idx), node))
    }

    pub fn edges(&self) -> &[(PatternNodeId, PatternNodeId)] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl std::fmt::Debug for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pattern")
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish()
    }
}
