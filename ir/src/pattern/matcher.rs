//! Subgraph pattern matcher.
//!
//! Finds every valid embedding of a [`Pattern`] in a [`Graph`] and invokes
//! a caller-supplied rewrite handler per surviving match. The algorithm:
//!
//! 1. *Candidate marking* - per pattern node, collect the IR nodes its
//!    teller accepts. Any empty set makes the pattern unmatchable.
//! 2. *Embedding enumeration* - backtracking assignment of pattern nodes
//!    (declaration order) to candidates (graph insertion order), requiring
//!    a graph edge for every pattern edge and pairwise-distinct nodes.
//! 3. *Deduplication* - embeddings assigning the identical pattern-node to
//!    IR-node pairs are one match.
//! 4. *Overlap resolution* - matches sharing an IR node that is
//!    intermediate in either match conflict; the first-discovered match
//!    wins and later ones are dropped.
//! 5. *Boundary validation* - an intermediate node's edges must all stay
//!    inside its match; matches leaking an intermediate edge are silently
//!    discarded.
//! 6. *Handler invocation* - surviving matches are handed to the rewrite
//!    handler in discovery order. The matcher itself never mutates the
//!    graph.
//!
//! The fixed enumeration orders make steps 1-5 deterministic for a given
//! graph, so repeated optimization runs produce identical output.

use std::collections::HashSet;

use crate::error::Result;
use crate::graph::{Graph, NodeId};

use super::{Pattern, PatternNodeId};

/// One embedding: an IR node per pattern node, satisfying every pattern
/// edge. Transient; produced and consumed within one matcher run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    assignment: Vec<NodeId>,
}

impl Match {
    /// The IR node a pattern node was bound to.
    pub fn node(&self, id: PatternNodeId) -> NodeId {
        self.assignment[id.index()]
    }

    /// All bound IR nodes, in pattern declaration order.
    pub fn nodes(&self) -> &[NodeId] {
        &self.assignment
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.assignment.contains(&id)
    }

    /// Whether every bound node is still live. Handlers running after an
    /// earlier match rewrote the graph use this to skip stale matches.
    pub fn is_live(&self, graph: &Graph) -> bool {
        self.assignment.iter().all(|&id| graph.contains(id))
    }
}

/// Generic matcher binding one pattern to rewrite invocations.
pub struct PatternMatcher {
    pattern: Pattern,
}

impl PatternMatcher {
    pub fn new(pattern: Pattern) -> Self {
        Self { pattern }
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn pattern_mut(&mut self) -> &mut Pattern {
        &mut self.pattern
    }

    /// Find all surviving matches without rewriting.
    ///
    /// Candidate enumeration walks pattern nodes in declaration order and
    /// graph nodes in insertion order, so discovery order - and with it the
    /// first-found-wins overlap tie-break - is deterministic.
    pub fn find_matches(&self, graph: &Graph) -> Vec<Match> {
        if self.pattern.is_empty() {
            return Vec::new();
        }

        let Some(candidates) = self.mark_candidates(graph) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        let mut assignment = Vec::with_capacity(self.pattern.len());
        self.enumerate(graph, &candidates, &mut assignment, &mut found);

        self.dedup(&mut found);
        self.resolve_overlaps(&mut found);
        found.retain(|subgraph| self.boundary_ok(graph, subgraph));
        found
    }

    /// Find matches, then invoke `handler` once per match in discovery
    /// order. Returns the number of matches handled.
    pub fn run(&self, graph: &mut Graph, mut handler: impl FnMut(&Match, &mut Graph) -> Result<()>) -> Result<usize> {
        let matches = self.find_matches(graph);
        for subgraph in &matches {
            handler(subgraph, graph)?;
        }
        Ok(matches.len())
    }

    /// Step 1: per pattern node, the IR nodes its teller accepts.
    ///
    /// Returns `None` when some pattern node has no candidates at all, which
    /// short-circuits the whole pattern to "no match".
    fn mark_candidates(&self, graph: &Graph) -> Option<Vec<Vec<NodeId>>> {
        let mut candidates = Vec::with_capacity(self.pattern.len());
        for (_, pnode) in self.pattern.nodes() {
            let marked: Vec<NodeId> = graph
                .iter()
                .filter(|(_, node)| pnode.tell(node))
                .map(|(id, _)| id)
                .collect();
            if marked.is_empty() {
                tracing::debug!(pattern_node = pnode.identity(), "no candidates; pattern cannot match");
                return None;
            }
            candidates.push(marked);
        }
        Some(candidates)
    }

    /// Step 2: depth-first assignment with edge checks at every extension.
    fn enumerate(&self, graph: &Graph, candidates: &[Vec<NodeId>], assignment: &mut Vec<NodeId>, out: &mut Vec<Match>) {
        let depth = assignment.len();
        if depth == candidates.len() {
            out.push(Match { assignment: assignment.clone() });
            return;
        }

        'candidate: for &node in &candidates[depth] {
            if assignment.contains(&node) {
                continue;
            }
            for &(from, to) in self.pattern.edges() {
                let Some((src, dst)) = Self::edge_endpoints(from, to, depth, node, assignment) else {
                    continue;
                };
                if !graph.has_edge(src, dst) {
                    continue 'candidate;
                }
            }
            assignment.push(node);
            self.enumerate(graph, candidates, assignment, out);
            assignment.pop();
        }
    }

    /// Resolve a pattern edge to IR endpoints if both ends are assigned,
    /// counting the node currently being placed at `depth`.
    fn edge_endpoints(
        from: PatternNodeId,
        to: PatternNodeId,
        depth: usize,
        placing: NodeId,
        assignment: &[NodeId],
    ) -> Option<(NodeId, NodeId)> {
        let resolve = |id: PatternNodeId| {
            if id.index() == depth {
                Some(placing)
            } else {
                assignment.get(id.index()).copied()
            }
        };
        // Only edges whose later endpoint is the node being placed are new;
        // earlier-only edges were checked at a previous depth.
        if from.index() != depth && to.index() != depth {
            return None;
        }
        Some((resolve(from)?, resolve(to)?))
    }

    /// Step 3: drop embeddings assigning the identical set of
    /// (pattern node, IR node) pairs. Two embeddings over the same node set
    /// with different assignments are distinct matches.
    fn dedup(&self, matches: &mut Vec<Match>) {
        let mut seen: HashSet<Vec<NodeId>> = HashSet::new();
        matches.retain(|subgraph| seen.insert(subgraph.assignment.clone()));
    }

    /// Step 4: first-found-wins on nodes intermediate in either match.
    fn resolve_overlaps(&self, matches: &mut Vec<Match>) {
        let mut claimed: HashSet<NodeId> = HashSet::new();
        let mut claimed_intermediate: HashSet<NodeId> = HashSet::new();
        matches.retain(|subgraph| {
            let conflicting = subgraph.assignment.iter().enumerate().any(|(idx, node)| {
                let intermediate = self.pattern.node(PatternNodeId(idx)).is_intermediate();
                (intermediate && claimed.contains(node)) || claimed_intermediate.contains(node)
            });
            if conflicting {
                return false;
            }
            for (idx, &node) in subgraph.assignment.iter().enumerate() {
                claimed.insert(node);
                if self.pattern.node(PatternNodeId(idx)).is_intermediate() {
                    claimed_intermediate.insert(node);
                }
            }
            true
        });
    }

    /// Step 5: every edge of an intermediate node must stay inside the
    /// match. Violations are expected and filtered silently.
    fn boundary_ok(&self, graph: &Graph, subgraph: &Match) -> bool {
        for (idx, &node) in subgraph.assignment.iter().enumerate() {
            if !self.pattern.node(PatternNodeId(idx)).is_intermediate() {
                continue;
            }
            let (Ok(ins), Ok(outs)) = (graph.inputs(node), graph.outputs(node)) else {
                return false;
            };
            if ins.iter().chain(outs).any(|&neighbor| !subgraph.contains(neighbor)) {
                return false;
            }
        }
        true
    }

    /// Diagnostic view: which IR nodes a given pattern node would accept.
    pub fn candidates_of(&self, graph: &Graph, id: PatternNodeId) -> Vec<NodeId> {
        let pnode = self.pattern.node(id);
        graph.iter().filter(|(_, node)| pnode.tell(node)).map(|(node_id, _)| node_id).collect()
    }
}
