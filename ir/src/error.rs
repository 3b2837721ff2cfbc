use snafu::Snafu;

use crate::graph::NodeId;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// A node's role is fixed by its first `as_stmt`/`as_arg` call; the
    /// other accessor is a contract violation afterwards.
    #[snafu(display("node role mismatch: node is {actual}, accessed as {requested}"))]
    RoleMismatch { requested: &'static str, actual: &'static str },

    /// Node id out of range or already removed from its graph.
    #[snafu(display("unknown or removed node {id}"))]
    UnknownNode { id: NodeId },

    #[snafu(display("self edge on node {id}"))]
    SelfEdge { id: NodeId },

    #[snafu(display("no edge {from} -> {to}"))]
    EdgeNotFound { from: NodeId, to: NodeId },

    /// Graph validation found a cycle.
    #[snafu(display("graph contains a cycle: {remaining} of {total} nodes could not be ordered"))]
    Cyclic { remaining: usize, total: usize },

    /// Graph validation found two argument nodes sharing a name.
    #[snafu(display("duplicate argument name {name:?}"))]
    DuplicateArgument { name: String },

    /// An edge must join a statement and an argument.
    #[snafu(display("edge {from} -> {to} does not join a statement and an argument"))]
    MalformedEdge { from: NodeId, to: NodeId },

    /// Pattern node identities are unique within one pattern.
    #[snafu(display("duplicate pattern node identity {identity:?}"))]
    DuplicatePatternNode { identity: String },

    /// A pattern node is configured either with one teller or with a list of
    /// assertions, never both.
    #[snafu(display("pattern node {identity:?} mixes a single teller with assertion tellers"))]
    MixedTellerConfig { identity: String },

    #[snafu(display("pattern node {identity:?} already has a teller installed"))]
    TellerAlreadySet { identity: String },

    #[snafu(display("pattern node id {id} does not belong to this pattern"))]
    UnknownPatternNode { id: usize },

    #[snafu(display("no pattern node with identity {identity:?}"))]
    PatternNodeNotFound { identity: String },

    #[snafu(display("self edge on pattern node {identity:?}"))]
    PatternSelfEdge { identity: String },

    /// Selector/kernel errors raised inside rewrite handlers or node setup.
    #[snafu(display("kernel resolution failed: {source}"))]
    Runtime { source: plume_runtime::Error },
}
