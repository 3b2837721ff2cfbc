//! Mutable intermediate representation (MIR) for plume.
//!
//! The IR is a directed acyclic multigraph over two node roles: *statements*
//! (an operator plus the kernels resolved for it) and *arguments* (named
//! tensor variables). Edges run operator -> argument for outputs and
//! argument -> operator for inputs.
//!
//! # Module Organization
//!
//! - [`node`] - the Statement/Argument node sum type with set-once roles
//! - [`graph`] - the arena-backed graph and its mutation primitives
//! - [`pattern`] - declarative subgraph patterns and the matcher that finds
//!   and rewrites their embeddings
//! - [`error`] - error types and result handling

pub mod error;
pub mod graph;
pub mod node;
pub mod pattern;

#[cfg(test)]
pub mod test;

pub use error::{Error, Result};
pub use graph::{Graph, NodeId};
pub use node::{Arg, Node, NodeKind, Stmt};
pub use pattern::{helpers, Match, Pattern, PatternKind, PatternMatcher, PatternNode, PatternNodeId, PatternRole, Teller};
