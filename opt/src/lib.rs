//! Optimization passes for the plume IR.
//!
//! A pass takes the mutable graph, rewrites it, and leaves it valid; the
//! [`PassManager`] runs a sequence of passes and re-validates the graph
//! after each one. Pattern-based rewrites implement [`Fuser`], which wires
//! a declarative [`Pattern`](plume_ir::Pattern) to a per-match rewrite.
//!
//! # Module Organization
//!
//! - [`pass`] - the `Pass` trait and the driving `PassManager`
//! - [`fuser`] - base for pattern-matcher-driven rewrite passes
//! - [`passes`] - the concrete passes: identity elimination, activation
//!   fusion, static kernel picking

pub mod error;
pub mod fuser;
pub mod pass;
pub mod passes;

#[cfg(test)]
pub mod test;

pub use error::{Error, Result};
pub use fuser::Fuser;
pub use pass::{Pass, PassManager};
pub use passes::{ActivationFusionPass, IdentityEliminationPass, StaticKernelPickPass};
