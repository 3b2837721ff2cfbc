//! Kernel resolution runtime for plume.
//!
//! This crate owns everything between an abstract operator and the concrete
//! kernel that will execute it:
//!
//! - [`registry`] - the process-wide kernel catalog keyed by
//!   (operator type, [`Place`](plume_place::Place))
//! - [`kernel`] - the kernel capability interface and the value type the
//!   registry hands out
//! - [`op`] - the kernel selector: wildcard placement expansion, registry
//!   queries, and static kernel binding
//! - [`context`] - per-target execution resource bundles
//! - [`scope`] - the name -> variable store argument nodes resolve against
//! - [`op_info`] - the operator descriptor (argument groups + attributes)
//!
//! Registration happens once, at process initialization, through
//! [`registry::register_reference_kernels`] or an equivalent single entry
//! point. After that the registry is read-only and lookups take the shared
//! lock path.

pub mod context;
pub mod error;
pub mod kernel;
pub mod op;
pub mod op_info;
pub mod registry;
pub mod scope;

#[cfg(test)]
pub mod test;

pub use context::Context;
pub use error::{Error, Result};
pub use kernel::{Kernel, KernelImpl, OpParam};
pub use op::Operator;
pub use op_info::{AttrValue, OpInfo};
pub use registry::{KernelFactory, KernelRegistry, global, register_reference_kernels};
pub use scope::{Scope, Variable};
