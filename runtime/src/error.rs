//! Error types for kernel resolution.

use plume_place::{Place, TargetType};
use snafu::Snafu;

/// Result type for runtime operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors that can occur while resolving or launching kernels.
///
/// Everything here is a configuration error in the sense of the
/// model-preparation phase: these surface once, at load time, and indicate a
/// registration or wiring bug rather than a per-request condition.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// The same (op type, alias, place) key was registered twice.
    #[snafu(display("duplicate kernel registration: {op_type}/{alias}/{place}"))]
    DuplicateKernel { op_type: String, alias: String, place: Place },

    /// A caller-specified kernel type resolved to nothing.
    #[snafu(display("no kernel registered for kernel type {kernel_type:?}"))]
    NoKernelForType { kernel_type: String },

    /// Static binding found zero viable kernels.
    #[snafu(display("no viable kernel for op {op_type:?} among requested places {places:?}"))]
    NoViableKernel { op_type: String, places: Vec<Place> },

    /// Selector used before its operator type was set.
    #[snafu(display("operator type is not set"))]
    MissingOpType,

    /// No execution context implementation for the target.
    #[snafu(display("target {target} has no execution context support"))]
    UnsupportedTarget { target: TargetType },

    /// Kernel launched before a context was bound.
    #[snafu(display("kernel {kernel} launched without a bound context"))]
    ContextUnbound { kernel: String },

    /// Kernel launched before its parameter block was attached.
    #[snafu(display("kernel {kernel} launched without an attached parameter block"))]
    ParamUnbound { kernel: String },

    /// Operator ran without a statically bound kernel.
    #[snafu(display("op {op_type:?} has no kernel bound"))]
    NoKernelBound { op_type: String },

    /// An input variable did not resolve in the scope.
    #[snafu(display("no variable called {name:?} in scope"))]
    VariableNotFound { name: String },

    /// Kernel-type string failed to parse.
    #[snafu(display("invalid kernel type: {source}"))]
    KernelType { source: plume_place::Error },
}
