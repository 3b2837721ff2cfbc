//! Concrete optimization passes.

pub mod activation_fusion;
pub mod identity_elimination;
pub mod static_kernel_pick;

pub use activation_fusion::ActivationFusionPass;
pub use identity_elimination::IdentityEliminationPass;
pub use static_kernel_pick::StaticKernelPickPass;
