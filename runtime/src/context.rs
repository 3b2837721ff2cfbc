//! Per-target execution contexts.
//!
//! A [`Context`] bundles the device-side resources one kernel instance needs
//! to launch (streams, handles, scratch space). The selector only creates
//! and hands these over; what a kernel does with its context is backend
//! business.

use plume_place::TargetType;

use crate::error::{Result, UnsupportedTargetSnafu};

/// Resource bundle for host-side kernels.
///
/// Host kernels share nothing across instances, so this only carries a
/// reusable scratch buffer grown on demand.
#[derive(Debug, Default)]
pub struct HostContext {
    scratch: Vec<u8>,
}

impl HostContext {
    /// Scratch space of at least `bytes`, reused across launches.
    pub fn workspace(&mut self, bytes: usize) -> &mut [u8] {
        if self.scratch.len() < bytes {
            self.scratch.resize(bytes, 0);
        }
        &mut self.scratch[..bytes]
    }
}

/// Resource bundle for ARM kernels. Thread count is a hint for the external
/// executor; zero means "pick a default".
#[derive(Debug, Default)]
pub struct ArmContext {
    pub threads: usize,
}

/// Per-kernel, per-target execution resources.
///
/// One context is created per kernel instance at attach time and dropped
/// with it. Targets without linked driver support are rejected here, which
/// keeps "registered a kernel for a target this build cannot run" a
/// load-time configuration error.
#[derive(Debug)]
pub enum Context {
    Host(HostContext),
    X86(HostContext),
    Arm(ArmContext),
}

impl Context {
    pub fn for_target(target: TargetType) -> Result<Self> {
        match target {
            TargetType::Host => Ok(Self::Host(HostContext::default())),
            TargetType::X86 => Ok(Self::X86(HostContext::default())),
            TargetType::Arm => Ok(Self::Arm(ArmContext::default())),
            // No CUDA driver linked in this build; Any/Unk never identify a
            // concrete execution environment.
            TargetType::Cuda | TargetType::Any | TargetType::Unk => {
                UnsupportedTargetSnafu { target }.fail()
            }
        }
    }

    pub fn target(&self) -> TargetType {
        match self {
            Self::Host(_) => TargetType::Host,
            Self::X86(_) => TargetType::X86,
            Self::Arm(_) => TargetType::Arm,
        }
    }
}
