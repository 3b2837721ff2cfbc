//! Process-wide kernel registry.
//!
//! Maps (operator type, [`Place`]) to the factories that produce kernel
//! instances for that key. Registration is append-only, unique per
//! (op type, alias, place), and happens once at initialization through a
//! designated entry point; lookups afterwards take the shared read path.
//!
//! # Example
//!
//! ```ignore
//! let registry = plume_runtime::global();
//! plume_runtime::register_reference_kernels(registry)?;
//! let kernels = registry.create("relu", Place::new(Host, Any, Any));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use plume_place::{DataLayoutType, Place, PrecisionType, TargetType};

use crate::context::Context;
use crate::error::{DuplicateKernelSnafu, Result};
use crate::kernel::{Kernel, KernelImpl, OpParam};

/// Factory producing a fresh kernel body per call.
pub type KernelFactory = Arc<dyn Fn() -> Box<dyn KernelImpl> + Send + Sync>;

struct Entry {
    alias: String,
    factory: KernelFactory,
}

/// Catalog of kernel factories keyed by (operator type, place).
///
/// # Thread Safety
///
/// Register takes the write lock, create the read lock. Registration is
/// rare and one-shot; lookup is the hot path during model preparation.
pub struct KernelRegistry {
    kernels: RwLock<HashMap<(String, Place), Vec<Entry>>>,
}

impl KernelRegistry {
    pub fn new() -> Self {
        Self { kernels: RwLock::new(HashMap::new()) }
    }

    /// Register a kernel factory under (op type, alias, place).
    ///
    /// Registering the same triple twice is a fatal configuration error;
    /// alias variants of one (op type, place) key coexist.
    pub fn register(&self, op_type: &str, alias: &str, place: Place, factory: KernelFactory) -> Result<()> {
        let mut kernels = self.kernels.write();
        let entries = kernels.entry((op_type.to_string(), place)).or_default();
        snafu::ensure!(
            entries.iter().all(|entry| entry.alias != alias),
            DuplicateKernelSnafu { op_type, alias, place }
        );
        tracing::debug!(op_type, alias, %place, "register kernel");
        entries.push(Entry { alias: alias.to_string(), factory });
        Ok(())
    }

    /// Instantiate every kernel registered at exactly (op type, place).
    ///
    /// Zero matches is a valid result; wildcard widening is the caller's
    /// job and happens before this lookup. Instances come back in
    /// registration order.
    pub fn create(&self, op_type: &str, place: Place) -> Vec<Kernel> {
        let kernels = self.kernels.read();
        let Some(entries) = kernels.get(&(op_type.to_string(), place)) else {
            return Vec::new();
        };
        entries
            .iter()
            .map(|entry| Kernel::new(op_type, entry.alias.clone(), place, (entry.factory)()))
            .collect()
    }

    /// Whether any place is registered for the operator type.
    pub fn has_op_type(&self, op_type: &str) -> bool {
        self.kernels.read().keys().any(|(op, _)| op == op_type)
    }

    /// Number of registered (op type, place) keys.
    pub fn len(&self) -> usize {
        self.kernels.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.kernels.read().is_empty()
    }
}

impl Default for KernelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global kernel registry instance.
static KERNEL_REGISTRY: Lazy<KernelRegistry> = Lazy::new(KernelRegistry::new);

/// Get the global kernel registry.
pub fn global() -> &'static KernelRegistry {
    &KERNEL_REGISTRY
}

/// Generic host fallback kernel.
///
/// Stands in for the numeric reference implementations, which live outside
/// this crate; the body only checks its wiring and reports the launch.
#[derive(Debug, Default)]
pub struct ReferenceKernel;

impl KernelImpl for ReferenceKernel {
    fn run(&mut self, ctx: &mut Context, param: &OpParam) -> Result<()> {
        tracing::trace!(
            target = %ctx.target(),
            inputs = param.inputs.len(),
            outputs = param.outputs.len(),
            "reference kernel launch"
        );
        Ok(())
    }
}

/// Operator types the reference backend covers.
const REFERENCE_OPS: &[&str] = &["add", "mul", "relu", "conv2d", "fc", "softmax", "identity"];

/// Register the built-in host reference kernels.
///
/// This is the designated one-shot initialization entry point: call it once
/// before any graph work. Reference kernels are registered at
/// `host:any:any`, so they back-fill every host-side request regardless of
/// precision and layout.
pub fn register_reference_kernels(registry: &KernelRegistry) -> Result<()> {
    let place = Place::new(TargetType::Host, PrecisionType::Any, DataLayoutType::Any);
    for op_type in REFERENCE_OPS {
        registry.register(op_type, "ref", place, Arc::new(|| Box::new(ReferenceKernel)))?;
    }
    Ok(())
}
