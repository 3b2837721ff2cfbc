//! Kernel capability interface.
//!
//! A kernel is the concrete, placement-specific implementation of one
//! operator. The numeric body lives behind [`KernelImpl`]; the [`Kernel`]
//! wrapper carries the registry identity (op type, alias, place) and the
//! per-instance state bound at attach time (execution context and parameter
//! block). A kernel leaves the selector fully initialized or not at all.

use plume_place::{serialize_kernel_type, Place};

use crate::context::Context;
use crate::error::{ContextUnboundSnafu, ParamUnboundSnafu, Result};
use crate::op_info::{AttrValue, OpInfo};
use snafu::OptionExt;
use std::collections::BTreeMap;

/// Parameter block handed to a kernel at launch.
///
/// A flattened snapshot of the operator descriptor: resolved input/output
/// variable names plus the attribute map. Typed per-op parameter structs are
/// the kernels' own business.
#[derive(Debug, Clone, Default)]
pub struct OpParam {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub attrs: BTreeMap<String, AttrValue>,
}

impl OpParam {
    pub fn from_op_info(op_info: &OpInfo) -> Self {
        Self {
            inputs: op_info.input_names(),
            outputs: op_info.output_names(),
            attrs: op_info.attrs().clone(),
        }
    }
}

/// The capability every concrete kernel implements.
///
/// One implementing type exists per (target, precision, layout, op)
/// combination; instances are produced by registry factories and dispatched
/// dynamically.
pub trait KernelImpl: std::fmt::Debug + Send {
    fn run(&mut self, ctx: &mut Context, param: &OpParam) -> Result<()>;
}

/// A registered kernel instance.
#[derive(Debug)]
pub struct Kernel {
    op_type: String,
    alias: String,
    place: Place,
    context: Option<Context>,
    param: Option<OpParam>,
    imp: Box<dyn KernelImpl>,
}

impl Kernel {
    pub fn new(op_type: impl Into<String>, alias: impl Into<String>, place: Place, imp: Box<dyn KernelImpl>) -> Self {
        Self { op_type: op_type.into(), alias: alias.into(), place, context: None, param: None, imp }
    }

    pub fn op_type(&self) -> &str {
        &self.op_type
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn place(&self) -> Place {
        self.place
    }

    pub fn set_context(&mut self, context: Context) {
        self.context = Some(context);
    }

    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&Context> {
        self.context.as_ref()
    }

    pub fn set_param(&mut self, param: OpParam) {
        self.param = Some(param);
    }

    pub fn has_param(&self) -> bool {
        self.param.is_some()
    }

    /// The serialized kernel-type string this kernel is addressable by.
    pub fn summary(&self) -> String {
        serialize_kernel_type(&self.op_type, &self.alias, self.place)
    }

    /// Run the kernel body. Context and parameter block must have been bound
    /// at attach time.
    pub fn launch(&mut self) -> Result<()> {
        let summary = self.summary();
        let context = self.context.as_mut().context(ContextUnboundSnafu { kernel: summary.clone() })?;
        let param = self.param.as_ref().context(ParamUnboundSnafu { kernel: summary })?;
        self.imp.run(context, param)
    }
}

impl std::fmt::Display for Kernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.summary())
    }
}
