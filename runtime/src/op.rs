//! Kernel selector.
//!
//! [`Operator`] is the light-weight operator handle the IR hangs onto: it
//! owns the operator descriptor and resolves the concrete kernels for a
//! requested placement set. Selection performs no ranking beyond registry
//! order; callers wanting a strategy pre-filter the place list.

use std::collections::BTreeSet;

use plume_place::{parse_kernel_type, Place};
use snafu::ResultExt;

use crate::context::Context;
use crate::error::{
    KernelTypeSnafu, MissingOpTypeSnafu, NoKernelBoundSnafu, NoKernelForTypeSnafu, NoViableKernelSnafu, Result,
    VariableNotFoundSnafu,
};
use crate::kernel::{Kernel, OpParam};
use crate::op_info::OpInfo;
use crate::registry;
use crate::scope::Scope;

/// One operator instance: descriptor plus kernel-selection state.
#[derive(Debug, Default)]
pub struct Operator {
    op_type: String,
    op_info: OpInfo,
    valid_places: Vec<Place>,
    kernel: Option<Kernel>,
}

impl Operator {
    pub fn new(op_type: impl Into<String>) -> Self {
        let op_type = op_type.into();
        Self { op_info: OpInfo::new(op_type.clone()), op_type, ..Default::default() }
    }

    pub fn op_type(&self) -> &str {
        &self.op_type
    }

    pub fn op_info(&self) -> &OpInfo {
        &self.op_info
    }

    pub fn op_info_mut(&mut self) -> &mut OpInfo {
        &mut self.op_info
    }

    pub fn set_valid_places(&mut self, places: impl Into<Vec<Place>>) {
        self.valid_places = places.into();
    }

    pub fn valid_places(&self) -> &[Place] {
        &self.valid_places
    }

    /// The statically bound kernel, once picked.
    pub fn kernel(&self) -> Option<&Kernel> {
        self.kernel.as_ref()
    }

    pub fn bind_kernel(&mut self, kernel: Kernel) {
        self.kernel = Some(kernel);
    }

    /// Bind the descriptor and resolve its variables against the scope.
    ///
    /// Every input variable must already exist; output variables are
    /// created. The descriptor replaces any previously attached one.
    pub fn attach(&mut self, op_info: OpInfo, scope: &mut Scope) -> Result<()> {
        for name in op_info.input_names() {
            snafu::ensure!(scope.find_var(&name).is_some(), VariableNotFoundSnafu { name });
        }
        for name in op_info.output_names() {
            scope.create_var(&name);
        }
        self.op_type = op_info.op_type().to_string();
        self.op_info = op_info;
        Ok(())
    }

    /// Resolve the viable kernels for this operator.
    ///
    /// With `kernel_type` given, the string is parsed back into a place and
    /// looked up exactly; zero results is a fatal configuration error (the
    /// caller asked for a kernel that does not exist).
    ///
    /// Otherwise every requested place is widened into `{t,p,l}`,
    /// `{t,any,l}`, `{t,any,any}`, the set is deduplicated, and the registry
    /// is queried once per distinct place. Every kernel is attached (param
    /// + context) before it enters the result, so nothing returned is
    /// half-initialized.
    pub fn create_kernels(&self, places: &[Place], kernel_type: Option<&str>) -> Result<Vec<Kernel>> {
        snafu::ensure!(!self.op_type.is_empty(), MissingOpTypeSnafu);

        let mut kernels = Vec::new();

        if let Some(kernel_type) = kernel_type {
            let (_, _, place) = parse_kernel_type(kernel_type).context(KernelTypeSnafu)?;
            self.pick_into(place, &mut kernels)?;
            snafu::ensure!(!kernels.is_empty(), NoKernelForTypeSnafu { kernel_type });
            return Ok(kernels);
        }

        let mut place_set = BTreeSet::new();
        for &place in places {
            place_set.insert(place);
            place_set.insert(place.any_precision());
            place_set.insert(place.any_precision().any_layout());
        }

        let mut targets = BTreeSet::new();
        for &place in &place_set {
            self.pick_into(place, &mut kernels)?;
            targets.insert(place.target);
        }

        tracing::debug!(op_type = %self.op_type, kernels = kernels.len(), ?targets, "created kernels");
        Ok(kernels)
    }

    /// Pick one kernel for execution from the open placement set.
    ///
    /// Takes the first kernel produced; registry-insertion order is the only
    /// ranking. Zero viable kernels is fatal here, unlike in
    /// [`Operator::create_kernels`] open mode.
    pub fn static_pick_kernel(&mut self, places: &[Place]) -> Result<()> {
        let mut kernels = self.create_kernels(places, None)?;
        snafu::ensure!(
            !kernels.is_empty(),
            NoViableKernelSnafu { op_type: self.op_type.clone(), places: places.to_vec() }
        );
        self.kernel = Some(kernels.remove(0));
        Ok(())
    }

    /// Launch the statically bound kernel.
    pub fn run(&mut self) -> Result<()> {
        let kernel = self
            .kernel
            .as_mut()
            .ok_or_else(|| NoKernelBoundSnafu { op_type: self.op_type.clone() }.build())?;
        kernel.launch()
    }

    fn pick_into(&self, place: Place, kernels: &mut Vec<Kernel>) -> Result<()> {
        let found = registry::global().create(&self.op_type, place);
        tracing::debug!(op_type = %self.op_type, %place, count = found.len(), "pick kernels for place");
        for mut kernel in found {
            self.attach_kernel(&mut kernel)?;
            kernels.push(kernel);
        }
        Ok(())
    }

    /// Bind the operator's parameter block and a fresh target context.
    pub fn attach_kernel(&self, kernel: &mut Kernel) -> Result<()> {
        kernel.set_param(OpParam::from_op_info(&self.op_info));
        kernel.set_context(Context::for_target(kernel.place().target)?);
        Ok(())
    }
}
