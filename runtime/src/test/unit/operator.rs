use std::sync::Arc;

use plume_place::{serialize_kernel_type, DataLayoutType, Place, PrecisionType, TargetType};

use crate::error::Error;
use crate::op::Operator;
use crate::op_info::OpInfo;
use crate::registry::{self, ReferenceKernel};
use crate::scope::Scope;

fn host(precision: PrecisionType, layout: DataLayoutType) -> Place {
    Place::new(TargetType::Host, precision, layout)
}

/// Register into the global registry under a test-unique op type; the
/// registry is process-wide, so each test owns its own op names.
fn register(op: &str, alias: &str, place: Place) {
    registry::global()
        .register(op, alias, place, Arc::new(|| Box::new(ReferenceKernel)))
        .unwrap();
}

#[test]
fn widening_reaches_wildcard_registrations() {
    register("widen.relu", "ref", host(PrecisionType::Any, DataLayoutType::Any));

    let op = Operator::new("widen.relu");
    let kernels = op
        .create_kernels(&[host(PrecisionType::Float, DataLayoutType::NCHW)], None)
        .unwrap();

    assert_eq!(kernels.len(), 1, "any/any registration must satisfy a concrete request");
    assert_eq!(kernels[0].place(), host(PrecisionType::Any, DataLayoutType::Any));
}

#[test]
fn exact_and_wildcard_kernels_are_both_viable() {
    register("e2e.add", "def", host(PrecisionType::Float, DataLayoutType::NCHW));
    register("e2e.add", "ref", host(PrecisionType::Any, DataLayoutType::Any));

    let op = Operator::new("e2e.add");
    let kernels = op
        .create_kernels(&[host(PrecisionType::Float, DataLayoutType::NCHW)], None)
        .unwrap();

    assert_eq!(kernels.len(), 2);
    for kernel in &kernels {
        assert!(kernel.has_context(), "kernel {kernel} returned unattached");
        assert!(kernel.has_param());
    }
}

#[test]
fn expansion_deduplicates_the_place_set() {
    register("dedup.mul", "ref", host(PrecisionType::Any, DataLayoutType::Any));

    // Both requests widen to the same any/any place; the kernel must appear
    // once, not once per requested place.
    let op = Operator::new("dedup.mul");
    let kernels = op
        .create_kernels(
            &[
                host(PrecisionType::Float, DataLayoutType::NCHW),
                host(PrecisionType::Int8, DataLayoutType::NHWC),
            ],
            None,
        )
        .unwrap();

    assert_eq!(kernels.len(), 1);
}

#[test]
fn specified_kernel_type_resolves_exactly() {
    let place = host(PrecisionType::Float, DataLayoutType::NCHW);
    register("spec.fc", "def", place);

    let op = Operator::new("spec.fc");
    let kernel_type = serialize_kernel_type("spec.fc", "def", place);
    let kernels = op.create_kernels(&[], Some(&kernel_type)).unwrap();
    assert_eq!(kernels.len(), 1);
    assert_eq!(kernels[0].place(), place);
}

#[test]
fn specified_kernel_type_with_no_kernel_is_fatal() {
    let op = Operator::new("spec.missing");
    let kernel_type = serialize_kernel_type("spec.missing", "def", host(PrecisionType::Float, DataLayoutType::NCHW));
    let err = op.create_kernels(&[], Some(&kernel_type)).unwrap_err();
    assert!(matches!(err, Error::NoKernelForType { .. }), "got {err}");
}

#[test]
fn open_mode_with_no_kernel_is_empty_not_fatal() {
    let op = Operator::new("open.missing");
    let kernels = op
        .create_kernels(&[host(PrecisionType::Float, DataLayoutType::NCHW)], None)
        .unwrap();
    assert!(kernels.is_empty());
}

#[test]
fn static_pick_takes_the_first_produced_kernel() {
    register("pick.conv", "first", host(PrecisionType::Any, DataLayoutType::Any));
    register("pick.conv", "second", host(PrecisionType::Any, DataLayoutType::Any));

    let mut op = Operator::new("pick.conv");
    op.static_pick_kernel(&[host(PrecisionType::Float, DataLayoutType::NCHW)]).unwrap();
    assert_eq!(op.kernel().unwrap().alias(), "first");

    // The bound kernel is launchable as attached.
    op.run().unwrap();
}

#[test]
fn static_pick_with_zero_viable_is_fatal() {
    let mut op = Operator::new("pick.none");
    let err = op
        .static_pick_kernel(&[host(PrecisionType::Float, DataLayoutType::NCHW)])
        .unwrap_err();
    assert!(matches!(err, Error::NoViableKernel { .. }), "got {err}");
}

#[test]
fn attach_resolves_variables_in_scope() {
    let mut scope = Scope::new();
    scope.create_var("x");

    let mut info = OpInfo::new("attach.relu");
    info.add_input("X", ["x"]).add_output("Out", ["y"]);

    let mut op = Operator::new("attach.relu");
    op.attach(info, &mut scope).unwrap();
    assert!(scope.find_var("y").is_some(), "outputs are created on attach");

    let mut missing = OpInfo::new("attach.relu");
    missing.add_input("X", ["nope"]);
    let err = op.attach(missing, &mut scope).unwrap_err();
    assert!(matches!(err, Error::VariableNotFound { .. }), "got {err}");
}

#[test]
fn empty_op_type_is_rejected() {
    let op = Operator::default();
    let err = op.create_kernels(&[], None).unwrap_err();
    assert!(matches!(err, Error::MissingOpType), "got {err}");
}
