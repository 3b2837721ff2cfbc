use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Place string is not a `target:precision:layout` triple.
    #[snafu(display("malformed place {raw:?}: expected <target>:<precision>:<layout>"))]
    MalformedPlace { raw: String },

    #[snafu(display("unknown target in {raw:?}: {source}"))]
    UnknownTarget { raw: String, source: strum::ParseError },

    #[snafu(display("unknown precision in {raw:?}: {source}"))]
    UnknownPrecision { raw: String, source: strum::ParseError },

    #[snafu(display("unknown layout in {raw:?}: {source}"))]
    UnknownLayout { raw: String, source: strum::ParseError },

    /// Kernel-type string is not an `op/alias/place` triple.
    #[snafu(display("malformed kernel type {raw:?}: expected <op_type>/<alias>/<target>:<precision>:<layout>"))]
    MalformedKernelType { raw: String },

    #[snafu(display("malformed place in kernel type {raw:?}: {source}"))]
    KernelTypePlace { raw: String, source: Box<Error> },
}
