use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Graph mutation or matching failed inside a pass.
    #[snafu(display("pass {pass:?} failed: {source}"))]
    PassFailed { pass: String, source: plume_ir::Error },

    /// Post-pass validation found a broken graph invariant.
    #[snafu(display("pass {pass:?} left the graph invalid: {source}"))]
    InvalidGraphAfterPass { pass: String, source: plume_ir::Error },

    /// Kernel resolution failed during static binding.
    #[snafu(display("kernel selection failed: {source}"))]
    Selection { source: plume_runtime::Error },
}
