//! Placement descriptors for the plume runtime.
//!
//! A [`Place`] names the execution environment of a kernel: which device
//! target it runs on, at which numeric precision, and over which memory
//! layout. Places are the keys of the kernel registry and the elements of
//! the candidate sets the kernel selector expands, so they carry a total
//! order and exact equality.
//!
//! The wildcard values (`Any`) are ordinary enum members: two places compare
//! equal only when all three fields match exactly. Wildcard *expansion* is
//! the selector's job and happens before registry lookup, never during
//! comparison.

pub mod error;
pub mod kernel_type;

#[cfg(test)]
pub mod test;

pub use error::{Error, Result};
pub use kernel_type::{parse_kernel_type, serialize_kernel_type};

/// Device target a kernel executes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetType {
    /// Unset/invalid sentinel.
    Unk,
    /// Generic host fallback target.
    Host,
    X86,
    Cuda,
    Arm,
    /// Wildcard used by registry entries that serve every concrete target.
    Any,
}

/// Numeric precision a kernel computes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrecisionType {
    /// Unset/invalid sentinel.
    Unk,
    Float,
    Int8,
    /// Wildcard precision.
    Any,
}

/// Tensor memory layout a kernel expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataLayoutType {
    /// Unset/invalid sentinel.
    Unk,
    NCHW,
    NHWC,
    /// Wildcard layout.
    Any,
}

/// The (target, precision, layout) triple identifying a kernel's execution
/// environment.
///
/// Ordering is lexicographic over the three fields in declaration order,
/// which makes `Place` usable as an ordered-set element and gives the
/// selector's expanded candidate sets a deterministic iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "proptest", derive(proptest_derive::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Place {
    pub target: TargetType,
    pub precision: PrecisionType,
    pub layout: DataLayoutType,
}

impl Place {
    pub const fn new(target: TargetType, precision: PrecisionType, layout: DataLayoutType) -> Self {
        Self { target, precision, layout }
    }

    /// A place is valid once every field has been set to a non-sentinel value.
    pub const fn is_valid(&self) -> bool {
        !matches!(self.target, TargetType::Unk)
            && !matches!(self.precision, PrecisionType::Unk)
            && !matches!(self.layout, DataLayoutType::Unk)
    }

    /// Widen the precision field to the wildcard.
    pub const fn any_precision(mut self) -> Self {
        self.precision = PrecisionType::Any;
        self
    }

    /// Widen the layout field to the wildcard.
    pub const fn any_layout(mut self) -> Self {
        self.layout = DataLayoutType::Any;
        self
    }
}

impl Default for Place {
    fn default() -> Self {
        Self { target: TargetType::Unk, precision: PrecisionType::Unk, layout: DataLayoutType::Unk }
    }
}

impl std::fmt::Display for Place {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.target, self.precision, self.layout)
    }
}

impl std::str::FromStr for Place {
    type Err = Error;

    /// Parse the `"<target>:<precision>:<layout>"` rendering of a place.
    fn from_str(s: &str) -> Result<Self> {
        use snafu::ResultExt;

        let mut parts = s.splitn(3, ':');
        let (Some(target), Some(precision), Some(layout)) = (parts.next(), parts.next(), parts.next()) else {
            return error::MalformedPlaceSnafu { raw: s }.fail();
        };

        Ok(Self {
            target: target.parse().context(error::UnknownTargetSnafu { raw: s })?,
            precision: precision.parse().context(error::UnknownPrecisionSnafu { raw: s })?,
            layout: layout.parse().context(error::UnknownLayoutSnafu { raw: s })?,
        })
    }
}
