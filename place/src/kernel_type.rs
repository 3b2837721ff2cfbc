//! Serialized kernel-type strings.
//!
//! A kernel instance is addressable by a flat string of the form
//! `"<op_type>/<alias>/<target>:<precision>:<layout>"`. The alias
//! distinguishes kernels that share one (op, place) key, e.g. algorithmic
//! variants of the same operator.

use crate::error::{self, Error, Result};
use crate::Place;

/// Render the registry address of a kernel as a flat string.
pub fn serialize_kernel_type(op_type: &str, alias: &str, place: Place) -> String {
    format!("{op_type}/{alias}/{place}")
}

/// Parse a serialized kernel-type string back into its parts.
///
/// `op_type` and `alias` are returned verbatim; they may be any token not
/// containing `/`. Unknown place tokens are configuration errors carrying
/// the full offending string.
pub fn parse_kernel_type(raw: &str) -> Result<(String, String, Place)> {
    let mut parts = raw.splitn(3, '/');
    let (Some(op_type), Some(alias), Some(place)) = (parts.next(), parts.next(), parts.next()) else {
        return error::MalformedKernelTypeSnafu { raw }.fail();
    };
    if op_type.is_empty() {
        return error::MalformedKernelTypeSnafu { raw }.fail();
    }

    let place: Place = place
        .parse()
        .map_err(|source| Error::KernelTypePlace { raw: raw.to_string(), source: Box::new(source) })?;

    Ok((op_type.to_string(), alias.to_string(), place))
}
