//! Fixed-width administrative identifiers.

/// Width of a SIMC locality identifier.
pub const SIMC_WIDTH: usize = 7;

/// Left-pad `id` with zeros to `width` characters.
///
/// Inputs already at least `width` characters long are returned unchanged.
///
/// # Examples
/// ```
/// use wikihum_core::{SIMC_WIDTH, pad_identifier};
///
/// assert_eq!(pad_identifier("12345", SIMC_WIDTH), "0012345");
/// assert_eq!(pad_identifier("12345678", SIMC_WIDTH), "12345678");
/// ```
#[must_use]
pub fn pad_identifier(id: &str, width: usize) -> String {
    format!("{id:0>width$}")
}
