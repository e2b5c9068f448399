//! Fixed-time comparison shared by signature and token verification.

use subtle::ConstantTimeEq;

/// Compares two byte slices without an early exit on the first difference.
///
/// Slices of different length compare unequal immediately; length is not secret.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
