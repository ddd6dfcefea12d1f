//! Constant-time comparison.

/// Compares two byte strings without exiting early on the first difference.
///
/// Only a length mismatch short-circuits; lengths are not secret. For equal
/// lengths every byte pair is XOR-accumulated before the result is read.
#[inline(never)]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let diff = a
        .iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y));
    std::hint::black_box(diff) == 0
}
