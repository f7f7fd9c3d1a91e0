use crate::constants::{EMIT_RATE_MAX, EMIT_RATE_MIDPOINT};

/// Sum of byte magnitudes with a linear tilt toward the low bins:
/// bin `i` of `n` is weighted `(n - i) / n`.
pub fn weighted_magnitude(bins: &[u8]) -> f32 {
    let n = bins.len() as f32;
    bins.iter()
        .enumerate()
        .map(|(i, v)| *v as f32 * (n - i as f32) / n)
        .sum()
}

/// Map an analyser byte spectrum to a particle emit rate (particles/sec).
///
/// Logistic in the average weighted magnitude: silent input emits almost
/// nothing, loud passages saturate at `EMIT_RATE_MAX`.
pub fn emit_rate_for_spectrum(bins: &[u8]) -> f32 {
    if bins.is_empty() {
        return 0.0;
    }
    let avg = weighted_magnitude(bins) / bins.len() as f32;
    EMIT_RATE_MAX / (1.0 + (EMIT_RATE_MIDPOINT - avg).exp2())
}
