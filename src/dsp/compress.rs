//! Sample-by-sample peak compression.
//!
//! Compression reduces how far a signal is allowed to swing past a threshold.
//! Everything at or below the threshold passes through untouched; the part
//! that pokes above it is divided by the ratio.
//!
//! # Transfer Function
//!
//! ```text
//!   delta = |x| - threshold
//!   delta <= 0  →  x
//!   delta >  0  →  sign(x) × (threshold + delta / ratio)
//! ```
//!
//! ```text
//!   out
//!    │            ___----   ratio 3: slope 1/3 above threshold
//!    │       __---
//!  th┼──────/
//!    │     /
//!    │    /  slope 1 below threshold
//!    │   /
//!    └──┴──────┴──────────→ in
//!           threshold
//! ```
//!
//! # Ratio Values
//!
//!   1.0  = No compression (identity)
//!   2-4  = Gentle taming of peaks
//!   10+  = Close to a hard limiter
//!
//! There is no lookahead and no attack/release smoothing. Each sample is
//! shaped on its own, which bends the waveform at the knee and adds some
//! harmonic distortion. That grit is part of the sound.

/// Compress one sample above `threshold` by `ratio`.
#[inline]
pub fn compress(sample: f64, threshold: f64, ratio: f64) -> f64 {
    let delta = sample.abs() - threshold;

    if delta > 0.0 {
        return sample.signum() * (threshold + delta / ratio);
    }

    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_threshold_passes_exactly() {
        for sample in [0.0, 0.1, -0.39, 0.4, -0.4] {
            assert_eq!(compress(sample, 0.4, 3.0), sample);
        }
    }

    #[test]
    fn above_threshold_is_divided() {
        // 1.0 exceeds 0.4 by 0.6, compressed to 0.4 + 0.2
        assert!((compress(1.0, 0.4, 3.0) - 0.6).abs() < 1e-12);
        assert!((compress(-1.0, 0.4, 3.0) + 0.6).abs() < 1e-12);
    }

    #[test]
    fn unity_ratio_is_identity() {
        for sample in [-2.0, -0.5, 0.0, 0.7, 3.0] {
            assert!((compress(sample, 0.2, 1.0) - sample).abs() < 1e-12);
        }
    }

    #[test]
    fn output_is_bounded_by_max_delta() {
        let threshold = 0.4;
        let ratio = 3.0;
        let max_input: f64 = 2.5;
        let bound = threshold + (max_input - threshold) / ratio;

        let mut x = -max_input;
        while x <= max_input {
            assert!(compress(x, threshold, ratio).abs() <= bound + 1e-12);
            x += 0.01;
        }
    }

    #[test]
    fn nan_propagates() {
        assert!(compress(f64::NAN, 0.4, 3.0).is_nan());
    }
}
