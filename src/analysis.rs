//! Buffer comparison and spectral checks used to validate rendered audio.
//!
//! `diff` and `rmsd` compare two buffers sample by sample over their common
//! prefix (the shorter length). Comparing against nothing yields 0.
//!
//! `peak_frequency` runs an FFT over a buffer and reports the frequency of the
//! strongest bin, which is enough to check that an instrument plays the pitch
//! it was asked for.

use rustfft::{num_complex::Complex, FftPlanner};

/// Mean absolute difference over the common length of `a` and `b`.
pub fn diff(a: &[f32], b: &[f32]) -> f64 {
    let length = a.len().min(b.len());
    if length == 0 {
        return 0.0;
    }

    let sum: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as f64 - y as f64).abs())
        .sum();

    sum / length as f64
}

/// Root-mean-square deviation over the common length of `a` and `b`.
pub fn rmsd(a: &[f32], b: &[f32]) -> f64 {
    let length = a.len().min(b.len());
    if length == 0 {
        return 0.0;
    }

    let square_error: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(&x, &y)| (x as f64 - y as f64).powi(2))
        .sum();

    (square_error / length as f64).sqrt()
}

/// Frequency (Hz) of the strongest FFT bin, ignoring DC.
///
/// Resolution is `sample_rate / buffer.len()`. Returns `None` for buffers too
/// short to have a non-DC bin.
pub fn peak_frequency(buffer: &[f32], sample_rate: u32) -> Option<f64> {
    let len = buffer.len();
    if len < 4 {
        return None;
    }

    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(len);

    // Hann window - reduces spectral leakage
    let denom = (len - 1) as f32;
    let mut spectrum: Vec<Complex<f32>> = buffer
        .iter()
        .enumerate()
        .map(|(i, &sample)| {
            let w = 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos());
            Complex::new(sample * w, 0.0)
        })
        .collect();

    fft.process(&mut spectrum);

    let (bin, _) = spectrum[1..len / 2]
        .iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c.norm_sqr()))
        .fold((0, f32::MIN), |best, candidate| {
            if candidate.1 > best.1 {
                candidate
            } else {
                best
            }
        });

    Some(bin as f64 * sample_rate as f64 / len as f64)
}
