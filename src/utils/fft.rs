//! FFT-based cross-correlation
//!
//! This module wraps rustfft for the correlation primitive used by the LPC
//! front-end. Transforms are planned once per size and reused, and all
//! intermediate storage is owned by the caller or the correlator, so the
//! per-frame path performs no heap allocation.

use std::sync::Arc;

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};

/// Cross-correlator with cached forward/inverse plans for a fixed block size
pub struct CrossCorrelator {
    size: usize,
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex<f64>>,
}

impl CrossCorrelator {
    /// Create a correlator for blocks of `size` complex samples.
    ///
    /// `size` should be at least `2 * n - 1` for signals of `n` samples if
    /// the result must equal the linear (non-circular) correlation.
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(size);
        let inverse = planner.plan_fft_inverse(size);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());

        Self {
            size,
            forward,
            inverse,
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        }
    }

    /// Block size this correlator was planned for
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cross-correlate two blocks in place.
    ///
    /// Writes `out.len()` lags of `r[lag] = sum_n a[n + lag] * conj(b[n])`
    /// (real part). Both blocks must hold exactly `size()` samples and are
    /// consumed: on return `a` holds the unnormalized correlation sequence
    /// and `b` its own spectrum. Passing two copies of the same zero-padded
    /// frame yields its autocorrelation.
    ///
    /// # Panics
    /// Panics if a block length differs from `size()` or if more lags are
    /// requested than the block holds.
    pub fn cross_correlate(
        &mut self,
        a: &mut [Complex<f64>],
        b: &mut [Complex<f64>],
        out: &mut [f64],
    ) {
        assert_eq!(a.len(), self.size, "block A must match the planned size");
        assert_eq!(b.len(), self.size, "block B must match the planned size");
        assert!(out.len() <= self.size, "lag count exceeds block size");

        if self.size == 0 {
            return;
        }

        self.forward.process_with_scratch(a, &mut self.scratch);
        self.forward.process_with_scratch(b, &mut self.scratch);

        // Cross-spectrum A * conj(B)
        for (x, y) in a.iter_mut().zip(b.iter()) {
            *x *= y.conj();
        }

        self.inverse.process_with_scratch(a, &mut self.scratch);

        let scale = 1.0 / self.size as f64;
        for (lag, r) in out.iter_mut().enumerate() {
            *r = a[lag].re * scale;
        }
    }
}

/// Compute the next power of two greater than or equal to n
pub fn next_power_of_two(n: usize) -> usize {
    n.next_power_of_two()
}

/// Compute the first `lags` autocorrelation values of a real signal
///
/// Allocating convenience over [`CrossCorrelator`]; the block is zero-padded
/// to `next_power_of_two(2 * n - 1)` so the result is the linear
/// autocorrelation. Lags beyond the signal length are zero.
pub fn autocorrelation(input: &[f64], lags: usize) -> Vec<f64> {
    let n = input.len();
    if n == 0 {
        return vec![0.0; lags];
    }

    let fft_size = next_power_of_two(2 * n - 1);
    let mut a: Vec<Complex<f64>> = input
        .iter()
        .map(|&x| Complex::new(x, 0.0))
        .chain(std::iter::repeat(Complex::new(0.0, 0.0)))
        .take(fft_size)
        .collect();
    let mut b = a.clone();

    let mut out = vec![0.0; lags];
    let computed = lags.min(n);
    CrossCorrelator::new(fft_size).cross_correlate(&mut a, &mut b, &mut out[..computed]);
    out
}
