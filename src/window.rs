//! Window and lifter functions for short-time analysis
//!
//! Analysis windows taper each frame before autocorrelation, which reduces
//! the leakage that a hard frame edge introduces into the LPC estimate.
//! Lifters weight cepstral coefficients after conversion.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Window types available for frame analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindowType {
    /// Rectangular window (no windowing)
    #[default]
    Rectangular,
    /// Hamming window
    Hamming,
    /// Hanning window (raised cosine)
    Hanning,
    /// Three-term Blackman window
    Blackman,
    /// Triangular window that stays non-zero at both edges
    Triangular,
    /// Bartlett window (triangular, zero at both edges)
    Bartlett,
}

impl WindowType {
    /// Compute the window value at a normalized position
    ///
    /// # Arguments
    /// * `position` - Position in the window, normalized to [0, 1] where 0 is
    ///                the first sample and 1 the last
    /// * `length` - Number of samples in the window (only used by `Triangular`)
    pub fn value_at(self, position: f64, length: usize) -> f64 {
        if !(0.0..=1.0).contains(&position) {
            return 0.0;
        }

        match self {
            WindowType::Rectangular => 1.0,

            WindowType::Hamming => 0.54 - 0.46 * (2.0 * PI * position).cos(),

            WindowType::Hanning => 0.5 - 0.5 * (2.0 * PI * position).cos(),

            WindowType::Blackman => {
                0.42 - 0.5 * (2.0 * PI * position).cos() + 0.08 * (4.0 * PI * position).cos()
            }

            WindowType::Triangular => {
                // Spans length + 1 points so that neither edge reaches zero
                let n = length as f64;
                let index = position * (n - 1.0);
                1.0 - (2.0 * index - (n - 1.0)).abs() / (n + 1.0)
            }

            WindowType::Bartlett => 1.0 - (2.0 * position - 1.0).abs(),
        }
    }

    /// Generate a complete symmetric window of the given size
    ///
    /// The first and last values are equal; a window of one sample is `[1.0]`.
    pub fn generate(self, size: usize) -> Vec<f64> {
        match size {
            0 => Vec::new(),
            1 => vec![1.0],
            _ => (0..size)
                .map(|i| {
                    let position = i as f64 / (size - 1) as f64;
                    self.value_at(position, size)
                })
                .collect(),
        }
    }
}

/// Generate the analysis window used to taper a frame of `length` samples.
pub fn window_samples(window: WindowType, length: usize) -> Vec<f64> {
    window.generate(length)
}

/// Generate sinusoidal lifter weights for `count` cepstral coefficients
///
/// `w[n] = 1 + (size / 2) * sin(pi * n / size)`.
/// A lifter size of zero yields all ones, so liftering with it is the
/// identity.
pub fn lifter_coefficients(count: usize, size: usize) -> Vec<f64> {
    if size == 0 {
        return vec![1.0; count];
    }

    let l = size as f64;
    (0..count)
        .map(|n| 1.0 + 0.5 * l * (PI * n as f64 / l).sin())
        .collect()
}
