//! Linear prediction cepstral coefficient (LPCC) extraction
//!
//! This module slides an analysis frame over a Sound and turns each frame
//! into a cepstral feature vector.
//!
//! The algorithm, per frame:
//! 1. Copy the frame into a zero-padded analysis block
//! 2. Optionally pre-emphasize (first-order high-pass)
//! 3. Optionally apply the analysis window
//! 4. Autocorrelate via FFT cross-correlation of the block with itself
//! 5. Solve for LPC coefficients with the Levinson-Durbin recursion
//! 6. Convert LPC coefficients to cepstral coefficients
//! 7. Optionally apply the lifter
//!
//! All scratch storage is allocated when the extractor is built; the only
//! per-frame allocation is the emitted feature vector.

use log::{debug, trace};
use num_complex::Complex;
use serde::{Deserialize, Serialize};

use crate::utils::cepstrum::lpc_to_cepstrum_into;
use crate::utils::fft::{next_power_of_two, CrossCorrelator};
use crate::utils::lpc::levinson_durbin_into;
use crate::window::{lifter_coefficients, window_samples, WindowType};
use crate::{LpccError, Result, Sound};

/// Default analysis frame duration in seconds
pub const DEFAULT_FRAME_DURATION: f64 = 0.0256;
/// Default hop between frame starts in seconds
pub const DEFAULT_HOP_DURATION: f64 = 0.010;
/// Default sinusoidal lifter size
pub const DEFAULT_LIFTER_SIZE: usize = 22;

/// Longest frame whose zero-padded block (< 4 * frame_size values) is addressable
const MAX_FRAME_SIZE: usize = isize::MAX as usize / (4 * std::mem::size_of::<Complex<f64>>());
/// Longest hop; no sample index can exceed it
const MAX_HOP_SIZE: usize = isize::MAX as usize;

fn default_frame_duration() -> f64 {
    DEFAULT_FRAME_DURATION
}

fn default_hop_duration() -> f64 {
    DEFAULT_HOP_DURATION
}

fn default_lifter_size() -> usize {
    DEFAULT_LIFTER_SIZE
}

/// Configuration of an LPCC extractor
///
/// The predictor order equals `feature_count`. Durations are converted to
/// sample counts once, by rounding, when the extractor is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpccConfig {
    /// Sample rate (Hz) of the sounds this extractor accepts
    pub sample_rate: u32,
    /// Number of cepstral coefficients per frame (also the LPC order)
    pub feature_count: usize,
    /// Frame duration in seconds
    #[serde(default = "default_frame_duration")]
    pub frame_duration: f64,
    /// Hop duration in seconds
    #[serde(default = "default_hop_duration")]
    pub hop_duration: f64,
    /// Sinusoidal lifter size; 0 disables liftering
    #[serde(default = "default_lifter_size")]
    pub lifter_size: usize,
    /// Pre-emphasis coefficient; 0 disables pre-emphasis
    #[serde(default)]
    pub pre_emphasis: f64,
    /// Analysis window
    #[serde(default)]
    pub window: WindowType,
}

impl LpccConfig {
    /// Configuration with the default durations, lifter size 22,
    /// no pre-emphasis and a rectangular window
    pub fn new(sample_rate: u32, feature_count: usize) -> Self {
        Self {
            sample_rate,
            feature_count,
            frame_duration: DEFAULT_FRAME_DURATION,
            hop_duration: DEFAULT_HOP_DURATION,
            lifter_size: DEFAULT_LIFTER_SIZE,
            pre_emphasis: 0.0,
            window: WindowType::Rectangular,
        }
    }

    pub fn with_frame_duration(mut self, seconds: f64) -> Self {
        self.frame_duration = seconds;
        self
    }

    pub fn with_hop_duration(mut self, seconds: f64) -> Self {
        self.hop_duration = seconds;
        self
    }

    pub fn with_lifter_size(mut self, size: usize) -> Self {
        self.lifter_size = size;
        self
    }

    pub fn with_pre_emphasis(mut self, coefficient: f64) -> Self {
        self.pre_emphasis = coefficient;
        self
    }

    pub fn with_window(mut self, window: WindowType) -> Self {
        self.window = window;
        self
    }

    /// Frame length in samples: round(frame_duration * sample_rate)
    pub fn frame_size(&self) -> usize {
        seconds_to_samples(self.frame_duration, self.sample_rate)
    }

    /// Hop length in samples: round(hop_duration * sample_rate)
    pub fn hop_size(&self) -> usize {
        seconds_to_samples(self.hop_duration, self.sample_rate)
    }

    /// Check every construction-time invariant
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(LpccError::InvalidParameter(
                "sample_rate must be positive".to_string(),
            ));
        }
        if self.feature_count == 0 {
            return Err(LpccError::InvalidParameter(
                "feature_count must be positive".to_string(),
            ));
        }
        if !(self.frame_duration.is_finite() && self.frame_duration > 0.0) {
            return Err(LpccError::InvalidParameter(format!(
                "frame_duration must be positive, got {}",
                self.frame_duration
            )));
        }
        if !(self.hop_duration.is_finite() && self.hop_duration > 0.0) {
            return Err(LpccError::InvalidParameter(format!(
                "hop_duration must be positive, got {}",
                self.hop_duration
            )));
        }
        if !(self.pre_emphasis.is_finite() && self.pre_emphasis >= 0.0) {
            return Err(LpccError::InvalidParameter(format!(
                "pre_emphasis must be non-negative, got {}",
                self.pre_emphasis
            )));
        }

        let frame_size = self.frame_size();
        if frame_size == 0 {
            return Err(LpccError::InvalidParameter(
                "frame_duration is shorter than one sample".to_string(),
            ));
        }
        if frame_size > MAX_FRAME_SIZE {
            return Err(LpccError::InvalidParameter(format!(
                "frame_duration {} s is too long to analyse",
                self.frame_duration
            )));
        }
        let hop_size = self.hop_size();
        if hop_size == 0 {
            return Err(LpccError::InvalidParameter(
                "hop_duration is shorter than one sample".to_string(),
            ));
        }
        if hop_size > MAX_HOP_SIZE {
            return Err(LpccError::InvalidParameter(format!(
                "hop_duration {} s is too long",
                self.hop_duration
            )));
        }
        if self.feature_count >= frame_size {
            return Err(LpccError::InvalidParameter(format!(
                "feature_count ({}) must be smaller than the frame size ({} samples)",
                self.feature_count, frame_size
            )));
        }

        Ok(())
    }
}

fn seconds_to_samples(seconds: f64, sample_rate: u32) -> usize {
    let samples = (seconds * sample_rate as f64).round();
    if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    }
}

/// Cepstral features of one analysis frame
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    /// Cepstral coefficients lpcc0..lpcc{n-1}
    pub features: Vec<f64>,
    /// Start of the frame in seconds
    pub time: f64,
}

impl FeatureVector {
    /// Number of coefficients
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Get a coefficient by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.features.get(index).copied()
    }
}

/// Per-frame working storage, sized once from the configuration
struct Scratch {
    /// Zero-padded analysis block (real frame in the real parts)
    block: Vec<Complex<f64>>,
    /// Second copy of the block; the correlation consumes both
    mirror: Vec<Complex<f64>>,
    /// Autocorrelation lags, one per frame sample
    autocorrelation: Vec<f64>,
    /// LPC coefficients a[0..=order]
    lpc: Vec<f64>,
}

impl Scratch {
    fn new(fft_size: usize, frame_size: usize, order: usize) -> Self {
        Self {
            block: vec![Complex::new(0.0, 0.0); fft_size],
            mirror: vec![Complex::new(0.0, 0.0); fft_size],
            autocorrelation: vec![0.0; frame_size],
            lpc: vec![0.0; order + 1],
        }
    }

    /// Zero every buffer and copy `frame` into the real part of the block
    fn load(&mut self, frame: &[f64]) {
        self.block.fill(Complex::new(0.0, 0.0));
        self.mirror.fill(Complex::new(0.0, 0.0));
        self.autocorrelation.fill(0.0);
        self.lpc.fill(0.0);
        for (dst, &x) in self.block.iter_mut().zip(frame) {
            dst.re = x;
        }
    }
}

/// Sliding-window LPCC extractor
///
/// An extractor owns mutable scratch buffers and therefore extracts one
/// range at a time. To work on several ranges concurrently, give each worker
/// its own [`parallel_copy`](Self::parallel_copy); the input Sound can be
/// shared between them.
///
/// ```
/// use lpcc_core::{LpccConfig, LpccExtractor, Sound};
///
/// let sound = Sound::create_tone(440.0, 0.5, 16000, 0.5, 0.0);
/// let mut extractor = LpccExtractor::new(LpccConfig::new(16000, 13))?;
/// let frames = extractor.compute(&sound)?;
/// assert_eq!(frames.len(), extractor.frame_count(0, sound.num_samples()));
/// assert_eq!(frames[0].len(), 13);
/// # Ok::<(), lpcc_core::LpccError>(())
/// ```
pub struct LpccExtractor {
    config: LpccConfig,
    frame_size: usize,
    hop_size: usize,
    fft_size: usize,
    /// Analysis window, empty for a rectangular window
    window: Vec<f64>,
    /// Lifter weights, empty when liftering is disabled
    lifter: Vec<f64>,
    correlator: CrossCorrelator,
    scratch: Scratch,
}

impl LpccExtractor {
    /// Build an extractor, validating the configuration
    pub fn new(config: LpccConfig) -> Result<Self> {
        config.validate()?;

        let frame_size = config.frame_size();
        let hop_size = config.hop_size();
        let fft_size = next_power_of_two(2 * frame_size - 1);
        let order = config.feature_count;

        let window = if config.window == WindowType::Rectangular {
            Vec::new()
        } else {
            window_samples(config.window, frame_size)
        };
        let lifter = if config.lifter_size > 0 {
            lifter_coefficients(config.feature_count, config.lifter_size)
        } else {
            Vec::new()
        };

        debug!(
            "LPCC extractor: {} Hz, frame {} / hop {} samples, fft {}, order {}, lifter {}, pre-emphasis {}, window {:?}",
            config.sample_rate,
            frame_size,
            hop_size,
            fft_size,
            order,
            config.lifter_size,
            config.pre_emphasis,
            config.window
        );

        Ok(Self {
            frame_size,
            hop_size,
            fft_size,
            window,
            lifter,
            correlator: CrossCorrelator::new(fft_size),
            scratch: Scratch::new(fft_size, frame_size, order),
            config,
        })
    }

    /// A new extractor with the same configuration and its own scratch state
    pub fn parallel_copy(&self) -> Self {
        Self {
            config: self.config.clone(),
            frame_size: self.frame_size,
            hop_size: self.hop_size,
            fft_size: self.fft_size,
            window: self.window.clone(),
            lifter: self.lifter.clone(),
            correlator: CrossCorrelator::new(self.fft_size),
            scratch: Scratch::new(self.fft_size, self.frame_size, self.config.feature_count),
        }
    }

    pub fn config(&self) -> &LpccConfig {
        &self.config
    }

    /// Frame length in samples
    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    /// Hop length in samples
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Size of the zero-padded analysis block
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Number of coefficients per feature vector
    pub fn feature_count(&self) -> usize {
        self.config.feature_count
    }

    /// Feature labels "lpcc0" .. "lpcc{n-1}"
    pub fn feature_names(&self) -> Vec<String> {
        (0..self.config.feature_count)
            .map(|i| format!("lpcc{}", i))
            .collect()
    }

    /// Number of frames [`compute_from`](Self::compute_from) emits for a range
    ///
    /// Counts the starts `i = start, start + hop, ...` with `i + frame_size < end`.
    pub fn frame_count(&self, start: usize, end: usize) -> usize {
        match end.checked_sub(start) {
            Some(span) if span > self.frame_size => (span - self.frame_size - 1) / self.hop_size + 1,
            _ => 0,
        }
    }

    /// Extract features over the whole sound
    pub fn compute(&mut self, sound: &Sound) -> Result<Vec<FeatureVector>> {
        self.compute_from(sound, 0, sound.num_samples())
    }

    /// Extract one feature vector per frame whose start lies in
    /// `[start, end)` and which ends before `end`
    ///
    /// # Errors
    /// * [`LpccError::ConfigMismatch`] if the sound's sample rate differs from
    ///   the configured one
    /// * [`LpccError::InvalidRange`] unless `start <= end <= sound.num_samples()`
    ///
    /// A range too short for a single frame yields an empty result.
    pub fn compute_from(
        &mut self,
        sound: &Sound,
        start: usize,
        end: usize,
    ) -> Result<Vec<FeatureVector>> {
        if sound.sample_rate() != self.config.sample_rate {
            return Err(LpccError::ConfigMismatch {
                expected: self.config.sample_rate,
                found: sound.sample_rate(),
            });
        }
        let samples = sound.samples();
        if start > end || end > samples.len() {
            return Err(LpccError::InvalidRange {
                start,
                end,
                len: samples.len(),
            });
        }

        let frame_size = self.frame_size;
        let hop_size = self.hop_size;
        let sample_rate = self.config.sample_rate as f64;
        let emphasis = self.config.pre_emphasis;

        // Each frame is filtered against the original sample preceding it
        let mut previous = if start > 0 { samples[start - 1] } else { 0.0 };

        let mut frames = Vec::with_capacity(self.frame_count(start, end));
        let mut i = start;
        while end.saturating_sub(i) > frame_size {
            let scratch = &mut self.scratch;
            scratch.load(&samples[i..i + frame_size]);

            if emphasis > 0.0 {
                pre_emphasize(&mut scratch.block[..frame_size], emphasis, previous);
                previous = i
                    .checked_add(hop_size - 1)
                    .and_then(|k| samples.get(k))
                    .copied()
                    .unwrap_or(0.0);
            }

            if !self.window.is_empty() {
                apply_window(&mut scratch.block[..frame_size], &self.window);
            }

            scratch.mirror.copy_from_slice(&scratch.block);
            self.correlator.cross_correlate(
                &mut scratch.block,
                &mut scratch.mirror,
                &mut scratch.autocorrelation,
            );

            if scratch.autocorrelation[0] <= 0.0 {
                trace!("silent frame at sample {}", i);
            }

            let order = self.config.feature_count;
            let residual = levinson_durbin_into(&scratch.autocorrelation, order, &mut scratch.lpc);

            let mut features = vec![0.0; order];
            lpc_to_cepstrum_into(&scratch.lpc, residual, &mut features);

            if !self.lifter.is_empty() {
                apply_lifter(&mut features, &self.lifter);
            }

            frames.push(FeatureVector {
                features,
                time: i as f64 / sample_rate,
            });

            i = match i.checked_add(hop_size) {
                Some(next) => next,
                None => break,
            };
        }

        debug!(
            "extracted {} LPCC frames from samples {}..{}",
            frames.len(),
            start,
            end
        );

        Ok(frames)
    }

    /// Extract over `[start, end)` using `workers` parallel copies
    ///
    /// Frame starts are split into contiguous chunks, one per worker. The
    /// result equals [`compute_from`](Self::compute_from) element for element.
    #[cfg(feature = "parallel")]
    pub fn compute_parallel(
        &self,
        sound: &Sound,
        start: usize,
        end: usize,
        workers: usize,
    ) -> Result<Vec<FeatureVector>> {
        use rayon::prelude::*;

        let total = self.frame_count(start, end);
        if total == 0 || workers <= 1 {
            return self.parallel_copy().compute_from(sound, start, end);
        }

        let per_worker = total.div_ceil(workers);
        let chunks: Vec<(usize, usize)> = (0..total)
            .step_by(per_worker)
            .map(|first| {
                let last = (first + per_worker).min(total) - 1;
                let chunk_start = start + first * self.hop_size;
                // One past the last frame's final sample
                let chunk_end = start + last * self.hop_size + self.frame_size + 1;
                (chunk_start, chunk_end.min(end))
            })
            .collect();

        debug!(
            "splitting {} frames into {} chunks of up to {}",
            total,
            chunks.len(),
            per_worker
        );

        let parts: Vec<Vec<FeatureVector>> = chunks
            .par_iter()
            .map(|&(chunk_start, chunk_end)| {
                self.parallel_copy()
                    .compute_from(sound, chunk_start, chunk_end)
            })
            .collect::<Result<_>>()?;

        Ok(parts.into_iter().flatten().collect())
    }
}

/// First-order pre-emphasis in place
///
/// `y[k] = x[k] - coefficient * x[k-1]` where `x[k-1]` is the unfiltered
/// previous sample; `previous` stands in for the sample before the frame.
pub fn pre_emphasize(block: &mut [Complex<f64>], coefficient: f64, previous: f64) {
    let mut prev = previous;
    for sample in block.iter_mut() {
        let original = sample.re;
        sample.re = original - coefficient * prev;
        prev = original;
    }
}

/// Multiply the real parts of a block by a window
pub fn apply_window(block: &mut [Complex<f64>], window: &[f64]) {
    for (sample, &w) in block.iter_mut().zip(window) {
        sample.re *= w;
    }
}

/// Weight cepstral coefficients by lifter coefficients
pub fn apply_lifter(cepstrum: &mut [f64], lifter: &[f64]) {
    for (c, &w) in cepstrum.iter_mut().zip(lifter) {
        *c *= w;
    }
}

// Add to_lpcc method to Sound
impl Sound {
    /// Compute LPCC features over the whole sound
    ///
    /// The configuration's sample rate must match this sound.
    pub fn to_lpcc(&self, config: LpccConfig) -> Result<Vec<FeatureVector>> {
        LpccExtractor::new(config)?.compute(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::cepstrum::MIN_RESIDUAL_ENERGY;
    use crate::utils::fft::autocorrelation;
    use crate::utils::lpc::levinson_durbin;
    use approx::assert_relative_eq;

    fn noise(n: usize, seed: u64) -> Vec<f64> {
        // Small LCG so tests stay deterministic without extra dependencies
        let mut state = seed;
        (0..n)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
            })
            .collect()
    }

    fn real_block(values: &[f64]) -> Vec<Complex<f64>> {
        values.iter().map(|&x| Complex::new(x, 0.0)).collect()
    }

    #[test]
    fn test_config_sizes() {
        let config = LpccConfig::new(16000, 13);
        assert_eq!(config.frame_size(), 410);
        assert_eq!(config.hop_size(), 160);

        let extractor = LpccExtractor::new(config).unwrap();
        assert_eq!(extractor.fft_size(), 1024);
        assert_eq!(extractor.feature_count(), 13);
    }

    #[test]
    fn test_config_validation() {
        assert!(LpccConfig::new(0, 13).validate().is_err());
        assert!(LpccConfig::new(16000, 0).validate().is_err());
        assert!(LpccConfig::new(16000, 13)
            .with_hop_duration(0.0)
            .validate()
            .is_err());
        assert!(LpccConfig::new(16000, 13)
            .with_frame_duration(-0.02)
            .validate()
            .is_err());
        // Rounds to zero samples
        assert!(LpccConfig::new(16000, 13)
            .with_hop_duration(1e-5)
            .validate()
            .is_err());
        assert!(LpccConfig::new(16000, 13)
            .with_pre_emphasis(-0.97)
            .validate()
            .is_err());
        // Order must fit inside the frame
        assert!(LpccConfig::new(1000, 26)
            .with_frame_duration(0.02)
            .validate()
            .is_err());

        let err = LpccExtractor::new(LpccConfig::new(16000, 0)).err().unwrap();
        assert!(matches!(err, LpccError::InvalidParameter(_)));
    }

    #[test]
    fn test_oversized_durations_rejected() {
        let err = LpccExtractor::new(LpccConfig::new(16000, 13).with_frame_duration(1e300))
            .err()
            .unwrap();
        assert!(matches!(err, LpccError::InvalidParameter(_)));

        let err = LpccExtractor::new(LpccConfig::new(16000, 13).with_hop_duration(1e300))
            .err()
            .unwrap();
        assert!(matches!(err, LpccError::InvalidParameter(_)));

        // 1.6e19 samples does not fit a sample index
        assert!(LpccConfig::new(16000, 13)
            .with_hop_duration(1e15)
            .validate()
            .is_err());
    }

    #[test]
    fn test_huge_hop_yields_single_frame() {
        // Hop of 1.6e18 samples: the next frame start is past any sound
        let config = LpccConfig::new(16000, 13)
            .with_hop_duration(1e14)
            .with_pre_emphasis(0.97);
        let sound = Sound::create_tone(440.0, 0.1, 16000, 0.5, 0.0);
        let mut extractor = LpccExtractor::new(config).unwrap();

        let frames = extractor.compute(&sound).unwrap();
        assert_eq!(frames.len(), 1);
        assert_eq!(extractor.frame_count(0, sound.num_samples()), 1);
        assert!(frames[0].features.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_config_from_json_uses_defaults() {
        let config: LpccConfig =
            serde_json::from_str(r#"{"sample_rate": 16000, "feature_count": 12}"#).unwrap();
        assert_eq!(config, LpccConfig::new(16000, 12));

        let config: LpccConfig = serde_json::from_str(
            r#"{"sample_rate": 8000, "feature_count": 10, "window": "hamming", "pre_emphasis": 0.97, "lifter_size": 0}"#,
        )
        .unwrap();
        assert_eq!(config.window, WindowType::Hamming);
        assert_eq!(config.lifter_size, 0);
        assert_relative_eq!(config.pre_emphasis, 0.97);
    }

    #[test]
    fn test_feature_names() {
        let extractor = LpccExtractor::new(LpccConfig::new(16000, 3)).unwrap();
        assert_eq!(extractor.feature_names(), vec!["lpcc0", "lpcc1", "lpcc2"]);
    }

    #[test]
    fn test_frame_count() {
        let extractor = LpccExtractor::new(LpccConfig::new(16000, 13)).unwrap();
        // F = 410, H = 160
        assert_eq!(extractor.frame_count(0, 410), 0);
        assert_eq!(extractor.frame_count(0, 411), 1);
        assert_eq!(extractor.frame_count(0, 571), 2);
        assert_eq!(extractor.frame_count(100, 50), 0);
        assert_eq!(extractor.frame_count(0, 16000), 98);
    }

    #[test]
    fn test_pre_emphasize_uses_unfiltered_history() {
        let mut block = real_block(&[1.0, 2.0, 4.0]);
        pre_emphasize(&mut block, 0.5, 2.0);

        let filtered: Vec<f64> = block.iter().map(|c| c.re).collect();
        assert_eq!(filtered, vec![0.0, 1.5, 3.0]);
    }

    #[test]
    fn test_window_and_lifter_stages() {
        let mut block = real_block(&[2.0, 2.0, 2.0]);
        apply_window(&mut block, &[0.0, 0.5, 1.0]);
        assert_eq!(block[1].re, 1.0);
        assert_eq!(block[0].re, 0.0);

        let mut cepstrum = vec![1.0, -2.0, 3.0];
        let original = cepstrum.clone();
        apply_lifter(&mut cepstrum, &lifter_coefficients(3, 0));
        assert_eq!(cepstrum, original);

        apply_lifter(&mut cepstrum, &[1.0, 2.0, 0.5]);
        assert_eq!(cepstrum, vec![1.0, -4.0, 1.5]);
    }

    #[test]
    fn test_frame_matches_reference_pipeline() {
        // Hamming window, pre-emphasis and lifter on one frame, computed by hand
        let config = LpccConfig::new(8000, 10)
            .with_frame_duration(0.02)
            .with_hop_duration(0.01)
            .with_pre_emphasis(0.97)
            .with_window(WindowType::Hamming);
        let samples = noise(400, 7);
        let sound = Sound::from_samples(&samples, 8000);

        let mut extractor = LpccExtractor::new(config).unwrap();
        let frames = extractor.compute_from(&sound, 80, 400).unwrap();
        let first = &frames[0];
        assert_relative_eq!(first.time, 0.01, epsilon = 1e-12);

        let frame_size = 160;
        let window = window_samples(WindowType::Hamming, frame_size);
        let mut frame: Vec<f64> = (0..frame_size)
            .map(|k| {
                let prev = samples[80 + k - 1];
                samples[80 + k] - 0.97 * prev
            })
            .collect();
        for (x, w) in frame.iter_mut().zip(&window) {
            *x *= w;
        }
        let acf = autocorrelation(&frame, frame_size);
        let lpc = levinson_durbin(&acf, 10);
        let lifter = lifter_coefficients(10, DEFAULT_LIFTER_SIZE);
        let expected: Vec<f64> = crate::utils::cepstrum::lpc_to_cepstrum(
            &lpc.coefficients,
            lpc.residual,
            10,
        )
        .iter()
        .zip(&lifter)
        .map(|(c, w)| c * w)
        .collect();

        for (got, want) in first.features.iter().zip(&expected) {
            assert_relative_eq!(*got, *want, epsilon = 1e-9, max_relative = 1e-9);
        }
    }

    #[test]
    fn test_pre_emphasis_carries_over_original_sample() {
        // Second frame must be filtered against samples[hop - 1], unfiltered
        let config = LpccConfig::new(1000, 4)
            .with_frame_duration(0.02)
            .with_hop_duration(0.01)
            .with_lifter_size(0)
            .with_pre_emphasis(0.9);
        let samples = noise(60, 3);
        let sound = Sound::from_samples(&samples, 1000);

        let mut extractor = LpccExtractor::new(config.clone()).unwrap();
        let serial = extractor.compute(&sound).unwrap();
        assert_eq!(serial.len(), 4);

        // Starting at the second frame reproduces it exactly
        let resumed = extractor.compute_from(&sound, 10, 60).unwrap();
        assert_eq!(resumed[0], serial[1]);
        assert_eq!(&resumed[..], &serial[1..]);

        // Hop longer than the frame: the carried sample lies between frames
        let config = config.with_frame_duration(0.01).with_hop_duration(0.025);
        let samples = noise(100, 5);
        let sound = Sound::from_samples(&samples, 1000);

        let mut extractor = LpccExtractor::new(config).unwrap();
        let serial = extractor.compute(&sound).unwrap();
        assert_eq!(serial.len(), 4);

        let resumed = extractor.compute_from(&sound, 50, 100).unwrap();
        assert_eq!(resumed[0], serial[2]);
        assert_eq!(&resumed[..], &serial[2..]);
    }

    #[test]
    fn test_silent_frames_are_finite() {
        let sound = Sound::create_silence(0.2, 16000);
        let config = LpccConfig::new(16000, 13)
            .with_window(WindowType::Hanning)
            .with_pre_emphasis(0.97);
        let frames = sound.to_lpcc(config).unwrap();

        assert!(!frames.is_empty());
        for frame in &frames {
            assert!(frame.features.iter().all(|c| c.is_finite()));
            assert_eq!(frame.features[0], MIN_RESIDUAL_ENERGY.ln());
            assert!(frame.features[1..].iter().all(|&c| c == 0.0));
        }
    }

    #[test]
    fn test_sample_rate_mismatch() {
        let sound = Sound::create_tone(100.0, 0.1, 8000, 0.5, 0.0);
        let mut extractor = LpccExtractor::new(LpccConfig::new(16000, 13)).unwrap();

        let err = extractor.compute(&sound).unwrap_err();
        assert!(matches!(
            err,
            LpccError::ConfigMismatch {
                expected: 16000,
                found: 8000
            }
        ));
    }

    #[test]
    fn test_invalid_range() {
        let sound = Sound::create_silence(0.1, 16000);
        let mut extractor = LpccExtractor::new(LpccConfig::new(16000, 13)).unwrap();

        assert!(matches!(
            extractor.compute_from(&sound, 10, 5),
            Err(LpccError::InvalidRange { .. })
        ));
        assert!(matches!(
            extractor.compute_from(&sound, 0, 1601),
            Err(LpccError::InvalidRange { len: 1600, .. })
        ));
    }

    #[test]
    fn test_short_range_is_empty() {
        let sound = Sound::create_tone(200.0, 0.1, 16000, 0.5, 0.0);
        let mut extractor = LpccExtractor::new(LpccConfig::new(16000, 13)).unwrap();

        assert!(extractor.compute_from(&sound, 0, 410).unwrap().is_empty());
        assert!(extractor.compute_from(&sound, 500, 500).unwrap().is_empty());
    }

    #[test]
    fn test_parallel_copy_is_independent() {
        let sound = Sound::from_samples_owned(noise(4000, 11), 16000);
        let mut original = LpccExtractor::new(LpccConfig::new(16000, 12)).unwrap();
        let mut copy = original.parallel_copy();

        assert_eq!(copy.config(), original.config());
        let a = original.compute(&sound).unwrap();
        let b = copy.compute(&sound).unwrap();
        assert_eq!(a, b);
    }
}
