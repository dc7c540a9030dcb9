//! lpcc-core: Linear prediction cepstral coefficient extraction
//!
//! This library turns a digitized audio signal into a sequence of LPCC
//! feature vectors: each short frame is modelled as the output of an
//! all-pole linear predictor, and the predictor is converted into a compact
//! cepstral representation for recognition pipelines.
//!
//! # Core Types
//!
//! - [`Sound`] - Audio samples with an integer sample rate
//! - [`LpccConfig`] - Extractor configuration (durations, order, lifter, window)
//! - [`LpccExtractor`] - Sliding-window extractor with reusable scratch buffers
//! - [`FeatureVector`] - Cepstral coefficients of one frame plus its time
//!
//! # Example
//!
//! ```
//! use lpcc_core::{LpccConfig, Sound, WindowType};
//!
//! let sound = Sound::create_tone(220.0, 0.25, 16000, 0.5, 0.0);
//! let config = LpccConfig::new(16000, 13)
//!     .with_window(WindowType::Hamming)
//!     .with_pre_emphasis(0.97);
//! let frames = sound.to_lpcc(config)?;
//! assert!(frames.iter().all(|f| f.features.iter().all(|c| c.is_finite())));
//! # Ok::<(), lpcc_core::LpccError>(())
//! ```

pub mod sound;
pub mod window;
pub mod lpcc;

pub mod utils;

// Re-export main types at crate root
pub use sound::Sound;
pub use window::{lifter_coefficients, window_samples, WindowType};
pub use lpcc::{FeatureVector, LpccConfig, LpccExtractor};

use thiserror::Error;

/// Errors that can occur in lpcc-core operations
#[derive(Error, Debug)]
pub enum LpccError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Sample rate mismatch: extractor expects {expected} Hz, sound has {found} Hz")]
    ConfigMismatch { expected: u32, found: u32 },

    #[error("Invalid sample range {start}..{end} for a sound of {len} samples")]
    InvalidRange { start: usize, end: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, LpccError>;
