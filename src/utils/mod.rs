//! Utility modules for signal processing
//!
//! This module contains the low-level numeric primitives used by the
//! extractor: FFT correlation, the LPC solver and cepstral conversion.

pub mod cepstrum;
pub mod fft;
pub mod lpc;

pub use cepstrum::{lpc_to_cepstrum, MIN_RESIDUAL_ENERGY};
pub use fft::{next_power_of_two, CrossCorrelator};
pub use lpc::{levinson_durbin, LpcResult};
