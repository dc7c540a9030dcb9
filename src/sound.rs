//! Sound type for audio data representation
//!
//! The Sound type is the fundamental input of every analysis in this crate:
//! an ordered sequence of mono samples together with an integer sample rate.
//! Analyses only ever borrow a Sound, so a single instance can be shared
//! read-only between any number of extractors, including across threads.

/// Audio samples with associated sample rate
#[derive(Debug, Clone, PartialEq)]
pub struct Sound {
    /// Audio samples (mono, normalized to [-1, 1] range)
    samples: Vec<f64>,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl Sound {
    /// Create a Sound from raw samples
    ///
    /// # Arguments
    /// * `samples` - Audio samples (will be cloned)
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Example
    /// ```
    /// use lpcc_core::Sound;
    ///
    /// let samples = vec![0.0, 0.5, 1.0, 0.5, 0.0, -0.5, -1.0, -0.5];
    /// let sound = Sound::from_samples(&samples, 16000);
    /// assert_eq!(sound.sample_rate(), 16000);
    /// ```
    pub fn from_samples(samples: &[f64], sample_rate: u32) -> Self {
        Self {
            samples: samples.to_vec(),
            sample_rate,
        }
    }

    /// Create a Sound from owned samples (avoids cloning)
    pub fn from_samples_owned(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Get the sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get a reference to the audio samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Get the number of samples
    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the sound holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get the total duration in seconds
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Get the time (in seconds) at which the sample with this index starts.
    ///
    /// Frame positions reported by the extractors use this convention, so a
    /// frame starting at sample 160 of a 16 kHz sound sits at 0.01 s.
    pub fn index_to_time(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate as f64
    }

    /// Create a pure tone (sine wave)
    ///
    /// # Arguments
    /// * `frequency` - Frequency in Hz
    /// * `duration` - Duration in seconds
    /// * `sample_rate` - Sample rate in Hz
    /// * `amplitude` - Peak amplitude (0.0 to 1.0)
    /// * `phase` - Initial phase in radians
    pub fn create_tone(
        frequency: f64,
        duration: f64,
        sample_rate: u32,
        amplitude: f64,
        phase: f64,
    ) -> Sound {
        let rate = sample_rate as f64;
        let n_samples = (duration * rate).round().max(0.0) as usize;
        let omega = 2.0 * std::f64::consts::PI * frequency / rate;

        let samples: Vec<f64> = (0..n_samples)
            .map(|i| amplitude * (omega * i as f64 + phase).sin())
            .collect();

        Sound {
            samples,
            sample_rate,
        }
    }

    /// Create silence
    pub fn create_silence(duration: f64, sample_rate: u32) -> Sound {
        let n_samples = (duration * sample_rate as f64).round().max(0.0) as usize;
        Sound {
            samples: vec![0.0; n_samples],
            sample_rate,
        }
    }
}
