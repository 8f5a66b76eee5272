use serde::{Deserialize, Serialize};

/// Decoded mono audio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Waveform {
    /// Amplitude samples, nominally in [-1.0, 1.0]
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    /// Nyquist frequency (sample rate / 2)
    pub fn nyquist(&self) -> f32 {
        self.sample_rate as f32 / 2.0
    }
}
