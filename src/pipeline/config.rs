//! Analysis configuration

use crate::analysis::{
    BandTable, McLeodExtractor, DEFAULT_CLARITY_THRESHOLD, DEFAULT_FRAME_SIZE, DEFAULT_HOP_SIZE,
    DEFAULT_MAX_FREQUENCY, DEFAULT_MIN_FREQUENCY, DEFAULT_PERCENTILES, DEFAULT_VOICING_THRESHOLD,
};
use crate::error::{Result, VoiceError};
use std::path::PathBuf;

/// File name of the histogram image
pub const PLOT_FILE_NAME: &str = "pitch_distribution.png";

/// Default number of histogram bins
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Default assumed speaker count
pub const DEFAULT_SPEAKERS: usize = 2;

/// Configuration for one analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Analysis frame length in samples
    pub frame_size: usize,

    /// Hop between frame starts in samples
    pub hop_size: usize,

    /// RMS level below which a frame is unvoiced
    pub voicing_threshold: f32,

    /// Minimum detector clarity (0.0-1.0) for a voiced frame
    pub clarity_threshold: f32,

    /// Pitch search band in Hz
    pub min_frequency: f32,
    pub max_frequency: f32,

    /// Number of speakers to split the recording into
    pub speakers: usize,

    /// Percentile ranks to report (0-100)
    pub percentiles: Vec<f32>,

    /// Frequency band table for classification
    pub bands: BandTable,

    /// Directory the histogram is written to
    pub output_dir: PathBuf,

    /// Histogram bin count
    pub histogram_bins: usize,

    /// Whether to write the histogram image at all
    pub render_plot: bool,
}

impl AnalysisConfig {
    /// Create a configuration with defaults, writing output to `output_dir`
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            hop_size: DEFAULT_HOP_SIZE,
            voicing_threshold: DEFAULT_VOICING_THRESHOLD,
            clarity_threshold: DEFAULT_CLARITY_THRESHOLD,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            max_frequency: DEFAULT_MAX_FREQUENCY,
            speakers: DEFAULT_SPEAKERS,
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            bands: BandTable::default(),
            output_dir,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            render_plot: true,
        }
    }

    /// Set frame and hop size
    pub fn with_framing(mut self, frame_size: usize, hop_size: usize) -> Self {
        self.frame_size = frame_size;
        self.hop_size = hop_size;
        self
    }

    /// Set voicing (RMS) and clarity thresholds
    pub fn with_thresholds(mut self, voicing: f32, clarity: f32) -> Self {
        self.voicing_threshold = voicing;
        self.clarity_threshold = clarity;
        self
    }

    /// Set pitch search band
    pub fn with_frequency_range(mut self, min: f32, max: f32) -> Self {
        self.min_frequency = min;
        self.max_frequency = max;
        self
    }

    /// Set speaker count
    pub fn with_speakers(mut self, speakers: usize) -> Self {
        self.speakers = speakers;
        self
    }

    /// Set reported percentile ranks
    pub fn with_percentiles(mut self, percentiles: Vec<f32>) -> Self {
        self.percentiles = percentiles;
        self
    }

    /// Set classification band table
    pub fn with_bands(mut self, bands: BandTable) -> Self {
        self.bands = bands;
        self
    }

    /// Set histogram bin count
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = bins;
        self
    }

    /// Enable or disable the histogram image
    pub fn with_plot(mut self, enable: bool) -> Self {
        self.render_plot = enable;
        self
    }

    /// Full path of the histogram image
    pub fn plot_path(&self) -> PathBuf {
        self.output_dir.join(PLOT_FILE_NAME)
    }

    /// McLeod extractor built from this configuration
    pub fn extractor(&self) -> McLeodExtractor {
        McLeodExtractor::new()
            .with_framing(self.frame_size, self.hop_size)
            .with_voicing_threshold(self.voicing_threshold)
            .with_clarity_threshold(self.clarity_threshold)
            .with_frequency_range(self.min_frequency, self.max_frequency)
    }

    /// Reject values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(VoiceError::InvalidConfig(msg));

        if self.frame_size == 0 || self.hop_size == 0 {
            return invalid(format!(
                "frame size ({}) and hop size ({}) must be non-zero",
                self.frame_size, self.hop_size
            ));
        }
        if self.hop_size > self.frame_size {
            return invalid(format!(
                "hop size ({}) must not exceed frame size ({})",
                self.hop_size, self.frame_size
            ));
        }
        if !(self.voicing_threshold >= 0.0) {
            return invalid(format!(
                "voicing threshold must be non-negative, got {}",
                self.voicing_threshold
            ));
        }
        if !(0.0..=1.0).contains(&self.clarity_threshold) {
            return invalid(format!(
                "clarity threshold must be within 0-1, got {}",
                self.clarity_threshold
            ));
        }
        if !(self.min_frequency > 0.0 && self.min_frequency < self.max_frequency) {
            return invalid(format!(
                "frequency range {}-{} Hz is empty",
                self.min_frequency, self.max_frequency
            ));
        }
        if self.speakers == 0 {
            return invalid("speaker count must be at least 1".to_string());
        }
        if let Some(p) = self
            .percentiles
            .iter()
            .find(|p| !(0.0..=100.0).contains(*p))
        {
            return invalid(format!("percentile {} is outside 0-100", p));
        }
        if self.histogram_bins == 0 {
            return invalid("histogram needs at least one bin".to_string());
        }
        Ok(())
    }
}
