//! Fundamental frequency extraction
//!
//! Frames the waveform and runs the McLeod Pitch Method (from the
//! `pitch-detection` crate) on every frame. A frame is reported as unvoiced
//! when it is too quiet, when the detector is not confident enough, or when
//! the estimate falls outside the configured search band.

use super::traits::PitchExtractor;
use crate::model::{PitchFrame, PitchTrack, Waveform};
use pitch_detection::detector::mcleod::McLeodDetector;
use pitch_detection::detector::PitchDetector;

/// Default analysis frame length in samples
pub const DEFAULT_FRAME_SIZE: usize = 2048;
/// Default hop between frame starts in samples
pub const DEFAULT_HOP_SIZE: usize = 512;
/// Default RMS level below which a frame counts as silence
pub const DEFAULT_VOICING_THRESHOLD: f32 = 0.01;
/// Default minimum McLeod clarity for a voiced frame
pub const DEFAULT_CLARITY_THRESHOLD: f32 = 0.6;
/// C2
pub const DEFAULT_MIN_FREQUENCY: f32 = 65.41;
/// C7
pub const DEFAULT_MAX_FREQUENCY: f32 = 2093.0;

/// Number of whole frames that fit into `num_samples`
pub fn frame_count(num_samples: usize, frame_size: usize, hop_size: usize) -> usize {
    if frame_size == 0 || hop_size == 0 || num_samples < frame_size {
        return 0;
    }
    (num_samples - frame_size) / hop_size + 1
}

/// McLeod pitch extractor with an RMS voicing gate
#[derive(Debug, Clone)]
pub struct McLeodExtractor {
    frame_size: usize,
    hop_size: usize,
    voicing_threshold: f32,
    clarity_threshold: f32,
    min_frequency: f32,
    max_frequency: f32,
}

impl McLeodExtractor {
    pub fn new() -> Self {
        Self {
            frame_size: DEFAULT_FRAME_SIZE,
            hop_size: DEFAULT_HOP_SIZE,
            voicing_threshold: DEFAULT_VOICING_THRESHOLD,
            clarity_threshold: DEFAULT_CLARITY_THRESHOLD,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            max_frequency: DEFAULT_MAX_FREQUENCY,
        }
    }

    /// Set frame and hop size in samples
    pub fn with_framing(mut self, frame_size: usize, hop_size: usize) -> Self {
        self.frame_size = frame_size;
        self.hop_size = hop_size;
        self
    }

    /// Set the RMS voicing gate
    pub fn with_voicing_threshold(mut self, threshold: f32) -> Self {
        self.voicing_threshold = threshold;
        self
    }

    /// Set the minimum detector clarity
    pub fn with_clarity_threshold(mut self, threshold: f32) -> Self {
        self.clarity_threshold = threshold;
        self
    }

    /// Set the pitch search band in Hz
    pub fn with_frequency_range(mut self, min: f32, max: f32) -> Self {
        self.min_frequency = min;
        self.max_frequency = max;
        self
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Upper search bound, never above Nyquist
    fn ceiling(&self, waveform: &Waveform) -> f32 {
        self.max_frequency.min(waveform.nyquist())
    }
}

impl Default for McLeodExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PitchExtractor for McLeodExtractor {
    fn extract(&self, waveform: &Waveform) -> PitchTrack {
        let total = frame_count(waveform.len(), self.frame_size, self.hop_size);
        if total == 0 {
            log::debug!(
                "No complete frames in {} samples (frame size {})",
                waveform.len(),
                self.frame_size
            );
            return PitchTrack::empty(waveform.sample_rate, self.hop_size);
        }

        let ceiling = self.ceiling(waveform);
        let mut detector = McLeodDetector::<f32>::new(self.frame_size, self.frame_size / 2);
        let mut frames = Vec::with_capacity(total);
        let mut quiet = 0usize;

        for index in 0..total {
            let start = index * self.hop_size;
            let frame = &waveform.samples[start..start + self.frame_size];

            if rms(frame) < self.voicing_threshold {
                quiet += 1;
                frames.push(PitchFrame::unvoiced(index));
                continue;
            }

            // Gate on RMS above, so the detector's own power gate is disabled
            let estimate = detector
                .get_pitch(
                    frame,
                    waveform.sample_rate as usize,
                    0.0,
                    self.clarity_threshold,
                )
                .map(|pitch| pitch.frequency)
                .filter(|f| f.is_finite() && *f >= self.min_frequency && *f <= ceiling);

            frames.push(match estimate {
                Some(frequency) => PitchFrame::voiced(index, frequency),
                None => PitchFrame::unvoiced(index),
            });
        }

        let track = PitchTrack::new(frames, waveform.sample_rate, self.hop_size);
        log::debug!(
            "Pitch track: {} frames, {} voiced, {} below voicing threshold",
            track.len(),
            track.voiced_count(),
            quiet
        );
        track
    }
}

/// Root-mean-square level of a frame
fn rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = frame.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_sq / frame.len() as f64).sqrt() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn tone(freq: f32, secs: f32, sample_rate: u32) -> Vec<f32> {
        let n = (secs * sample_rate as f32) as usize;
        (0..n)
            .map(|i| 0.5 * (2.0 * PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(0, 2048, 512), 0);
        assert_eq!(frame_count(2047, 2048, 512), 0);
        assert_eq!(frame_count(2048, 2048, 512), 1);
        assert_eq!(frame_count(2560, 2048, 512), 2);
        assert_eq!(frame_count(3000, 2048, 512), 2);
    }

    #[test]
    fn test_empty_waveform_gives_empty_track() {
        let track = McLeodExtractor::new().extract(&Waveform::new(Vec::new(), 22050));
        assert!(track.is_empty());
    }

    #[test]
    fn test_silence_is_unvoiced() {
        let waveform = Waveform::new(vec![0.0; 22050], 22050);
        let track = McLeodExtractor::new().extract(&waveform);
        assert_eq!(track.len(), frame_count(22050, 2048, 512));
        assert_eq!(track.voiced_count(), 0);
    }

    #[test]
    fn test_pure_tone_is_detected() {
        let waveform = Waveform::new(tone(220.0, 1.0, 22050), 22050);
        let track = McLeodExtractor::new().extract(&waveform);

        assert!(track.voiced_count() > track.len() / 2);
        for f in track.frames.iter().filter_map(|f| f.frequency) {
            assert!((f - 220.0).abs() < 5.0, "unexpected estimate {}", f);
        }
    }

    #[test]
    fn test_estimates_bounded_by_nyquist() {
        // 8 kHz audio caps the search band at 4 kHz even with a higher max
        let waveform = Waveform::new(tone(300.0, 0.5, 8000), 8000);
        let extractor = McLeodExtractor::new()
            .with_framing(512, 128)
            .with_frequency_range(50.0, 20_000.0);
        let track = extractor.extract(&waveform);

        assert_eq!(track.len(), frame_count(4000, 512, 128));
        for f in track.frames.iter().filter_map(|f| f.frequency) {
            assert!(f >= 0.0 && f <= 4000.0);
        }
    }

    #[test]
    fn test_out_of_band_estimate_is_unvoiced() {
        let waveform = Waveform::new(tone(440.0, 0.5, 22050), 22050);
        let extractor = McLeodExtractor::new().with_frequency_range(65.0, 300.0);
        let track = extractor.extract(&waveform);
        assert_eq!(track.voiced_count(), 0);
    }
}
