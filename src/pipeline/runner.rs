//! Main analysis pipeline orchestration

use super::config::AnalysisConfig;
use crate::analysis::{summarize, PitchExtractor, Segmenter};
use crate::error::{Result, VoiceError};
use crate::loader::load_audio;
use crate::model::Waveform;
use crate::report::{write_histogram, SpeakerReport, VoiceReport};
use std::path::Path;

/// Main analysis pipeline
pub struct VoicePipeline<E: PitchExtractor, S: Segmenter> {
    config: AnalysisConfig,
    extractor: E,
    segmenter: S,
}

impl<E: PitchExtractor, S: Segmenter> VoicePipeline<E, S> {
    /// Create a new pipeline, rejecting invalid configuration up front
    pub fn new(config: AnalysisConfig, extractor: E, segmenter: S) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            extractor,
            segmenter,
        })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the complete process: load, analyze, and write the histogram
    ///
    /// Only loading errors are returned; a histogram that cannot be written
    /// becomes a report warning.
    pub fn run(&self, audio_path: &Path) -> Result<VoiceReport> {
        let mut report = self.analyze_file(audio_path)?;

        if self.config.render_plot {
            if let Err(e) =
                write_histogram(&report, &self.config.plot_path(), self.config.histogram_bins)
            {
                log::warn!("{}", e);
                report.warnings.push(e.to_string());
            }
        }

        Ok(report)
    }

    /// Load an audio file and analyze it
    pub fn analyze_file(&self, audio_path: &Path) -> Result<VoiceReport> {
        log::info!("Analyzing {:?}", audio_path);
        let waveform = load_audio(audio_path)?;
        Ok(self.analyze_waveform(&waveform, &audio_path.display().to_string()))
    }

    /// Analyze an already decoded waveform
    pub fn analyze_waveform(&self, waveform: &Waveform, source: &str) -> VoiceReport {
        let mut warnings = Vec::new();

        if waveform.is_empty() {
            let warning = VoiceError::EmptyAudio {
                source_name: source.to_string(),
            };
            log::warn!("{}", warning);
            warnings.push(warning.to_string());
        }

        // Step 1: Pitch track
        log::info!("Extracting pitch...");
        let track = self.extractor.extract(waveform);
        log::info!(
            "Pitch track: {} frames, {} voiced",
            track.len(),
            track.voiced_count()
        );

        // Step 2: Speaker segments
        log::info!("Splitting into {} speaker(s)...", self.config.speakers);
        let segments = self.segmenter.segment(&track, self.config.speakers);

        // Step 3: Statistics and classification per speaker
        let mut speakers = Vec::with_capacity(segments.len());
        for segment in segments {
            let stats = summarize(&segment, &self.config.percentiles);
            if stats.is_undefined() {
                let warning = VoiceError::UndefinedStatistics {
                    speaker: segment.speaker,
                };
                log::warn!("{}", warning);
                warnings.push(warning.to_string());
            }

            let classification = self.config.bands.classify(segment.speaker, &stats);
            log::info!(
                "Speaker {}: {}",
                segment.speaker,
                classification.category
            );

            let time_span = segment.frames.first().zip(segment.frames.last()).map(
                |(first, last)| (track.frame_time(first.index), track.frame_time(last.index + 1)),
            );

            speakers.push(SpeakerReport {
                frame_count: segment.len(),
                time_span,
                segment,
                stats,
                classification,
            });
        }

        VoiceReport {
            source: source.to_string(),
            sample_rate: waveform.sample_rate,
            duration_secs: waveform.duration_secs(),
            frame_count: track.len(),
            voiced_frames: track.voiced_count(),
            speakers,
            warnings,
        }
    }
}
