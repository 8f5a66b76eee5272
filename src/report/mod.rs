//! Report model and renderers
//!
//! The pipeline produces a `VoiceReport`; this module turns it into a text
//! report, a JSON document, or the pitch distribution histogram.

mod histogram;
mod text;

pub use histogram::{write_histogram, HISTOGRAM_HEIGHT, HISTOGRAM_WIDTH};
pub use text::render_text;

use crate::model::{PitchStats, Segment, VoiceClassification};
use anyhow::{Context, Result};
use serde::Serialize;

/// Everything known about one speaker after analysis
#[derive(Debug, Clone, Serialize)]
pub struct SpeakerReport {
    /// Frames assigned to this speaker (omitted from JSON)
    #[serde(skip)]
    pub segment: Segment,

    /// Total frames in the segment, voiced or not
    pub frame_count: usize,

    /// Start of the first frame and end of the last hop, in seconds
    pub time_span: Option<(f32, f32)>,

    pub stats: PitchStats,
    pub classification: VoiceClassification,
}

impl SpeakerReport {
    pub fn speaker(&self) -> usize {
        self.segment.speaker
    }
}

/// Result of one pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct VoiceReport {
    /// Where the audio came from (path or description)
    pub source: String,
    pub sample_rate: u32,
    pub duration_secs: f32,

    /// Analysis frames in the pitch track
    pub frame_count: usize,
    pub voiced_frames: usize,

    pub speakers: Vec<SpeakerReport>,

    /// Non-fatal conditions met during analysis
    pub warnings: Vec<String>,
}

/// Serialize a report as pretty-printed JSON
pub fn render_json(report: &VoiceReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}
