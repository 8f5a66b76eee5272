use serde::{Deserialize, Serialize};
use std::fmt;

/// Vocal-range category, ordered from lowest to highest voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VoiceCategory {
    Bass,
    Baritone,
    Tenor,
    Contralto,
    MezzoSoprano,
    Soprano,

    /// No voiced frames to classify
    Unclassified,
}

impl VoiceCategory {
    /// The six classifiable categories in band order
    pub const RANGES: [VoiceCategory; 6] = [
        VoiceCategory::Bass,
        VoiceCategory::Baritone,
        VoiceCategory::Tenor,
        VoiceCategory::Contralto,
        VoiceCategory::MezzoSoprano,
        VoiceCategory::Soprano,
    ];

    /// Get human-readable category name
    pub fn name(&self) -> &'static str {
        match self {
            VoiceCategory::Bass => "Bass",
            VoiceCategory::Baritone => "Baritone",
            VoiceCategory::Tenor => "Tenor",
            VoiceCategory::Contralto => "Contralto",
            VoiceCategory::MezzoSoprano => "Mezzo-soprano",
            VoiceCategory::Soprano => "Soprano",
            VoiceCategory::Unclassified => "Unclassified",
        }
    }

    /// Band position (0 = Bass), `None` for `Unclassified`
    pub fn rank(&self) -> Option<usize> {
        VoiceCategory::RANGES.iter().position(|c| c == self)
    }
}

impl fmt::Display for VoiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One requested percentile and its value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentile {
    /// Percentile rank in [0, 100]
    pub rank: f32,

    /// Pitch at that rank in Hz
    pub hz: f32,
}

/// Descriptive statistics over the voiced frames of a segment (all Hz)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchSummary {
    /// Number of voiced frames summarised
    pub count: usize,
    pub mean: f32,
    pub median: f32,
    /// Population standard deviation
    pub std_dev: f32,
    pub min: f32,
    pub max: f32,
    /// Tonal range (max - min)
    pub range: f32,
    pub percentiles: Vec<Percentile>,
}

/// Statistics result for a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PitchStats {
    /// Segment had no voiced frames
    Undefined,
    Defined(PitchSummary),
}

impl PitchStats {
    pub fn summary(&self) -> Option<&PitchSummary> {
        match self {
            PitchStats::Undefined => None,
            PitchStats::Defined(summary) => Some(summary),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, PitchStats::Undefined)
    }

    pub fn mean(&self) -> Option<f32> {
        self.summary().map(|s| s.mean)
    }
}

/// Final label for one speaker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceClassification {
    pub speaker: usize,
    pub category: VoiceCategory,

    /// Mean pitch the category was derived from
    pub mean_hz: Option<f32>,

    /// Range hint (max - min), reported alongside the category
    pub range_hz: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_follows_band_order() {
        assert_eq!(VoiceCategory::Bass.rank(), Some(0));
        assert_eq!(VoiceCategory::Soprano.rank(), Some(5));
        assert_eq!(VoiceCategory::Unclassified.rank(), None);
    }

    #[test]
    fn test_display_uses_hyphenated_name() {
        assert_eq!(VoiceCategory::MezzoSoprano.to_string(), "Mezzo-soprano");
    }
}
