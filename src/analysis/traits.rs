//! Stage trait definitions

use crate::model::{PitchTrack, Segment, Waveform};

/// Pitch extractor trait - allows swapping the F0 estimation algorithm
pub trait PitchExtractor {
    /// Estimate one pitch value per analysis frame of the waveform
    fn extract(&self, waveform: &Waveform) -> PitchTrack;
}

/// Speaker segmenter trait - the extension point for real diarization
pub trait Segmenter {
    /// Split a pitch track into exactly `speakers` segments, labelled `0..speakers`
    fn segment(&self, track: &PitchTrack, speakers: usize) -> Vec<Segment>;
}
