//! Data model shared by every pipeline stage
//!
//! These types carry no behaviour beyond simple accessors; the stages in
//! `analysis` create and consume them.

mod pitch;
mod voice;
mod waveform;

pub use pitch::{PitchFrame, PitchTrack, Segment};
pub use voice::{Percentile, PitchStats, PitchSummary, VoiceCategory, VoiceClassification};
pub use waveform::Waveform;
