//! Voice Range - speaker voice type classification from recorded audio
//!
//! This library estimates the pitch of each analysis frame, splits the
//! recording into speaker segments, summarises each segment's pitch and maps
//! the mean onto a vocal-range category (Bass through Soprano).

pub mod analysis;
pub mod error;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod report;

pub use error::VoiceError;
pub use pipeline::{AnalysisConfig, VoicePipeline};
