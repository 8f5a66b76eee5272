//! Error taxonomy for the analysis pipeline
//!
//! `FileNotFound` and `Decode` are fatal and only raised by the loader.
//! `EmptyAudio` and `UndefinedStatistics` are recoverable: the pipeline
//! records them as report warnings and carries on.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    /// Input path does not exist
    #[error("audio file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Input exists but could not be decoded as audio
    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    /// Decoded waveform has zero samples
    #[error("{source_name} decoded to zero samples")]
    EmptyAudio { source_name: String },

    /// Segment had no voiced frames
    #[error("speaker {speaker} has no voiced frames, statistics are undefined")]
    UndefinedStatistics { speaker: usize },

    /// Rejected configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Histogram image could not be written
    #[error("failed to render {}: {reason}", path.display())]
    Render { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, VoiceError>;
