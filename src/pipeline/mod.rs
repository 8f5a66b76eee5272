//! Pipeline configuration and orchestration

pub mod config;
pub mod runner;

pub use config::{AnalysisConfig, PLOT_FILE_NAME};
pub use runner::VoicePipeline;
