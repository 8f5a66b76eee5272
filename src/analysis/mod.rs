//! Pitch analysis stages
//!
//! Each stage is a one-shot transformation with no retained state:
//! extraction and segmentation sit behind traits so alternative algorithms
//! can be swapped in, summarising and classifying are plain functions.

mod classify;
mod pitch;
mod segment;
mod stats;
mod traits;

pub use classify::{BandTable, DEFAULT_BAND_EDGES};
pub use pitch::{
    frame_count, McLeodExtractor, DEFAULT_CLARITY_THRESHOLD, DEFAULT_FRAME_SIZE,
    DEFAULT_HOP_SIZE, DEFAULT_MAX_FREQUENCY, DEFAULT_MIN_FREQUENCY, DEFAULT_VOICING_THRESHOLD,
};
pub use segment::{PitchClusters, TemporalSplit};
pub use stats::{summarize, DEFAULT_PERCENTILES};
pub use traits::{PitchExtractor, Segmenter};
