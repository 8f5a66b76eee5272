use serde::{Deserialize, Serialize};

/// F0 estimate for one analysis frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchFrame {
    /// Frame index within the track
    pub index: usize,

    /// Frequency in Hz, `None` when the frame is unvoiced
    pub frequency: Option<f32>,
}

impl PitchFrame {
    pub fn voiced(index: usize, frequency: f32) -> Self {
        Self {
            index,
            frequency: Some(frequency),
        }
    }

    pub fn unvoiced(index: usize) -> Self {
        Self {
            index,
            frequency: None,
        }
    }

    pub fn is_voiced(&self) -> bool {
        self.frequency.is_some()
    }
}

/// Time-aligned sequence of pitch estimates, one per analysis frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PitchTrack {
    pub frames: Vec<PitchFrame>,

    /// Sample rate of the waveform the track was computed from
    pub sample_rate: u32,

    /// Hop between frame starts, in samples
    pub hop_size: usize,
}

impl PitchTrack {
    pub fn new(frames: Vec<PitchFrame>, sample_rate: u32, hop_size: usize) -> Self {
        Self {
            frames,
            sample_rate,
            hop_size,
        }
    }

    pub fn empty(sample_rate: u32, hop_size: usize) -> Self {
        Self::new(Vec::new(), sample_rate, hop_size)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn voiced_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_voiced()).count()
    }

    /// Start time of a frame in seconds
    pub fn frame_time(&self, index: usize) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        (index * self.hop_size) as f32 / self.sample_rate as f32
    }
}

/// One speaker's share of a pitch track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Speaker ordinal (0-based)
    pub speaker: usize,

    /// Frames assigned to this speaker, in track order
    pub frames: Vec<PitchFrame>,
}

impl Segment {
    pub fn new(speaker: usize, frames: Vec<PitchFrame>) -> Self {
        Self { speaker, frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frequencies of the voiced frames only
    pub fn voiced_pitches(&self) -> Vec<f32> {
        self.frames.iter().filter_map(|f| f.frequency).collect()
    }
}
