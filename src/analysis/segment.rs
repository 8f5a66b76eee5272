//! Speaker segmentation
//!
//! Neither policy here is real diarization. `TemporalSplit` cuts the track
//! into equal contiguous runs; `PitchClusters` groups frames by 1-D k-means
//! over their pitch, lowest cluster first.

use super::traits::Segmenter;
use crate::model::{PitchFrame, PitchTrack, Segment};

/// Contiguous, equal-length split in temporal order
#[derive(Debug, Clone, Copy, Default)]
pub struct TemporalSplit;

impl TemporalSplit {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for TemporalSplit {
    fn segment(&self, track: &PitchTrack, speakers: usize) -> Vec<Segment> {
        let speakers = speakers.max(1);
        let base = track.len() / speakers;
        let remainder = track.len() % speakers;

        let mut segments = Vec::with_capacity(speakers);
        let mut start = 0;
        for speaker in 0..speakers {
            // Earlier segments absorb the remainder
            let len = base + usize::from(speaker < remainder);
            segments.push(Segment::new(
                speaker,
                track.frames[start..start + len].to_vec(),
            ));
            start += len;
        }

        log::debug!(
            "Temporal split: {} frames into {} segments of ~{}",
            track.len(),
            speakers,
            base
        );
        segments
    }
}

/// Upper bound on Lloyd iterations
const MAX_ITERATIONS: usize = 100;

/// Pitch clustering with deterministic 1-D k-means
#[derive(Debug, Clone, Copy, Default)]
pub struct PitchClusters;

impl PitchClusters {
    pub fn new() -> Self {
        Self
    }
}

impl Segmenter for PitchClusters {
    fn segment(&self, track: &PitchTrack, speakers: usize) -> Vec<Segment> {
        let speakers = speakers.max(1);
        let voiced: Vec<f32> = track.frames.iter().filter_map(|f| f.frequency).collect();
        let centroids = kmeans_1d(&voiced, speakers);

        let mut buckets: Vec<Vec<PitchFrame>> = vec![Vec::new(); speakers];
        let mut current = 0;
        for frame in &track.frames {
            if let Some(frequency) = frame.frequency {
                current = nearest(&centroids, frequency);
            }
            // Unvoiced frames follow the last voiced frame's cluster
            buckets[current].push(*frame);
        }

        log::debug!("Pitch clusters: centroids {:?}", centroids);

        buckets
            .into_iter()
            .enumerate()
            .map(|(speaker, frames)| Segment::new(speaker, frames))
            .collect()
    }
}

/// Cluster values into at most `k` groups; returns centroids in ascending order
///
/// Centroids start at evenly spaced quantiles of the sorted data, which keeps
/// the result deterministic. A cluster that loses all members keeps its
/// previous centroid. Fewer than `k` distinct values leaves the surplus
/// centroids at `f32::INFINITY` so nothing is assigned to them.
fn kmeans_1d(values: &[f32], k: usize) -> Vec<f32> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted.dedup();

    if sorted.is_empty() {
        return vec![f32::INFINITY; k];
    }

    let usable = k.min(sorted.len());
    let mut centroids: Vec<f32> = (0..usable)
        .map(|i| {
            let q = (i as f32 + 0.5) / usable as f32;
            let idx = ((q * sorted.len() as f32) as usize).min(sorted.len() - 1);
            sorted[idx]
        })
        .collect();

    for _ in 0..MAX_ITERATIONS {
        let mut sums = vec![0.0f64; usable];
        let mut counts = vec![0usize; usable];
        for &v in values {
            let c = nearest(&centroids, v);
            sums[c] += v as f64;
            counts[c] += 1;
        }

        let mut changed = false;
        for c in 0..usable {
            if counts[c] == 0 {
                continue;
            }
            let next = (sums[c] / counts[c] as f64) as f32;
            if next != centroids[c] {
                centroids[c] = next;
                changed = true;
            }
        }

        centroids.sort_by(|a, b| a.total_cmp(b));
        if !changed {
            break;
        }
    }

    centroids.resize(k, f32::INFINITY);
    centroids
}

/// Index of the closest centroid; ties go to the lower cluster
fn nearest(centroids: &[f32], value: f32) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, &c) in centroids.iter().enumerate() {
        let dist = (c - value).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
