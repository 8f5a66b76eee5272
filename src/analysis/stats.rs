//! Descriptive pitch statistics
//!
//! Population standard deviation (divide by n). Median and percentiles use
//! linear interpolation between closest ranks: rank = p/100 * (n - 1).

use crate::model::{Percentile, PitchStats, PitchSummary, Segment};

/// Default percentile ranks reported alongside the median
pub const DEFAULT_PERCENTILES: [f32; 2] = [25.0, 75.0];

/// Summarise the voiced frames of a segment
pub fn summarize(segment: &Segment, percentiles: &[f32]) -> PitchStats {
    let mut values = segment.voiced_pitches();
    if values.is_empty() {
        log::debug!("Speaker {}: no voiced frames", segment.speaker);
        return PitchStats::Undefined;
    }

    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    let min = values[0];
    let max = values[count - 1];

    let sum: f64 = values.iter().map(|&v| v as f64).sum();
    let mean = sum / count as f64;
    let variance = values
        .iter()
        .map(|&v| {
            let d = v as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / count as f64;

    let summary = PitchSummary {
        count,
        mean: (mean as f32).clamp(min, max),
        median: percentile_sorted(&values, 50.0),
        std_dev: variance.sqrt() as f32,
        min,
        max,
        range: max - min,
        percentiles: percentiles
            .iter()
            .map(|&rank| Percentile {
                rank,
                hz: percentile_sorted(&values, rank),
            })
            .collect(),
    };

    log::debug!(
        "Speaker {}: {} voiced frames, mean {:.2} Hz, std {:.2} Hz",
        segment.speaker,
        count,
        summary.mean,
        summary.std_dev
    );

    PitchStats::Defined(summary)
}

/// Linearly interpolated percentile of ascending, non-empty data
fn percentile_sorted(sorted: &[f32], rank: f32) -> f32 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let pos = (rank.clamp(0.0, 100.0) as f64 / 100.0) * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    let lo = sorted[lower] as f64;
    let hi = sorted[upper] as f64;
    ((lo + (hi - lo) * frac) as f32).clamp(sorted[lower], sorted[upper])
}
