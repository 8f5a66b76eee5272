//! Vocal-range classification
//!
//! Five ascending edges split (0, +inf) into six bands, one per category in
//! `VoiceCategory::RANGES` order. A mean pitch exactly on an edge belongs to
//! the higher band.

use crate::error::{Result, VoiceError};
use crate::model::{PitchStats, VoiceCategory, VoiceClassification};
use serde::{Deserialize, Serialize};

/// Default band edges in Hz: Bass | Baritone | Tenor | Contralto | Mezzo | Soprano
pub const DEFAULT_BAND_EDGES: [f32; 5] = [110.0, 147.0, 220.0, 260.0, 370.0];

/// Frequency band table for the six vocal-range categories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    edges: [f32; 5],
}

impl BandTable {
    /// Build a table from five interior edges
    ///
    /// Edges must be finite, positive and strictly ascending.
    pub fn new(edges: [f32; 5]) -> Result<Self> {
        if edges.iter().any(|e| !e.is_finite() || *e <= 0.0) {
            return Err(VoiceError::InvalidConfig(format!(
                "band edges must be finite and positive: {:?}",
                edges
            )));
        }
        if edges.windows(2).any(|w| w[0] >= w[1]) {
            return Err(VoiceError::InvalidConfig(format!(
                "band edges must be strictly ascending: {:?}",
                edges
            )));
        }
        Ok(Self { edges })
    }

    /// Build a table from a slice, e.g. parsed from the command line
    pub fn from_slice(edges: &[f32]) -> Result<Self> {
        let edges: [f32; 5] = edges.try_into().map_err(|_| {
            VoiceError::InvalidConfig(format!(
                "expected 5 band edges, got {}",
                edges.len()
            ))
        })?;
        Self::new(edges)
    }

    pub fn edges(&self) -> &[f32; 5] {
        &self.edges
    }

    /// Lower and upper bound of a category's band (upper is exclusive)
    pub fn band(&self, category: VoiceCategory) -> Option<(f32, f32)> {
        let rank = category.rank()?;
        let lower = if rank == 0 { 0.0 } else { self.edges[rank - 1] };
        let upper = self.edges.get(rank).copied().unwrap_or(f32::INFINITY);
        Some((lower, upper))
    }

    /// Category for a mean pitch in Hz
    pub fn category_for(&self, mean_hz: f32) -> VoiceCategory {
        if !mean_hz.is_finite() || mean_hz < 0.0 {
            return VoiceCategory::Unclassified;
        }
        let band = self.edges.iter().take_while(|&&edge| mean_hz >= edge).count();
        VoiceCategory::RANGES[band]
    }

    /// Classify one speaker from its statistics
    pub fn classify(&self, speaker: usize, stats: &PitchStats) -> VoiceClassification {
        let Some(summary) = stats.summary() else {
            return VoiceClassification {
                speaker,
                category: VoiceCategory::Unclassified,
                mean_hz: None,
                range_hz: None,
            };
        };

        let category = self.category_for(summary.mean);
        log::debug!(
            "Speaker {}: mean {:.2} Hz -> {}",
            speaker,
            summary.mean,
            category
        );

        VoiceClassification {
            speaker,
            category,
            mean_hz: Some(summary.mean),
            range_hz: Some(summary.range),
        }
    }
}

impl Default for BandTable {
    fn default() -> Self {
        Self {
            edges: DEFAULT_BAND_EDGES,
        }
    }
}
