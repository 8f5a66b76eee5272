//! Plain-text report

use super::VoiceReport;
use crate::model::PitchStats;
use std::fmt;

/// Render a human-readable report, one block per speaker
pub fn render_text(report: &VoiceReport) -> String {
    report.to_string()
}

impl fmt::Display for VoiceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Source: {}", self.source)?;
        writeln!(
            f,
            "Duration: {:.2}s at {}Hz, {} frames ({} voiced)",
            self.duration_secs, self.sample_rate, self.frame_count, self.voiced_frames
        )?;

        for speaker in &self.speakers {
            writeln!(f)?;
            writeln!(f, "Speaker {}", speaker.speaker())?;
            writeln!(f, "  Voice type: {}", speaker.classification.category)?;

            match &speaker.stats {
                PitchStats::Undefined => {
                    writeln!(
                        f,
                        "  Pitch: n/a (no voiced frames in {} frames)",
                        speaker.frame_count
                    )?;
                }
                PitchStats::Defined(s) => {
                    writeln!(f, "  Voiced frames: {} of {}", s.count, speaker.frame_count)?;
                    if let Some((start, end)) = speaker.time_span {
                        writeln!(f, "  Time span:    {:.2}s - {:.2}s", start, end)?;
                    }
                    writeln!(f, "  Mean pitch:   {:.2} Hz", s.mean)?;
                    writeln!(f, "  Median pitch: {:.2} Hz", s.median)?;
                    writeln!(f, "  Std dev:      {:.2} Hz", s.std_dev)?;
                    writeln!(f, "  Min / max:    {:.2} / {:.2} Hz", s.min, s.max)?;
                    writeln!(f, "  Tonal range:  {:.2} Hz", s.range)?;
                    for p in &s.percentiles {
                        writeln!(f, "  P{:<3}          {:.2} Hz", p.rank, p.hz)?;
                    }
                }
            }
        }

        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f, "Warnings:")?;
            for warning in &self.warnings {
                writeln!(f, "  - {}", warning)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        Percentile, PitchFrame, PitchSummary, Segment, VoiceCategory, VoiceClassification,
    };
    use crate::report::SpeakerReport;

    fn report() -> VoiceReport {
        let summary = PitchSummary {
            count: 2,
            mean: 101.5,
            median: 101.5,
            std_dev: 1.5,
            min: 100.0,
            max: 103.0,
            range: 3.0,
            percentiles: vec![Percentile {
                rank: 25.0,
                hz: 100.75,
            }],
        };
        VoiceReport {
            source: "take.mp3".to_string(),
            sample_rate: 22050,
            duration_secs: 2.0,
            frame_count: 3,
            voiced_frames: 2,
            speakers: vec![
                SpeakerReport {
                    segment: Segment::new(
                        0,
                        vec![PitchFrame::voiced(0, 100.0), PitchFrame::voiced(1, 103.0)],
                    ),
                    frame_count: 2,
                    time_span: Some((0.0, 0.05)),
                    stats: PitchStats::Defined(summary),
                    classification: VoiceClassification {
                        speaker: 0,
                        category: VoiceCategory::Bass,
                        mean_hz: Some(101.5),
                        range_hz: Some(3.0),
                    },
                },
                SpeakerReport {
                    segment: Segment::new(1, vec![PitchFrame::unvoiced(2)]),
                    frame_count: 1,
                    time_span: Some((0.05, 0.07)),
                    stats: PitchStats::Undefined,
                    classification: VoiceClassification {
                        speaker: 1,
                        category: VoiceCategory::Unclassified,
                        mean_hz: None,
                        range_hz: None,
                    },
                },
            ],
            warnings: vec!["speaker 1 has no voiced frames".to_string()],
        }
    }

    #[test]
    fn test_text_lists_each_speaker() {
        let text = render_text(&report());
        assert!(text.contains("Speaker 0"));
        assert!(text.contains("Voice type: Bass"));
        assert!(text.contains("Mean pitch:   101.50 Hz"));
        assert!(text.contains("Tonal range:  3.00 Hz"));
        assert!(text.contains("Time span:    0.00s - 0.05s"));
        assert!(text.contains("Speaker 1"));
        assert!(text.contains("Voice type: Unclassified"));
        assert!(text.contains("n/a"));
        assert!(text.contains("Warnings:"));
    }
}
