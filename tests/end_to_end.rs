use std::f32::consts::PI;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use voice_range::analysis::{McLeodExtractor, PitchClusters, TemporalSplit};
use voice_range::loader::load_audio;
use voice_range::model::{VoiceCategory, Waveform};
use voice_range::report::{render_text, HISTOGRAM_HEIGHT, HISTOGRAM_WIDTH};
use voice_range::{AnalysisConfig, VoiceError, VoicePipeline};

const SAMPLE_RATE: u32 = 22050;

/// Sine tone at 0.5 amplitude
fn tone(freq: f32, secs: f32) -> Vec<f32> {
    let n = (secs * SAMPLE_RATE as f32) as usize;
    (0..n)
        .map(|i| 0.5 * (2.0 * PI * freq * i as f32 / SAMPLE_RATE as f32).sin())
        .collect()
}

/// 100 Hz for the first half, 300 Hz for the second
fn two_voices() -> Waveform {
    let mut samples = tone(100.0, 4.0);
    samples.extend(tone(300.0, 4.0));
    Waveform::new(samples, SAMPLE_RATE)
}

/// Minimal 16-bit PCM mono WAV writer
fn write_wav(path: &Path, samples: &[f32]) -> std::io::Result<()> {
    let data_len = (samples.len() * 2) as u32;
    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&SAMPLE_RATE.to_le_bytes());
    bytes.extend_from_slice(&(SAMPLE_RATE * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for &s in samples {
        let v = (s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    fs::write(path, bytes)
}

fn config(dir: &Path) -> AnalysisConfig {
    AnalysisConfig::new(dir.to_path_buf())
}

#[test]
fn test_two_tones_classified_low_then_high() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let pipeline =
        VoicePipeline::new(config(temp_dir.path()), McLeodExtractor::new(), TemporalSplit)
            .expect("Failed to create pipeline");

    let report = pipeline.analyze_waveform(&two_voices(), "synthetic");
    assert_eq!(report.speakers.len(), 2);

    let low = &report.speakers[0];
    let high = &report.speakers[1];

    assert!(matches!(
        low.classification.category,
        VoiceCategory::Bass | VoiceCategory::Baritone
    ));
    assert!(matches!(
        high.classification.category,
        VoiceCategory::MezzoSoprano | VoiceCategory::Soprano
    ));

    let low_mean = low.stats.mean().expect("speaker 0 voiced");
    let high_mean = high.stats.mean().expect("speaker 1 voiced");
    assert!((low_mean - 100.0).abs() < 5.0, "speaker 0 mean {}", low_mean);
    assert!((high_mean - 300.0).abs() < 5.0, "speaker 1 mean {}", high_mean);
    assert!(report.warnings.is_empty());
}

#[test]
fn test_silence_is_unclassified() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let pipeline =
        VoicePipeline::new(config(temp_dir.path()), McLeodExtractor::new(), TemporalSplit)
            .expect("Failed to create pipeline");

    let silence = Waveform::new(vec![0.0; SAMPLE_RATE as usize * 2], SAMPLE_RATE);
    let report = pipeline.analyze_waveform(&silence, "silence");

    assert!(report.frame_count > 0);
    assert_eq!(report.voiced_frames, 0);
    for speaker in &report.speakers {
        assert_eq!(speaker.classification.category, VoiceCategory::Unclassified);
        assert!(speaker.stats.is_undefined());
    }

    let text = render_text(&report);
    assert_eq!(text.matches("Voice type: Unclassified").count(), 2);
}

#[test]
fn test_wav_file_through_full_run() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let audio_path = temp_dir.path().join("voices.wav");
    let out_dir = temp_dir.path().join("out");
    write_wav(&audio_path, &two_voices().samples).expect("Failed to write wav");

    let waveform = load_audio(&audio_path).expect("Failed to load wav");
    assert_eq!(waveform.sample_rate, SAMPLE_RATE);
    assert_eq!(waveform.len(), two_voices().len());

    let pipeline = VoicePipeline::new(config(&out_dir), McLeodExtractor::new(), TemporalSplit)
        .expect("Failed to create pipeline");
    let report = pipeline.run(&audio_path).expect("Analysis failed");

    assert!(matches!(
        report.speakers[0].classification.category,
        VoiceCategory::Bass | VoiceCategory::Baritone
    ));
    assert!(matches!(
        report.speakers[1].classification.category,
        VoiceCategory::MezzoSoprano | VoiceCategory::Soprano
    ));

    let plot = out_dir.join("pitch_distribution.png");
    assert!(plot.exists());
    let img = image::open(&plot).expect("Failed to read histogram");
    assert_eq!(img.width(), HISTOGRAM_WIDTH);
    assert_eq!(img.height(), HISTOGRAM_HEIGHT);
}

#[test]
fn test_histogram_written_for_silence() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let audio_path = temp_dir.path().join("silence.wav");
    write_wav(&audio_path, &vec![0.0; SAMPLE_RATE as usize]).expect("Failed to write wav");

    let pipeline =
        VoicePipeline::new(config(temp_dir.path()), McLeodExtractor::new(), TemporalSplit)
            .expect("Failed to create pipeline");
    let report = pipeline.run(&audio_path).expect("Analysis failed");

    assert!(report
        .speakers
        .iter()
        .all(|s| s.classification.category == VoiceCategory::Unclassified));
    assert!(temp_dir.path().join("pitch_distribution.png").exists());
}

#[test]
fn test_unwritable_histogram_keeps_report() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let audio_path = temp_dir.path().join("voices.wav");
    write_wav(&audio_path, &two_voices().samples).expect("Failed to write wav");

    // Output "directory" is a regular file, so the image cannot be created
    let blocker = temp_dir.path().join("not_a_dir");
    fs::write(&blocker, b"occupied").expect("Failed to write file");

    let pipeline = VoicePipeline::new(config(&blocker), McLeodExtractor::new(), TemporalSplit)
        .expect("Failed to create pipeline");
    let report = pipeline.run(&audio_path).expect("Render failure must not be fatal");

    assert_eq!(report.speakers.len(), 2);
    assert!(report.speakers[0].stats.mean().is_some());
    assert!(report
        .warnings
        .iter()
        .any(|w| w.contains("failed to render")));
}

#[test]
fn test_directory_input_is_decode_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let result = load_audio(temp_dir.path());
    assert!(matches!(result, Err(VoiceError::Decode { .. })));
}

#[test]
fn test_missing_file_reported() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let pipeline =
        VoicePipeline::new(config(temp_dir.path()), McLeodExtractor::new(), TemporalSplit)
            .expect("Failed to create pipeline");

    let missing = temp_dir.path().join("missing.mp3");
    match pipeline.run(&missing) {
        Err(VoiceError::FileNotFound { path }) => assert_eq!(path, missing),
        other => panic!("expected FileNotFound, got {:?}", other.map(|r| r.source)),
    }
    assert!(!temp_dir.path().join("pitch_distribution.png").exists());
}

#[test]
fn test_garbage_file_is_decode_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("notes.mp3");
    fs::write(&path, "this is not audio data\n".repeat(200)).expect("Failed to write file");

    let result = load_audio(&path);
    assert!(matches!(result, Err(VoiceError::Decode { .. })));
}

#[test]
fn test_pitch_clusters_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let pipeline = VoicePipeline::new(
        config(temp_dir.path()).with_plot(false),
        McLeodExtractor::new(),
        PitchClusters,
    )
    .expect("Failed to create pipeline");

    // Alternate the two voices every second
    let mut samples = Vec::new();
    for i in 0..6 {
        let freq = if i % 2 == 0 { 300.0 } else { 100.0 };
        samples.extend(tone(freq, 1.0));
    }
    let report = pipeline.analyze_waveform(&Waveform::new(samples, SAMPLE_RATE), "alternating");

    let low = report.speakers[0].stats.mean().expect("low cluster voiced");
    let high = report.speakers[1].stats.mean().expect("high cluster voiced");
    assert!(low < 150.0, "low cluster mean {}", low);
    assert!(high > 250.0, "high cluster mean {}", high);
}
