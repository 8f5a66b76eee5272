//! Audio loading
//!
//! Decodes an audio file to mono f32 samples with symphonia. Packets that
//! fail to decode are skipped; only a missing file or an unreadable
//! container is fatal.

use crate::error::{Result, VoiceError};
use crate::model::Waveform;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Load an audio file as a mono waveform
pub fn load_audio(path: &Path) -> Result<Waveform> {
    log::debug!("Loading audio: {:?}", path);

    if !path.exists() {
        return Err(VoiceError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let decode_err = |reason: String| VoiceError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let file = std::fs::File::open(path).map_err(|e| decode_err(e.to_string()))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| decode_err(format!("unsupported or corrupt container ({})", e)))?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| decode_err("no audio track found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| decode_err("no sample rate in audio track".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_err(format!("failed to create decoder ({})", e)))?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(p) => p,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => break,
            Err(e) => {
                log::warn!("Error reading packet: {:?}", e);
                break;
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            Err(e) => {
                log::warn!("Error decoding packet: {:?}", e);
                continue;
            }
        };

        let spec = *decoded.spec();
        let mut sample_buf = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        downmix_into(sample_buf.samples(), spec.channels.count(), &mut samples);
    }

    let waveform = Waveform::new(samples, sample_rate);

    log::info!(
        "Audio loaded: {} samples ({:.2}s) at {}Hz",
        waveform.len(),
        waveform.duration_secs(),
        sample_rate
    );

    Ok(waveform)
}

/// Average interleaved channels into mono and append to `out`
fn downmix_into(interleaved: &[f32], channels: usize, out: &mut Vec<f32>) {
    if channels > 1 {
        out.extend(
            interleaved
                .chunks(channels)
                .map(|frame| frame.iter().sum::<f32>() / channels as f32),
        );
    } else {
        out.extend_from_slice(interleaved);
    }
}
