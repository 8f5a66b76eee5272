use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use voice_range::analysis::{
    BandTable, PitchClusters, PitchExtractor, Segmenter, TemporalSplit, DEFAULT_BAND_EDGES,
};
use voice_range::model::VoiceCategory;
use voice_range::report::{render_json, render_text};
use voice_range::{AnalysisConfig, VoicePipeline};

/// How the pitch track is divided between speakers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SegmenterKind {
    /// Equal contiguous time slices
    Temporal,
    /// k-means over pitch values, lowest voice first
    Clusters,
}

#[derive(Parser, Debug)]
#[command(name = "voice-range")]
#[command(about = "Classify speaker voice type from a recording", long_about = None)]
struct Args {
    /// Audio file to analyze (MP3)
    input: String,

    /// Directory for pitch_distribution.png
    #[arg(short = 'o', long, env = "VOICE_RANGE_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Analysis frame length in samples
    #[arg(long, default_value = "2048")]
    frame_size: usize,

    /// Hop between frames in samples
    #[arg(long, default_value = "512")]
    hop_size: usize,

    /// RMS level below which a frame is treated as silence
    #[arg(long, default_value = "0.01")]
    voicing_threshold: f32,

    /// Minimum pitch detector clarity (0-1)
    #[arg(long, default_value = "0.6")]
    clarity_threshold: f32,

    /// Lowest pitch searched for, in Hz (default: C2)
    #[arg(long, default_value = "65.41")]
    min_freq: f32,

    /// Highest pitch searched for, in Hz (default: C7)
    #[arg(long, default_value = "2093.0")]
    max_freq: f32,

    /// Number of speakers in the recording
    #[arg(short = 'n', long, default_value = "2")]
    speakers: usize,

    /// Percentiles to report, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [25.0f32, 75.0])]
    percentiles: Vec<f32>,

    /// Five ascending band edges in Hz (Bass|Baritone|Tenor|Contralto|Mezzo|Soprano)
    #[arg(long, value_delimiter = ',')]
    band_edges: Option<Vec<f32>>,

    /// Speaker segmentation policy
    #[arg(long, value_enum, default_value = "temporal")]
    segmenter: SegmenterKind,

    /// Histogram bin count
    #[arg(long, default_value = "50")]
    bins: usize,

    /// Skip writing the histogram image
    #[arg(long)]
    no_plot: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let input = PathBuf::from(shellexpand::tilde(&args.input).as_ref());

    let bands = match &args.band_edges {
        Some(edges) => BandTable::from_slice(edges)?,
        None => BandTable::new(DEFAULT_BAND_EDGES)?,
    };

    let config = AnalysisConfig::new(args.output_dir.clone())
        .with_framing(args.frame_size, args.hop_size)
        .with_thresholds(args.voicing_threshold, args.clarity_threshold)
        .with_frequency_range(args.min_freq, args.max_freq)
        .with_speakers(args.speakers)
        .with_percentiles(args.percentiles.clone())
        .with_bands(bands)
        .with_histogram_bins(args.bins)
        .with_plot(!args.no_plot);

    for category in VoiceCategory::RANGES {
        if let Some((lower, upper)) = config.bands.band(category) {
            log::debug!("{:<13} {:>7.1} - {:.1} Hz", category.name(), lower, upper);
        }
    }

    let extractor = config.extractor();
    match args.segmenter {
        SegmenterKind::Temporal => {
            let pipeline = VoicePipeline::new(config, extractor, TemporalSplit::new())?;
            run(&pipeline, &input, args.json)
        }
        SegmenterKind::Clusters => {
            log::info!("Segmenting speakers by pitch clusters");
            let pipeline = VoicePipeline::new(config, extractor, PitchClusters::new())?;
            run(&pipeline, &input, args.json)
        }
    }
}

fn run<E: PitchExtractor, S: Segmenter>(
    pipeline: &VoicePipeline<E, S>,
    input: &Path,
    json: bool,
) -> Result<()> {
    let report = pipeline
        .run(input)
        .with_context(|| format!("Analysis failed for {:?}", input))?;

    if json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_text(&report));
    }

    if pipeline.config().render_plot {
        log::info!("Histogram: {:?}", pipeline.config().plot_path());
    }
    Ok(())
}
