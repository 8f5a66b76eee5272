//! Pitch distribution histogram
//!
//! Draws one density-normalised histogram per speaker over a shared
//! frequency axis, each overlaid with a Gaussian KDE curve, and writes the
//! result as PNG. Labels are not drawn; the text report carries the numbers.

use super::VoiceReport;
use crate::error::{Result, VoiceError};
use image::{ImageFormat, Rgb, RgbImage};
use std::f64::consts::PI;
use std::fs;
use std::path::Path;

/// Image width in pixels
pub const HISTOGRAM_WIDTH: u32 = 1200;
/// Image height in pixels
pub const HISTOGRAM_HEIGHT: u32 = 600;

const MARGIN_LEFT: u32 = 60;
const MARGIN_RIGHT: u32 = 20;
const MARGIN_TOP: u32 = 20;
const MARGIN_BOTTOM: u32 = 50;
const GRID_DIVISIONS: u32 = 10;
const BAR_ALPHA: f32 = 0.4;

/// Frequency axis used when nobody has voiced frames
const EMPTY_AXIS_HZ: (f64, f64) = (0.0, 500.0);

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);

/// Series colours, cycled per speaker
const PALETTE: [Rgb<u8>; 6] = [
    Rgb([31, 119, 180]),
    Rgb([255, 127, 14]),
    Rgb([44, 160, 44]),
    Rgb([214, 39, 40]),
    Rgb([148, 103, 189]),
    Rgb([140, 86, 75]),
];

/// Pixel rectangle of the plotting area
#[derive(Debug, Clone, Copy)]
struct PlotArea {
    left: u32,
    right: u32,
    top: u32,
    bottom: u32,
}

impl PlotArea {
    fn new() -> Self {
        Self {
            left: MARGIN_LEFT,
            right: HISTOGRAM_WIDTH - MARGIN_RIGHT,
            top: MARGIN_TOP,
            bottom: HISTOGRAM_HEIGHT - MARGIN_BOTTOM,
        }
    }

    fn width(&self) -> u32 {
        self.right - self.left
    }

    fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// Data-to-pixel mapping
#[derive(Debug, Clone, Copy)]
struct Scale {
    area: PlotArea,
    x_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Scale {
    fn x_to_px(&self, hz: f64) -> f64 {
        self.area.left as f64 + (hz - self.x_min) / (self.x_max - self.x_min) * self.area.width() as f64
    }

    fn px_to_x(&self, px: f64) -> f64 {
        self.x_min + (px - self.area.left as f64) / self.area.width() as f64 * (self.x_max - self.x_min)
    }

    fn y_to_px(&self, density: f64) -> f64 {
        self.area.bottom as f64 - (density / self.y_max) * self.area.height() as f64
    }
}

/// Binned and smoothed distribution for one speaker
struct Series {
    color: Rgb<u8>,
    densities: Vec<f64>,
    /// (x pixel, density) samples of the KDE curve
    curve: Vec<(f64, f64)>,
}

/// Render the per-speaker pitch histogram to `path` as PNG
pub fn write_histogram(report: &VoiceReport, path: &Path, bins: usize) -> Result<()> {
    let bins = bins.max(1);
    let area = PlotArea::new();

    let pitches: Vec<Vec<f64>> = report
        .speakers
        .iter()
        .map(|s| {
            s.segment
                .voiced_pitches()
                .into_iter()
                .map(|p| p as f64)
                .collect()
        })
        .collect();

    let (x_min, x_max) = frequency_axis(&pitches);
    let bin_width = (x_max - x_min) / bins as f64;

    let mut scale = Scale {
        area,
        x_min,
        x_max,
        y_max: 1.0,
    };

    let mut series = Vec::new();
    for (i, values) in pitches.iter().enumerate() {
        if values.is_empty() {
            continue;
        }
        let densities = bin_densities(values, x_min, bin_width, bins);
        let bandwidth = scott_bandwidth(values).max(bin_width * 0.5);

        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let px_lo = scale.x_to_px(lo).floor().max(area.left as f64) as u32;
        let px_hi = scale.x_to_px(hi).ceil().min(area.right as f64) as u32;
        let curve = (px_lo..=px_hi)
            .map(|px| {
                let x = scale.px_to_x(px as f64);
                (px as f64, gaussian_kde(values, bandwidth, x))
            })
            .collect();

        series.push(Series {
            color: PALETTE[i % PALETTE.len()],
            densities,
            curve,
        });
    }

    let peak = series
        .iter()
        .flat_map(|s| {
            s.densities
                .iter()
                .copied()
                .chain(s.curve.iter().map(|&(_, d)| d))
        })
        .fold(0.0f64, f64::max);
    if peak > 0.0 {
        scale.y_max = peak * 1.05;
    }

    let mut img = RgbImage::from_pixel(HISTOGRAM_WIDTH, HISTOGRAM_HEIGHT, BACKGROUND);
    draw_grid(&mut img, area);

    for s in &series {
        for (bin, &density) in s.densities.iter().enumerate() {
            if density <= 0.0 {
                continue;
            }
            let x0 = scale.x_to_px(x_min + bin as f64 * bin_width).round() as u32;
            let x1 = scale.x_to_px(x_min + (bin + 1) as f64 * bin_width).round() as u32;
            let y0 = scale.y_to_px(density).round().max(area.top as f64) as u32;
            fill_rect(&mut img, x0, x1.min(area.right), y0, area.bottom, s.color, BAR_ALPHA);
        }
    }

    for s in &series {
        for pair in s.curve.windows(2) {
            let (xa, da) = pair[0];
            let (xb, db) = pair[1];
            draw_line(
                &mut img,
                (xa, scale.y_to_px(da)),
                (xb, scale.y_to_px(db)),
                s.color,
            );
        }
    }

    draw_axes(&mut img, area);

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| VoiceError::Render {
            path: path.to_path_buf(),
            reason: format!("cannot create {}: {}", parent.display(), e),
        })?;
    }

    img.save_with_format(path, ImageFormat::Png)
        .map_err(|e| VoiceError::Render {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    log::info!(
        "Pitch histogram written to {:?} ({} series, {:.1}-{:.1} Hz)",
        path,
        series.len(),
        x_min,
        x_max
    );
    Ok(())
}

/// Shared frequency axis covering every speaker's voiced pitches
fn frequency_axis(pitches: &[Vec<f64>]) -> (f64, f64) {
    let all = pitches.iter().flatten().copied();
    let lo = all.clone().fold(f64::INFINITY, f64::min);
    let hi = all.fold(f64::NEG_INFINITY, f64::max);

    if !lo.is_finite() || !hi.is_finite() {
        return EMPTY_AXIS_HZ;
    }
    // Pad so a single pure tone still gets a visible bar
    let pad = ((hi - lo) * 0.05).max(10.0);
    ((lo - pad).max(0.0), hi + pad)
}

/// Histogram normalised so the bars integrate to one
fn bin_densities(values: &[f64], x_min: f64, bin_width: f64, bins: usize) -> Vec<f64> {
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = ((v - x_min) / bin_width).floor();
        let idx = (idx.max(0.0) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    let norm = values.len() as f64 * bin_width;
    counts.into_iter().map(|c| c as f64 / norm).collect()
}

/// Scott's rule: sample std * n^(-1/5)
fn scott_bandwidth(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt() * (n as f64).powf(-0.2)
}

/// Gaussian kernel density estimate at `x`
fn gaussian_kde(values: &[f64], bandwidth: f64, x: f64) -> f64 {
    let norm = 1.0 / (values.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    values
        .iter()
        .map(|&v| {
            let z = (x - v) / bandwidth;
            (-0.5 * z * z).exp()
        })
        .sum::<f64>()
        * norm
}

fn blend(img: &mut RgbImage, x: u32, y: u32, color: Rgb<u8>, alpha: f32) {
    if x >= img.width() || y >= img.height() {
        return;
    }
    let px = img.get_pixel_mut(x, y);
    for c in 0..3 {
        let mixed = px.0[c] as f32 * (1.0 - alpha) + color.0[c] as f32 * alpha;
        px.0[c] = mixed.round() as u8;
    }
}

fn fill_rect(img: &mut RgbImage, x0: u32, x1: u32, y0: u32, y1: u32, color: Rgb<u8>, alpha: f32) {
    for y in y0..y1 {
        for x in x0..x1 {
            blend(img, x, y, color, alpha);
        }
    }
}

/// Two-pixel-thick line by sampling along the longer axis
fn draw_line(img: &mut RgbImage, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
    let steps = (to.0 - from.0).abs().max((to.1 - from.1).abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let x = from.0 + (to.0 - from.0) * t;
        let y = from.1 + (to.1 - from.1) * t;
        if x < 0.0 || y < 0.0 {
            continue;
        }
        let (x, y) = (x.round() as u32, y.round() as u32);
        blend(img, x, y, color, 1.0);
        blend(img, x, y + 1, color, 1.0);
    }
}

fn draw_grid(img: &mut RgbImage, area: PlotArea) {
    for i in 0..=GRID_DIVISIONS {
        let x = area.left + area.width() * i / GRID_DIVISIONS;
        for y in area.top..=area.bottom {
            blend(img, x, y, GRID, 1.0);
        }
        let y = area.top + area.height() * i / GRID_DIVISIONS;
        for x in area.left..=area.right {
            blend(img, x, y, GRID, 1.0);
        }
    }
}

fn draw_axes(img: &mut RgbImage, area: PlotArea) {
    for x in area.left..=area.right {
        blend(img, x, area.bottom, AXIS, 1.0);
    }
    for y in area.top..=area.bottom {
        blend(img, area.left, y, AXIS, 1.0);
    }
}
