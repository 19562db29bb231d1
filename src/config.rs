use serde::Deserialize;
use std::path::Path;

use fftvis::analysis::{
    DEFAULT_BAR_COUNT, DEFAULT_FRAME_LENGTH, DEFAULT_HISTORY_DEPTH, DEFAULT_REFERENCE_AMPLITUDE,
    DEFAULT_SCALE_FACTOR,
};
use fftvis::render::text::DEFAULT_MARKER;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub compensation: Option<CompensationConfig>,
}

#[derive(Debug, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_frame_length")]
    pub frame_length: usize,
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    #[serde(default = "default_bar_count")]
    pub bar_count: usize,
}

#[derive(Debug, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_reference_amplitude")]
    pub reference_amplitude: f64,
    #[serde(default = "default_scale_factor")]
    pub scale_factor: f64,
    #[serde(default = "default_marker")]
    pub marker: char,
}

/// Measured microphone response as `[frequency_hz, response_db]` pairs.
#[derive(Debug, Deserialize)]
pub struct CompensationConfig {
    pub points: Vec<[f64; 2]>,
}

impl CompensationConfig {
    pub fn pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|&[hz, db]| (hz, db)).collect()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_length: default_frame_length(),
            history_depth: default_history_depth(),
            bar_count: default_bar_count(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            reference_amplitude: default_reference_amplitude(),
            scale_factor: default_scale_factor(),
            marker: default_marker(),
        }
    }
}

fn default_frame_length() -> usize { DEFAULT_FRAME_LENGTH }
fn default_history_depth() -> usize { DEFAULT_HISTORY_DEPTH }
fn default_bar_count() -> usize { DEFAULT_BAR_COUNT }
fn default_reference_amplitude() -> f64 { DEFAULT_REFERENCE_AMPLITUDE }
fn default_scale_factor() -> f64 { DEFAULT_SCALE_FACTOR }
fn default_marker() -> char { DEFAULT_MARKER }

pub fn load_config(path: &Path) -> Option<Config> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(err) => {
            log::warn!("Invalid config {}: {}", path.display(), err);
            None
        }
    }
}
