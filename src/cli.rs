use clap::Parser;
use std::path::PathBuf;

use fftvis::analysis::{
    DEFAULT_BAR_COUNT, DEFAULT_FRAME_LENGTH, DEFAULT_HISTORY_DEPTH, DEFAULT_REFERENCE_AMPLITUDE,
    DEFAULT_SCALE_FACTOR,
};
use fftvis::render::text::DEFAULT_MARKER;

#[derive(Parser, Debug)]
#[command(name = "fftvis", about = "Rolling FFT spectrum rendered as a text bar graph")]
pub struct Cli {
    /// Input audio file (WAV, MP3, FLAC, OGG). Omit to use --sine.
    pub input: Option<PathBuf>,

    /// Generate a sine tone at this frequency (Hz) instead of reading a file
    #[arg(long)]
    pub sine: Option<f32>,

    /// Sine tone length in seconds
    #[arg(long, default_value_t = 5.0)]
    pub duration: f32,

    /// Sine tone amplitude (0.0-1.0)
    #[arg(long, default_value_t = 0.5)]
    pub amplitude: f32,

    /// Sample rate of the generated tone
    #[arg(long, default_value_t = 48000)]
    pub sample_rate: u32,

    /// Samples per analyzed frame (audio block size)
    #[arg(long, default_value_t = DEFAULT_FRAME_LENGTH)]
    pub frame_length: usize,

    /// Number of recent frames averaged into each graph
    #[arg(long, default_value_t = DEFAULT_HISTORY_DEPTH)]
    pub history: usize,

    /// Number of bars per graph
    #[arg(long, default_value_t = DEFAULT_BAR_COUNT)]
    pub bars: usize,

    /// Bar intensity that maps to --scale characters
    #[arg(long, default_value_t = DEFAULT_REFERENCE_AMPLITUDE)]
    pub reference_amplitude: f64,

    /// Characters drawn for an intensity equal to --reference-amplitude
    #[arg(long, default_value_t = DEFAULT_SCALE_FACTOR)]
    pub scale: f64,

    /// Character used to draw bars
    #[arg(long, default_value_t = DEFAULT_MARKER)]
    pub marker: char,

    /// Write graphs to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pace frames at the audio block rate
    #[arg(long)]
    pub realtime: bool,

    /// Config file (defaults to fftvis.toml or the user config dir)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
