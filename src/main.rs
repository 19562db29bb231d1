mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use cli::Cli;
use fftvis::analysis::{
    AnalyzerSettings, CompensationCurve, DisplayScale, DEFAULT_BAR_COUNT, DEFAULT_FRAME_LENGTH,
    DEFAULT_HISTORY_DEPTH, DEFAULT_REFERENCE_AMPLITUDE, DEFAULT_SCALE_FACTOR,
};
use fftvis::audio::{decode, tone, Signal};
use fftvis::plugin::{self, Instance, PortBuffer};
use fftvis::render::text::{BarGraphWriter, DEFAULT_MARKER};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Explicit --config path, or auto-detect fftvis.toml / user config
    let config_path = cli.config.clone().or_else(find_config);
    let mut compensation = None;
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Config values apply only where the CLI is at its default
            if cli.frame_length == DEFAULT_FRAME_LENGTH { cli.frame_length = cfg.analysis.frame_length; }
            if cli.history == DEFAULT_HISTORY_DEPTH { cli.history = cfg.analysis.history_depth; }
            if cli.bars == DEFAULT_BAR_COUNT { cli.bars = cfg.analysis.bar_count; }
            if cli.reference_amplitude == DEFAULT_REFERENCE_AMPLITUDE { cli.reference_amplitude = cfg.display.reference_amplitude; }
            if cli.scale == DEFAULT_SCALE_FACTOR { cli.scale = cfg.display.scale_factor; }
            if cli.marker == DEFAULT_MARKER { cli.marker = cfg.display.marker; }
            if let Some(ref points) = cfg.compensation {
                let curve = CompensationCurve::from_response(&points.pairs())
                    .context("Invalid compensation curve in config")?;
                compensation = Some(curve);
            }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    if cli.frame_length == 0 {
        anyhow::bail!("--frame-length must be at least 1");
    }

    let signal = match (&cli.input, cli.sine) {
        (Some(input), _) => {
            if !input.exists() {
                anyhow::bail!("Input file not found: {}", input.display());
            }
            decode::decode_file(input)?
        }
        (None, Some(frequency)) => {
            tone::sine_signal(frequency, cli.amplitude, cli.sample_rate, cli.duration)
        }
        (None, None) => anyhow::bail!("Provide an input audio file or --sine <HZ>"),
    };

    let descriptor = plugin::descriptor(0).context("Plugin descriptor missing")?;
    log::info!("{} ({})", descriptor.name, descriptor.label);
    log::info!(
        "Frame length: {}, history: {} frames, bars: {}",
        cli.frame_length, cli.history, cli.bars
    );

    let settings = AnalyzerSettings {
        history_depth: cli.history,
        bar_count: cli.bars,
        scale: DisplayScale {
            reference_amplitude: cli.reference_amplitude,
            scale_factor: cli.scale,
        },
        compensation,
    };

    let sink: Box<dyn Write> = match cli.output {
        Some(ref path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    run(&cli, &signal, settings, sink)
}

/// Feed `signal` to a plugin instance one block at a time, like a host would.
fn run(cli: &Cli, signal: &Signal, settings: AnalyzerSettings, sink: Box<dyn Write>) -> Result<()> {
    let mut dummy_output = vec![0.0f32; cli.frame_length];
    let mut instance = Instance::create(
        signal.sample_rate,
        settings,
        BarGraphWriter::new(cli.marker),
        sink,
    )?;
    instance.connect_port(PortBuffer::Output(&mut dummy_output));

    let total_blocks = signal.samples.len().div_ceil(cli.frame_length);
    let block_duration = Duration::from_secs_f64(cli.frame_length as f64 / signal.sample_rate.max(1) as f64);

    let pb = if cli.output.is_some() {
        let pb = ProgressBar::new(total_blocks as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks ({eta} remaining)")?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    for block in signal.samples.chunks(cli.frame_length) {
        instance.connect_port(PortBuffer::Input(block));
        instance.run(block.len())?;

        if let Some(ref pb) = pb {
            pb.inc(1);
        }
        if cli.realtime {
            std::thread::sleep(block_duration);
        }
    }

    if let Some(pb) = pb {
        pb.finish_with_message("Analysis complete");
    }

    let analyzer = instance.analyzer();
    log::info!(
        "Rendered {} graphs at {}Hz; {:?}, {} of {} bars emitted, {} spectra in history",
        instance.frames_rendered(),
        analyzer.sample_rate(),
        analyzer.state(),
        analyzer.emitted_bars(),
        analyzer.settings().bar_count,
        analyzer.history_len()
    );

    let mut sink = instance.destroy();
    sink.flush().context("Failed to flush output")?;

    if let Some(ref path) = cli.output {
        log::info!("Done! Output: {}", path.display());
    }
    Ok(())
}

fn find_config() -> Option<PathBuf> {
    let local = PathBuf::from("fftvis.toml");
    if local.exists() {
        return Some(local);
    }
    if let Some(home) = dirs::home_dir() {
        let xdg = home.join(".config").join("fftvis").join("config.toml");
        if xdg.exists() {
            return Some(xdg);
        }
    }
    if let Some(config_dir) = dirs::config_dir() {
        let platform = config_dir.join("fftvis").join("config.toml");
        if platform.exists() {
            return Some(platform);
        }
    }
    None
}
