use super::aggregate::{Aggregator, DisplayScale};
use super::bars::BarLayout;
use super::compensation::{unity_gains, CompensationCurve};
use super::error::{AnalysisError, AnalysisResult};
use super::history::SpectrumHistory;
use super::transform::TransformEngine;

pub const DEFAULT_FRAME_LENGTH: usize = 2048;
pub const DEFAULT_HISTORY_DEPTH: usize = 320;
pub const DEFAULT_BAR_COUNT: usize = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerSettings {
    pub history_depth: usize,
    pub bar_count: usize,
    pub scale: DisplayScale,
    pub compensation: Option<CompensationCurve>,
}

impl Default for AnalyzerSettings {
    fn default() -> Self {
        Self {
            history_depth: DEFAULT_HISTORY_DEPTH,
            bar_count: DEFAULT_BAR_COUNT,
            scale: DisplayScale::default(),
            compensation: None,
        }
    }
}

impl AnalyzerSettings {
    pub fn validate(&self) -> AnalysisResult<()> {
        if self.history_depth == 0 {
            return Err(AnalysisError::InvalidConfig(
                "history depth must be at least 1".into(),
            ));
        }
        if self.bar_count == 0 {
            return Err(AnalysisError::InvalidConfig(
                "bar count must be at least 1".into(),
            ));
        }
        self.scale.validate()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerState {
    Uninitialized,
    Configured(usize),
}

/// Everything sized for one frame length.
struct Pipeline {
    engine: TransformEngine,
    history: SpectrumHistory,
    layout: BarLayout,
    gains: Vec<f64>,
}

impl Pipeline {
    fn new(frame_length: usize, sample_rate: u32, settings: &AnalyzerSettings) -> AnalysisResult<Self> {
        let engine = TransformEngine::new(frame_length)?;
        let history = SpectrumHistory::new(settings.history_depth, engine.bin_count())?;
        let layout = BarLayout::new(frame_length, settings.bar_count)?;
        let gains = match &settings.compensation {
            Some(curve) => curve.bar_gains(&layout, sample_rate)?,
            None => unity_gains(settings.bar_count)?,
        };

        Ok(Self {
            engine,
            history,
            layout,
            gains,
        })
    }
}

/// Rolling spectrum analyzer fed one frame at a time.
///
/// The first frame, and any frame whose length differs from the previous
/// one, rebuilds the FFT plan, history and bar layout before it is processed.
/// History from the old length is dropped, never reinterpreted. Frames of an
/// unchanged length are processed without allocating.
pub struct Analyzer {
    sample_rate: u32,
    settings: AnalyzerSettings,
    /// `None` until the first frame arrives.
    pipeline: Option<Pipeline>,
    aggregator: Aggregator,
}

impl Analyzer {
    pub fn new(sample_rate: u32, settings: AnalyzerSettings) -> AnalysisResult<Self> {
        settings.validate()?;
        let aggregator = Aggregator::new(settings.bar_count, settings.scale)?;
        Ok(Self {
            sample_rate,
            settings,
            pipeline: None,
            aggregator,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn settings(&self) -> &AnalyzerSettings {
        &self.settings
    }

    pub fn state(&self) -> AnalyzerState {
        match &self.pipeline {
            Some(pipeline) => AnalyzerState::Configured(pipeline.engine.frame_length()),
            None => AnalyzerState::Uninitialized,
        }
    }

    /// Number of spectra currently averaged.
    pub fn history_len(&self) -> usize {
        self.pipeline.as_ref().map_or(0, |p| p.history.len())
    }

    /// Bars the current layout emits; zero while uninitialized.
    pub fn emitted_bars(&self) -> usize {
        self.pipeline.as_ref().map_or(0, |p| p.layout.len())
    }

    pub fn layout(&self) -> Option<&BarLayout> {
        self.pipeline.as_ref().map(|p| &p.layout)
    }

    /// Averaged intensities from the last processed frame.
    pub fn intensities(&self) -> &[f64] {
        self.aggregator.intensities()
    }

    /// Incorporate one frame and return the character count of every bar.
    pub fn process(&mut self, samples: &[f32]) -> AnalysisResult<&[usize]> {
        if samples.is_empty() {
            return Err(AnalysisError::EmptyFrame);
        }

        let frame_length = samples.len();
        let pipeline = match self.pipeline.take() {
            Some(current) if current.engine.frame_length() == frame_length => {
                self.pipeline.insert(current)
            }
            stale => {
                // Release the old plan and history before sizing new ones.
                drop(stale);
                self.aggregator.reset();
                let fresh = Pipeline::new(frame_length, self.sample_rate, &self.settings)?;
                log::debug!(
                    "Configured analyzer: frame_length={}, bins={}, bars={}/{}, history={}",
                    frame_length,
                    fresh.engine.bin_count(),
                    fresh.layout.len(),
                    self.settings.bar_count,
                    self.settings.history_depth
                );
                self.pipeline.insert(fresh)
            }
        };

        let spectrum = pipeline.engine.transform(samples);
        pipeline.history.push(spectrum);

        Ok(self
            .aggregator
            .aggregate(&pipeline.history, &pipeline.layout, &pipeline.gains))
    }
}
