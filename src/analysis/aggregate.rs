use super::bars::BarLayout;
use super::error::{AnalysisError, AnalysisResult};
use super::history::SpectrumHistory;
use super::transform::zeroed;

pub const DEFAULT_REFERENCE_AMPLITUDE: f64 = 0.15;
pub const DEFAULT_SCALE_FACTOR: f64 = 300.0;

/// Linear mapping from bar intensity to a run length in characters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    pub reference_amplitude: f64,
    pub scale_factor: f64,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self {
            reference_amplitude: DEFAULT_REFERENCE_AMPLITUDE,
            scale_factor: DEFAULT_SCALE_FACTOR,
        }
    }
}

impl DisplayScale {
    pub fn validate(&self) -> AnalysisResult<()> {
        if !(self.reference_amplitude.is_finite() && self.reference_amplitude > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "reference amplitude must be positive, got {}",
                self.reference_amplitude
            )));
        }
        if !(self.scale_factor.is_finite() && self.scale_factor > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "scale factor must be positive, got {}",
                self.scale_factor
            )));
        }
        Ok(())
    }

    pub fn char_count(&self, intensity: f64) -> usize {
        let count = intensity / self.reference_amplitude * self.scale_factor;
        if count.is_finite() && count > 0.0 {
            count as usize
        } else {
            0
        }
    }
}

/// Averages bar values over the whole history window, recomputed from scratch
/// on each call. Output buffers are sized once for the bar count.
// TODO: keep running per-bar sums (add newest, subtract evicted) if the
// O(bars * history) pass ever shows up in callback timing.
pub struct Aggregator {
    scale: DisplayScale,
    intensities: Vec<f64>,
    char_counts: Vec<usize>,
}

impl Aggregator {
    pub fn new(bar_count: usize, scale: DisplayScale) -> AnalysisResult<Self> {
        scale.validate()?;
        Ok(Self {
            scale,
            intensities: zeroed(bar_count)?,
            char_counts: zeroed(bar_count)?,
        })
    }

    pub fn aggregate(
        &mut self,
        history: &SpectrumHistory,
        layout: &BarLayout,
        gains: &[f64],
    ) -> &[usize] {
        self.intensities.fill(0.0);
        for spectrum in history.iter() {
            layout.accumulate(spectrum, &mut self.intensities);
        }

        if !history.is_empty() {
            let valid = history.len() as f64;
            for intensity in &mut self.intensities {
                *intensity /= valid;
            }
        }

        for ((count, &intensity), &gain) in self
            .char_counts
            .iter_mut()
            .zip(&self.intensities)
            .zip(gains)
        {
            *count = self.scale.char_count(intensity * gain);
        }

        &self.char_counts
    }

    /// Averaged bar intensities from the last `aggregate` call, before gain.
    pub fn intensities(&self) -> &[f64] {
        &self.intensities
    }

    pub fn reset(&mut self) {
        self.intensities.fill(0.0);
        self.char_counts.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compensation::unity_gains;
    use rustfft::num_complex::Complex;

    fn flat(width: usize, magnitude: f32) -> Vec<Complex<f32>> {
        vec![Complex::new(magnitude, 0.0); width]
    }

    #[test]
    fn char_count_truncates_and_floors_at_zero() {
        let scale = DisplayScale::default();
        assert_eq!(scale.char_count(0.15), 300);
        assert_eq!(scale.char_count(0.075), 150);
        assert_eq!(scale.char_count(0.0), 0);
        assert_eq!(scale.char_count(-1.0), 0);
        assert_eq!(scale.char_count(f64::NAN), 0);
    }

    #[test]
    fn rejects_non_positive_scale() {
        let scale = DisplayScale {
            reference_amplitude: 0.0,
            ..DisplayScale::default()
        };
        assert!(Aggregator::new(10, scale).is_err());
    }

    #[test]
    fn averages_over_valid_entries_only() {
        let layout = BarLayout::new(64, 8).unwrap();
        let gains = unity_gains(8).unwrap();
        let mut history = SpectrumHistory::new(10, 33).unwrap();
        let mut aggregator = Aggregator::new(8, DisplayScale::default()).unwrap();

        history.push(&flat(33, 64.0));
        aggregator.aggregate(&history, &layout, &gains);
        let after_one = aggregator.intensities().to_vec();

        // Identical frames must not change the average while warming up.
        for _ in 0..5 {
            history.push(&flat(33, 64.0));
        }
        aggregator.aggregate(&history, &layout, &gains);
        assert_eq!(aggregator.intensities(), after_one.as_slice());

        let populated = layout.ranges().iter().position(|r| !r.is_empty()).unwrap();
        assert!((after_one[populated] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn mixes_loud_and_silent_frames() {
        let layout = BarLayout::new(64, 8).unwrap();
        let gains = unity_gains(8).unwrap();
        let mut history = SpectrumHistory::new(4, 33).unwrap();
        let mut aggregator = Aggregator::new(8, DisplayScale::default()).unwrap();

        history.push(&flat(33, 64.0));
        history.push(&flat(33, 0.0));
        aggregator.aggregate(&history, &layout, &gains);

        let populated = layout.ranges().iter().position(|r| !r.is_empty()).unwrap();
        assert!((aggregator.intensities()[populated] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn gain_scales_char_counts() {
        let layout = BarLayout::new(64, 8).unwrap();
        let mut gains = unity_gains(8).unwrap();
        let populated = layout.ranges().iter().position(|r| !r.is_empty()).unwrap();
        gains[populated] = 2.0;

        let scale = DisplayScale {
            reference_amplitude: 0.5,
            scale_factor: 100.0,
        };
        let mut history = SpectrumHistory::new(1, 33).unwrap();
        history.push(&flat(33, 16.0));
        let mut aggregator = Aggregator::new(8, scale).unwrap();
        let counts = aggregator.aggregate(&history, &layout, &gains);

        assert_eq!(counts[populated], 100);
        assert_eq!(counts[populated + 1], 50);
    }

    #[test]
    fn missing_trailing_bars_stay_zero() {
        let layout = BarLayout::new(64, 200).unwrap();
        assert!(layout.len() < 200);

        let gains = unity_gains(200).unwrap();
        let mut history = SpectrumHistory::new(2, 33).unwrap();
        history.push(&flat(33, 64.0));
        let mut aggregator = Aggregator::new(200, DisplayScale::default()).unwrap();
        let counts = aggregator.aggregate(&history, &layout, &gains);

        assert_eq!(counts.len(), 200);
        assert!(counts[layout.len()..].iter().all(|&c| c == 0));
    }
}
