use std::ops::Range;

use rustfft::num_complex::Complex;

use super::error::{AnalysisError, AnalysisResult};

/// Bin ranges of every bar for one frame length.
///
/// Edges grow geometrically by `(N/2)^(1/K)`, so low bars cover few bins
/// (often none) and high bars many. Bin 0 (DC) is never part of a bar.
#[derive(Debug, Clone)]
pub struct BarLayout {
    ranges: Vec<Range<usize>>,
    frame_length: usize,
    bar_count: usize,
}

impl BarLayout {
    pub fn new(frame_length: usize, bar_count: usize) -> AnalysisResult<Self> {
        if bar_count == 0 {
            return Err(AnalysisError::InvalidConfig(
                "bar count must be at least 1".into(),
            ));
        }
        if frame_length == 0 {
            return Err(AnalysisError::EmptyFrame);
        }

        let frequency_count = frame_length / 2;
        let mut ranges = Vec::new();
        ranges.try_reserve_exact(bar_count)?;

        if frequency_count > 1 {
            let factor = (frequency_count as f64).powf(1.0 / bar_count as f64);
            let mut start = 1.0f64;
            let mut end = factor;
            // floor(end) < frequency_count - 1, in unsigned form
            while (end.floor() as usize) + 1 < frequency_count && ranges.len() < bar_count {
                ranges.push(start.floor() as usize..end.floor() as usize);
                start *= factor;
                end *= factor;
            }
        }

        Ok(Self {
            ranges,
            frame_length,
            bar_count,
        })
    }

    /// Bars actually produced; may be fewer than the requested count.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn bar_count(&self) -> usize {
        self.bar_count
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.ranges
    }

    /// Index of the bar whose range contains `bin`, if any.
    pub fn bar_for_bin(&self, bin: usize) -> Option<usize> {
        self.ranges.iter().position(|r| r.contains(&bin))
    }

    /// Centre frequency of a bar in Hz.
    pub fn center_frequency(&self, bar: usize, sample_rate: u32) -> f64 {
        let range = &self.ranges[bar];
        let center_bin = if range.is_empty() {
            range.start as f64
        } else {
            (range.start + range.end - 1) as f64 / 2.0
        };
        center_bin * sample_rate as f64 / self.frame_length as f64
    }

    /// Mean normalized magnitude over `range`. Empty ranges read as zero.
    fn bar_value(&self, spectrum: &[Complex<f32>], range: &Range<usize>) -> f64 {
        if range.is_empty() {
            return 0.0;
        }
        let sum: f64 = spectrum[range.clone()]
            .iter()
            .map(|c| c.norm() as f64 / self.frame_length as f64)
            .sum();
        sum / range.len() as f64
    }

    /// Add this spectrum's bar values onto `totals` (one slot per requested bar).
    pub fn accumulate(&self, spectrum: &[Complex<f32>], totals: &mut [f64]) {
        for (total, range) in totals.iter_mut().zip(&self.ranges) {
            *total += self.bar_value(spectrum, range);
        }
    }

    /// Bar values of a single spectrum. Allocates; the steady-state path uses
    /// [`BarLayout::accumulate`] instead.
    pub fn map_to_bars(&self, spectrum: &[Complex<f32>]) -> Vec<f64> {
        self.ranges
            .iter()
            .map(|range| self.bar_value(spectrum, range))
            .collect()
    }
}
