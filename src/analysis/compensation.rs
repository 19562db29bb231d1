use super::bars::BarLayout;
use super::error::{AnalysisError, AnalysisResult};
use super::transform::zeroed;

/// Gain curve flattening a measured microphone response. Every +6 dB of
/// compensation doubles the linear gain.
#[derive(Debug, Clone, PartialEq)]
pub struct CompensationCurve {
    /// (frequency in Hz, linear gain), strictly increasing in frequency.
    points: Vec<(f64, f64)>,
}

impl CompensationCurve {
    /// Build from measured `(frequency_hz, response_db)` pairs.
    pub fn from_response(measured: &[(f64, f64)]) -> AnalysisResult<Self> {
        if measured.len() < 2 {
            return Err(AnalysisError::InvalidConfig(
                "compensation curve needs at least two points".into(),
            ));
        }
        if measured
            .iter()
            .any(|&(hz, db)| !hz.is_finite() || !db.is_finite() || hz < 0.0)
        {
            return Err(AnalysisError::InvalidConfig(
                "compensation points must be finite with non-negative frequency".into(),
            ));
        }
        if measured.windows(2).any(|w| w[1].0 <= w[0].0) {
            return Err(AnalysisError::InvalidConfig(
                "compensation frequencies must be strictly increasing".into(),
            ));
        }

        let lowest = measured.iter().map(|&(_, db)| db).fold(f64::INFINITY, f64::min);
        let highest = measured.iter().map(|&(_, db)| db).fold(f64::NEG_INFINITY, f64::max);
        let span = highest - lowest;

        let points = measured
            .iter()
            .map(|&(hz, db)| {
                // +1 keeps the log defined at the loudest point.
                let boost_db = span - (db - lowest) + 1.0;
                (hz, 2f64.powf(boost_db.ln() / 6f64.ln()))
            })
            .collect();

        Ok(Self { points })
    }

    /// Linear interpolation, clamped to the end points outside the measured range.
    pub fn gain_at(&self, frequency: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if frequency <= first.0 {
            return first.1;
        }
        if frequency >= last.0 {
            return last.1;
        }

        let idx = self.points.partition_point(|&(hz, _)| hz <= frequency);
        let (lo_hz, lo_gain) = self.points[idx - 1];
        let (hi_hz, hi_gain) = self.points[idx];
        let t = (frequency - lo_hz) / (hi_hz - lo_hz);
        lo_gain + t * (hi_gain - lo_gain)
    }

    /// One gain per requested bar; bars the layout did not emit get 1.
    pub fn bar_gains(&self, layout: &BarLayout, sample_rate: u32) -> AnalysisResult<Vec<f64>> {
        let mut gains = unity_gains(layout.bar_count())?;
        for (bar, gain) in gains.iter_mut().enumerate().take(layout.len()) {
            *gain = self.gain_at(layout.center_frequency(bar, sample_rate));
        }
        Ok(gains)
    }
}

pub fn unity_gains(bar_count: usize) -> AnalysisResult<Vec<f64>> {
    let mut gains: Vec<f64> = zeroed(bar_count)?;
    gains.fill(1.0);
    Ok(gains)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve() -> CompensationCurve {
        CompensationCurve::from_response(&[(100.0, -5.0), (1000.0, 0.0), (10000.0, 0.0)]).unwrap()
    }

    #[test]
    fn loudest_points_get_unity_gain() {
        let curve = curve();
        assert!((curve.gain_at(1000.0) - 1.0).abs() < 1e-12);
        assert!((curve.gain_at(10000.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn quietest_point_is_boosted() {
        // 5 dB below the peak: 6 dB of compensation doubles the gain.
        assert!((curve().gain_at(100.0) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn clamps_outside_measured_range() {
        let curve = curve();
        assert_eq!(curve.gain_at(10.0), curve.gain_at(100.0));
        assert_eq!(curve.gain_at(20000.0), curve.gain_at(10000.0));
    }

    #[test]
    fn interpolates_linearly_between_points() {
        let mid = curve().gain_at(550.0);
        assert!((mid - 1.5).abs() < 1e-12);
    }

    #[test]
    fn rejects_malformed_points() {
        assert!(CompensationCurve::from_response(&[(100.0, 0.0)]).is_err());
        assert!(CompensationCurve::from_response(&[(100.0, 0.0), (50.0, 1.0)]).is_err());
        assert!(CompensationCurve::from_response(&[(100.0, f64::NAN), (200.0, 1.0)]).is_err());
    }

    #[test]
    fn bar_gains_cover_every_requested_bar() {
        let layout = BarLayout::new(2048, 200).unwrap();
        let gains = curve().bar_gains(&layout, 48000).unwrap();
        assert_eq!(gains.len(), 200);
        assert!(gains.iter().all(|&g| g >= 1.0));
        assert!(gains[layout.len()..].iter().all(|&g| g == 1.0));
    }
}
