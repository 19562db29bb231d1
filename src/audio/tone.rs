use std::f64::consts::PI;

use super::Signal;

/// `sample_count` samples of a sine at `frequency` Hz, starting at phase zero.
pub fn sine(frequency: f32, amplitude: f32, sample_rate: u32, sample_count: usize) -> Vec<f32> {
    let step = 2.0 * PI * frequency as f64 / sample_rate as f64;
    (0..sample_count)
        .map(|i| (amplitude as f64 * (step * i as f64).sin()) as f32)
        .collect()
}

pub fn sine_signal(frequency: f32, amplitude: f32, sample_rate: u32, duration_secs: f32) -> Signal {
    let sample_count = (duration_secs.max(0.0) as f64 * sample_rate as f64).round() as usize;
    log::info!(
        "Generated {:.1}Hz sine: {} samples, {}Hz, {:.1}s",
        frequency,
        sample_count,
        sample_rate,
        duration_secs
    );
    Signal {
        samples: sine(frequency, amplitude, sample_rate, sample_count),
        sample_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_and_stays_in_amplitude() {
        let samples = sine(440.0, 0.25, 48000, 4800);
        assert_eq!(samples.len(), 4800);
        assert_eq!(samples[0], 0.0);
        assert!(samples.iter().all(|s| s.abs() <= 0.25));
    }

    #[test]
    fn quarter_period_hits_peak() {
        // 12 kHz at 48 kHz: four samples per period.
        let samples = sine(12000.0, 1.0, 48000, 4);
        assert!((samples[1] - 1.0).abs() < 1e-6);
        assert!((samples[3] + 1.0).abs() < 1e-6);
    }

    #[test]
    fn signal_length_follows_duration() {
        let signal = sine_signal(100.0, 0.5, 8000, 1.5);
        assert_eq!(signal.samples.len(), 12000);
        assert!((signal.duration_secs() - 1.5).abs() < 1e-6);
    }
}
