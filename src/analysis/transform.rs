use std::collections::TryReserveError;
use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::error::{AnalysisError, AnalysisResult};

/// Forward FFT of real frames. The plan and buffers are sized once per frame
/// length, so `transform` never allocates.
pub struct TransformEngine {
    fft: Arc<dyn Fft<f32>>,
    buffer: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl TransformEngine {
    pub fn new(frame_length: usize) -> AnalysisResult<Self> {
        if frame_length == 0 {
            return Err(AnalysisError::EmptyFrame);
        }

        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(frame_length);
        let buffer = zeroed(frame_length)?;
        let scratch = zeroed(fft.get_inplace_scratch_len())?;

        Ok(Self {
            fft,
            buffer,
            scratch,
        })
    }

    pub fn frame_length(&self) -> usize {
        self.buffer.len()
    }

    /// Number of non-redundant bins for a real input: N/2 + 1.
    pub fn bin_count(&self) -> usize {
        self.frame_length() / 2 + 1
    }

    /// Transform `samples` (exactly `frame_length` long) and return the
    /// DC..=Nyquist half of the spectrum.
    pub fn transform(&mut self, samples: &[f32]) -> &[Complex<f32>] {
        debug_assert_eq!(samples.len(), self.buffer.len());

        for (slot, &sample) in self.buffer.iter_mut().zip(samples) {
            *slot = Complex::new(sample, 0.0);
        }
        self.fft.process_with_scratch(&mut self.buffer, &mut self.scratch);

        let bins = self.bin_count();
        &self.buffer[..bins]
    }
}

/// Zero-filled vector whose allocation failure is reported instead of aborting.
pub(crate) fn zeroed<T: Clone + Default>(len: usize) -> Result<Vec<T>, TryReserveError> {
    let mut values = Vec::new();
    values.try_reserve_exact(len)?;
    values.resize(len, T::default());
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::tone::sine;

    #[test]
    fn rejects_empty_frame() {
        assert!(matches!(
            TransformEngine::new(0),
            Err(AnalysisError::EmptyFrame)
        ));
    }

    #[test]
    fn emits_half_spectrum() {
        let mut engine = TransformEngine::new(2048).unwrap();
        assert_eq!(engine.transform(&vec![0.0; 2048]).len(), 1025);

        let mut odd = TransformEngine::new(7).unwrap();
        assert_eq!(odd.transform(&[0.0; 7]).len(), 4);
    }

    #[test]
    fn silence_is_exactly_zero() {
        let mut engine = TransformEngine::new(512).unwrap();
        let spectrum = engine.transform(&vec![0.0; 512]);
        assert!(spectrum.iter().all(|c| c.re == 0.0 && c.im == 0.0));
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let samples = sine(1000.0, 0.5, 48000, 1024);
        let mut engine = TransformEngine::new(1024).unwrap();
        let first = engine.transform(&samples).to_vec();
        // Dirty the buffers with unrelated data before re-running.
        engine.transform(&vec![1.0; 1024]);
        let second = engine.transform(&samples).to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn bin_aligned_sine_peaks_at_its_bin() {
        // Bin 32 of a 1024-point frame at 48 kHz.
        let frequency = 32.0 * 48000.0 / 1024.0;
        let samples = sine(frequency, 1.0, 48000, 1024);
        let mut engine = TransformEngine::new(1024).unwrap();
        let spectrum = engine.transform(&samples);

        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.norm().partial_cmp(&b.1.norm()).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 32);
        // A full-scale sine puts N/2 into its bin.
        assert!((spectrum[32].norm() - 512.0).abs() < 1.0);
    }
}
