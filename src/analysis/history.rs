use rustfft::num_complex::Complex;

use super::error::{AnalysisError, AnalysisResult};
use super::transform::zeroed;

/// Fixed-capacity ring of the most recent spectra.
///
/// All slots live in one pre-allocated arena of `capacity * width` bins, so
/// pushing never allocates. Slots past `len` have never been written and are
/// not yielded.
pub struct SpectrumHistory {
    arena: Vec<Complex<f32>>,
    width: usize,
    capacity: usize,
    /// Next slot to overwrite.
    cursor: usize,
    len: usize,
}

impl SpectrumHistory {
    pub fn new(capacity: usize, width: usize) -> AnalysisResult<Self> {
        if capacity == 0 {
            return Err(AnalysisError::InvalidConfig(
                "history depth must be at least 1".into(),
            ));
        }
        if width == 0 {
            return Err(AnalysisError::InvalidConfig(
                "spectrum width must be at least 1".into(),
            ));
        }
        let total = capacity.checked_mul(width).ok_or_else(|| {
            AnalysisError::InvalidConfig(format!(
                "history of {} x {} bins overflows",
                capacity, width
            ))
        })?;

        Ok(Self {
            arena: zeroed(total)?,
            width,
            capacity,
            cursor: 0,
            len: 0,
        })
    }

    pub fn push(&mut self, spectrum: &[Complex<f32>]) {
        debug_assert_eq!(spectrum.len(), self.width);

        let start = self.cursor * self.width;
        self.arena[start..start + self.width].copy_from_slice(spectrum);
        self.cursor = (self.cursor + 1) % self.capacity;
        self.len = (self.len + 1).min(self.capacity);
    }

    /// Valid spectra, in slot order rather than time order.
    pub fn iter(&self) -> impl Iterator<Item = &[Complex<f32>]> {
        self.arena.chunks_exact(self.width).take(self.len)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
