use std::io::{self, Write};

pub const DEFAULT_MARKER: char = '#';

/// Writes one bar graph per analyzed frame as plain text: a header line,
/// one line of markers per bar (lowest frequency first), and a footer line.
pub struct BarGraphWriter {
    marker: [u8; 4],
    marker_len: usize,
    frames_written: u64,
}

impl BarGraphWriter {
    pub fn new(marker: char) -> Self {
        let mut encoded = [0u8; 4];
        let marker_len = marker.encode_utf8(&mut encoded).len();
        Self {
            marker: encoded,
            marker_len,
            frames_written: 0,
        }
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    pub fn write_frame<W: Write>(
        &mut self,
        out: &mut W,
        frame_length: usize,
        char_counts: &[usize],
    ) -> io::Result<()> {
        let sequence = self.frames_written;
        writeln!(out, "=== frame {} | {} samples ===", sequence, frame_length)?;

        let marker = &self.marker[..self.marker_len];
        for &count in char_counts {
            for _ in 0..count {
                out.write_all(marker)?;
            }
            out.write_all(b"\n")?;
        }

        writeln!(out, "=== end frame {} ===", sequence)?;
        self.frames_written += 1;
        Ok(())
    }
}

impl Default for BarGraphWriter {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}
