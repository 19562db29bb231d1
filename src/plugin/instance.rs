use std::io::Write;

use crate::analysis::{AnalysisError, AnalysisResult, Analyzer, AnalyzerSettings};
use crate::render::text::BarGraphWriter;

use super::descriptor::{Port, DESCRIPTOR};

/// A host buffer bound to one of the plugin's ports.
pub enum PortBuffer<'a> {
    Input(&'a [f32]),
    Output(&'a mut [f32]),
}

impl PortBuffer<'_> {
    pub fn port(&self) -> Port {
        match self {
            PortBuffer::Input(_) => Port::Input,
            PortBuffer::Output(_) => Port::Output,
        }
    }
}

/// One running visualizer, as seen by a plugin host: created at a sample
/// rate, bound to port buffers, run once per audio block, then destroyed.
/// Each run writes one bar graph to `sink`.
pub struct Instance<'a, W: Write> {
    analyzer: Analyzer,
    graph: BarGraphWriter,
    sink: W,
    input: Option<&'a [f32]>,
    output: Option<&'a mut [f32]>,
}

impl<'a, W: Write> Instance<'a, W> {
    pub fn create(
        sample_rate: u32,
        settings: AnalyzerSettings,
        graph: BarGraphWriter,
        sink: W,
    ) -> AnalysisResult<Self> {
        let analyzer = Analyzer::new(sample_rate, settings)?;
        log::debug!("Created instance at {}Hz", sample_rate);
        Ok(Self {
            analyzer,
            graph,
            sink,
            input: None,
            output: None,
        })
    }

    pub fn connect_port(&mut self, buffer: PortBuffer<'a>) {
        log::trace!("Connecting {} port", DESCRIPTOR.port(buffer.port()).name);
        match buffer {
            PortBuffer::Input(samples) => self.input = Some(samples),
            PortBuffer::Output(samples) => self.output = Some(samples),
        }
    }

    /// Analyze the first `sample_count` samples of the bound input and write
    /// the resulting bar graph. The output port, if bound, is filled with
    /// silence even when the run fails.
    pub fn run(&mut self, sample_count: usize) -> AnalysisResult<()> {
        if let Some(output) = self.output.as_deref_mut() {
            let len = sample_count.min(output.len());
            output[..len].fill(0.0);
        }

        let input = self
            .input
            .ok_or(AnalysisError::PortNotConnected(Port::Input))?;
        if input.len() < sample_count {
            return Err(AnalysisError::BufferTooShort {
                port: Port::Input,
                needed: sample_count,
                available: input.len(),
            });
        }

        let counts = self.analyzer.process(&input[..sample_count])?;
        self.graph.write_frame(&mut self.sink, sample_count, counts)?;
        log::trace!("Rendered frame {}", self.graph.frames_written());
        Ok(())
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn frames_rendered(&self) -> u64 {
        self.graph.frames_written()
    }

    /// Release the analyzer and hand the sink back to the caller.
    pub fn destroy(self) -> W {
        log::debug!(
            "Destroying instance after {} frames",
            self.graph.frames_written()
        );
        self.sink
    }
}
