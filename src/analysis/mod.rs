pub mod aggregate;
pub mod analyzer;
pub mod bars;
pub mod compensation;
pub mod error;
pub mod history;
pub mod transform;

pub use aggregate::{DisplayScale, DEFAULT_REFERENCE_AMPLITUDE, DEFAULT_SCALE_FACTOR};
pub use analyzer::{
    Analyzer, AnalyzerSettings, AnalyzerState, DEFAULT_BAR_COUNT, DEFAULT_FRAME_LENGTH,
    DEFAULT_HISTORY_DEPTH,
};
pub use compensation::CompensationCurve;
pub use error::{AnalysisError, AnalysisResult};
