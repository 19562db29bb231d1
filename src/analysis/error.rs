use std::collections::TryReserveError;

use thiserror::Error;

use crate::plugin::Port;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("frame length must be non-zero")]
    EmptyFrame,

    #[error("failed to allocate analysis buffers: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),

    #[error("{0:?} port is not connected")]
    PortNotConnected(Port),

    #[error("{port:?} buffer holds {available} samples, {needed} requested")]
    BufferTooShort {
        port: Port,
        needed: usize,
        available: usize,
    },

    #[error("failed to write bar graph: {0}")]
    Io(#[from] std::io::Error),
}
