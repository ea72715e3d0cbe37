//! Error types for the ring.

use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RingError>;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// The requested capacity cannot back a ring.
    #[error("invalid ring capacity {0}: below 2 or too large to round up")]
    InvalidCapacity(usize),

    /// An oversized write kept only the most recent `written` bytes.
    #[error("write truncated: kept the last {written} of {requested} bytes")]
    Truncated { written: usize, requested: usize },

    #[error("reader closed")]
    ReaderClosed,
}

impl RingError {
    /// Bytes that reached the ring despite the error.
    pub fn bytes_written(&self) -> usize {
        match self {
            Self::Truncated { written, .. } => *written,
            _ => 0,
        }
    }
}

impl From<RingError> for io::Error {
    fn from(err: RingError) -> Self {
        let kind = match err {
            RingError::ReaderClosed => io::ErrorKind::BrokenPipe,
            RingError::Truncated { .. } | RingError::InvalidCapacity(_) => {
                io::ErrorKind::InvalidInput
            }
        };
        io::Error::new(kind, err)
    }
}
