use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied constant does not have the size the cipher requires.
    #[error("invalid input: expected {expected} {what}, got {got}")]
    InvalidInput {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    /// The dataset collections do not line up with each other.
    #[error("shape mismatch: {what} (expected {expected}, got {got})")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },
    /// Pearson correlation is undefined below two traces.
    #[error("insufficient data: correlation needs at least 2 traces, got {0}")]
    InsufficientData(usize),
    #[error("failed to load JSON dataset")]
    Load(#[from] serde_json::Error),
    #[error("failed to load npy dataset")]
    Npy(#[from] ndarray_npy::ReadNpyError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
