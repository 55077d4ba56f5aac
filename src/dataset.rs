//! Acquired traces and their associated plaintexts.

use crate::error::Error;
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Number of bytes in a plaintext block (and in the recovered key).
pub const BLOCK_SIZE: usize = 16;

/// Index-aligned plaintext blocks and power traces from one acquisition
/// campaign.
///
/// Row `i` of `plaintexts` and row `i` of `traces` belong to the same
/// encryption. Construction checks every shape invariant the scoring code
/// relies on, so a `TraceDataset` handed to the engine is always well formed.
#[derive(Debug, Clone)]
pub struct TraceDataset {
    /// One 16-byte block per row
    plaintexts: Array2<u8>,
    /// One leakage waveform per row, all of equal length
    traces: Array2<f64>,
}

impl TraceDataset {
    /// Pairs a plaintext matrix with a trace matrix.
    ///
    /// Fails with [`Error::ShapeMismatch`] if the row counts differ, if
    /// plaintext rows are not [`BLOCK_SIZE`] bytes or if traces carry no
    /// samples, and with [`Error::InsufficientData`] below two pairs.
    pub fn new(plaintexts: Array2<u8>, traces: Array2<f64>) -> Result<Self, Error> {
        if plaintexts.nrows() != traces.nrows() {
            return Err(Error::ShapeMismatch {
                what: "one plaintext block per trace",
                expected: traces.nrows(),
                got: plaintexts.nrows(),
            });
        }
        if traces.nrows() < 2 {
            return Err(Error::InsufficientData(traces.nrows()));
        }
        if plaintexts.ncols() != BLOCK_SIZE {
            return Err(Error::ShapeMismatch {
                what: "bytes per plaintext block",
                expected: BLOCK_SIZE,
                got: plaintexts.ncols(),
            });
        }
        if traces.ncols() == 0 {
            return Err(Error::ShapeMismatch {
                what: "samples per trace",
                expected: 1,
                got: 0,
            });
        }

        Ok(Self { plaintexts, traces })
    }

    /// Builds a dataset from per-encryption records, the shape loaders
    /// naturally produce.
    ///
    /// The first trace fixes the expected sample count; any record deviating
    /// from it fails with [`Error::ShapeMismatch`].
    pub fn from_records(plaintexts: &[Vec<u8>], traces: &[Vec<f64>]) -> Result<Self, Error> {
        let num_samples = traces.first().map_or(0, Vec::len);

        let mut trace_matrix = Array2::zeros((traces.len(), num_samples));
        for (row, trace) in traces.iter().enumerate() {
            if trace.len() != num_samples {
                return Err(Error::ShapeMismatch {
                    what: "samples per trace",
                    expected: num_samples,
                    got: trace.len(),
                });
            }
            trace_matrix
                .row_mut(row)
                .assign(&ArrayView1::from(&trace[..]));
        }

        let mut plaintext_matrix = Array2::zeros((plaintexts.len(), BLOCK_SIZE));
        for (row, plaintext) in plaintexts.iter().enumerate() {
            if plaintext.len() != BLOCK_SIZE {
                return Err(Error::ShapeMismatch {
                    what: "bytes per plaintext block",
                    expected: BLOCK_SIZE,
                    got: plaintext.len(),
                });
            }
            plaintext_matrix
                .row_mut(row)
                .assign(&ArrayView1::from(&plaintext[..]));
        }

        Self::new(plaintext_matrix, trace_matrix)
    }

    /// Returns the number of (plaintext, trace) pairs.
    pub fn num_traces(&self) -> usize {
        self.traces.nrows()
    }

    /// Returns the number of samples in each trace.
    pub fn num_samples(&self) -> usize {
        self.traces.ncols()
    }

    pub fn plaintexts(&self) -> ArrayView2<u8> {
        self.plaintexts.view()
    }

    pub fn traces(&self) -> ArrayView2<f64> {
        self.traces.view()
    }
}

#[cfg(test)]
mod tests {
    use super::{TraceDataset, BLOCK_SIZE};
    use crate::error::Error;
    use ndarray::Array2;

    #[test]
    fn test_accepts_well_formed_input() {
        let dataset = TraceDataset::new(
            Array2::zeros((4, BLOCK_SIZE)),
            Array2::zeros((4, 50)),
        )
        .unwrap();
        assert_eq!(dataset.num_traces(), 4);
        assert_eq!(dataset.num_samples(), 50);
    }

    #[test]
    fn test_count_mismatch() {
        let err = TraceDataset::new(Array2::zeros((3, BLOCK_SIZE)), Array2::zeros((4, 50)))
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_single_trace_is_insufficient() {
        let err = TraceDataset::new(Array2::zeros((1, BLOCK_SIZE)), Array2::zeros((1, 50)))
            .unwrap_err();
        assert!(matches!(err, Error::InsufficientData(1)));
    }

    #[test]
    fn test_wrong_block_size() {
        let err =
            TraceDataset::new(Array2::zeros((4, 8)), Array2::zeros((4, 50))).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: BLOCK_SIZE,
                got: 8,
                ..
            }
        ));
    }

    #[test]
    fn test_empty_traces() {
        let err = TraceDataset::new(Array2::zeros((4, BLOCK_SIZE)), Array2::zeros((4, 0)))
            .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_from_records_rejects_ragged_traces() {
        let plaintexts = vec![vec![0u8; BLOCK_SIZE]; 3];
        let traces = vec![vec![0.0; 10], vec![0.0; 10], vec![0.0; 9]];
        let err = TraceDataset::from_records(&plaintexts, &traces).unwrap_err();
        assert!(matches!(
            err,
            Error::ShapeMismatch {
                expected: 10,
                got: 9,
                ..
            }
        ));
    }

    #[test]
    fn test_from_records() {
        let plaintexts = vec![vec![1u8; BLOCK_SIZE], vec![2u8; BLOCK_SIZE]];
        let traces = vec![vec![0.5; 10], vec![-0.5; 10]];
        let dataset = TraceDataset::from_records(&plaintexts, &traces).unwrap();
        assert_eq!(dataset.num_traces(), 2);
        assert_eq!(dataset.num_samples(), 10);
        assert_eq!(dataset.plaintexts()[[1, 0]], 2);
        assert_eq!(dataset.traces()[[1, 3]], -0.5);
    }
}
