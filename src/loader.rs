//! Dataset loaders for the two capture formats the engine consumes.
//!
//! Acquisition is an external concern; these functions only turn already
//! recorded campaigns into a validated [`TraceDataset`].

use crate::dataset::TraceDataset;
use crate::error::Error;
use ndarray::Array2;
use ndarray_npy::read_npy;
use serde::Deserialize;
use std::{fs::File, io::BufReader, path::Path};

/// On-disk JSON capture: two index-aligned record lists.
#[derive(Debug, Deserialize)]
struct JsonDataset {
    plaintexts: Vec<Vec<u8>>,
    traces: Vec<Vec<f64>>,
}

/// Read a dataset from a JSON capture file holding `plaintexts` and `traces`
/// arrays, one record per encryption.
pub fn read_json_dataset<P: AsRef<Path>>(path: P) -> Result<TraceDataset, Error> {
    let file = File::open(path)?;
    let dataset: JsonDataset = serde_json::from_reader(BufReader::new(file))?;

    TraceDataset::from_records(&dataset.plaintexts, &dataset.traces)
}

/// Read a dataset from a pair of `.npy` matrices, traces of shape
/// `(n, num_samples)` and plaintexts of shape `(n, 16)`.
pub fn read_npy_dataset<P: AsRef<Path>>(traces: P, plaintexts: P) -> Result<TraceDataset, Error> {
    let traces: Array2<f64> = read_npy(traces)?;
    let plaintexts: Array2<u8> = read_npy(plaintexts)?;

    TraceDataset::new(plaintexts, traces)
}
