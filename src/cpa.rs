//! Correlation power analysis[^1] of a byte-oriented substitution layer.
//!
//! Key bytes are recovered independently: every candidate value for a byte
//! position is scored by the maximum absolute Pearson correlation between the
//! modeled leakage and the measured samples, and the best-scoring candidate
//! wins.
//!
//! [^1]: <https://www.iacr.org/archive/ches2004/31560016/31560016.pdf>

use crate::dataset::{TraceDataset, BLOCK_SIZE};
use crate::leakage_model::{hw, intermediate, Sbox};
use crate::util::{argmax_by, argsort_by};
use ndarray::{Array1, ArrayView1};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::iter::zip;

/// Upper excluded bound of the key byte search.
pub const GUESS_RANGE: usize = 256;

/// Scores of all candidate values for one key byte position.
#[derive(Debug, Clone)]
pub struct ByteScores {
    /// Maximum absolute Pearson correlation per candidate
    scores: Array1<f64>,
}

impl ByteScores {
    /// Return the candidate with the highest score.
    ///
    /// The scan starts at candidate 0 and only moves on strict improvement,
    /// so the lowest candidate wins ties and an all-zero score vector
    /// resolves to 0.
    pub fn best_guess(&self) -> u8 {
        argmax_by(self.scores.view(), f64::total_cmp) as u8
    }

    /// Return the score of the best candidate.
    pub fn best_score(&self) -> f64 {
        self.scores[usize::from(self.best_guess())]
    }

    /// Return the candidates ordered by score, best last.
    pub fn rank(&self) -> Array1<usize> {
        let rank = argsort_by(&self.scores.to_vec()[..], f64::total_cmp);

        Array1::from_vec(rank)
    }

    /// Return the score of every candidate.
    pub fn scores(&self) -> ArrayView1<f64> {
        self.scores.view()
    }
}

/// One resolved key byte with the correlation that selected it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecoveredByte {
    pub value: u8,
    pub score: f64,
}

/// Result of a full-key recovery, one entry per key byte position.
#[derive(Debug, Clone)]
pub struct RecoveredKey {
    bytes: Vec<RecoveredByte>,
}

impl RecoveredKey {
    /// Return the per-position (value, score) pairs.
    pub fn bytes(&self) -> &[RecoveredByte] {
        &self.bytes
    }

    /// Project onto the key byte values.
    pub fn key(&self) -> [u8; BLOCK_SIZE] {
        let mut key = [0u8; BLOCK_SIZE];
        for (out, byte) in zip(key.iter_mut(), &self.bytes) {
            *out = byte.value;
        }

        key
    }
}

/// Score one key byte hypothesis.
///
/// Builds the modeled-leakage vector `hw(sbox[p ^ guess])` over all
/// plaintexts, correlates it against the measured amplitudes at every sample
/// position and returns the maximum absolute Pearson coefficient, in [0, 1].
///
/// Sample positions with zero variance contribute 0: a constant signal
/// carries no information and must not turn into a NaN. Means and centered
/// sums are computed in two passes to keep the correlation numerically
/// stable on large datasets.
///
/// # Panics
/// Panics if `byte_index >= BLOCK_SIZE`.
pub fn score_hypothesis(
    byte_index: usize,
    guess: u8,
    dataset: &TraceDataset,
    sbox: &Sbox,
) -> f64 {
    assert!(byte_index < BLOCK_SIZE);

    let num_traces = dataset.num_traces() as f64;
    let traces = dataset.traces();

    let model = dataset
        .plaintexts()
        .column(byte_index)
        .mapv(|p| f64::from(hw(intermediate(p, guess, sbox))));
    let model_mean = model.sum() / num_traces;
    let model_centered = model.mapv(|m| m - model_mean);
    let model_ss = model_centered.dot(&model_centered);
    if model_ss == 0.0 {
        return 0.0;
    }

    (0..dataset.num_samples())
        .map(|sample| {
            let column = traces.column(sample);
            let column_mean = column.sum() / num_traces;

            let mut cov = 0.0;
            let mut column_ss = 0.0;
            for (m, &x) in zip(model_centered.iter(), column.iter()) {
                let centered = x - column_mean;
                cov += m * centered;
                column_ss += centered * centered;
            }

            if column_ss == 0.0 {
                0.0
            } else {
                (cov / (model_ss * column_ss).sqrt()).abs()
            }
        })
        .fold(0.0, f64::max)
}

/// Score all 256 candidate values for one key byte position.
///
/// Candidates are mutually independent and evaluated in parallel.
///
/// # Panics
/// Panics if `byte_index >= BLOCK_SIZE`.
pub fn recover_byte(byte_index: usize, dataset: &TraceDataset, sbox: &Sbox) -> ByteScores {
    let scores: Vec<f64> = (0..GUESS_RANGE)
        .into_par_iter()
        .map(|guess| score_hypothesis(byte_index, guess as u8, dataset, sbox))
        .collect();

    ByteScores {
        scores: Array1::from_vec(scores),
    }
}

/// Recover all key byte positions, in order.
pub fn recover_key(dataset: &TraceDataset, sbox: &Sbox) -> RecoveredKey {
    recover_key_with(dataset, sbox, |_, _| {})
}

/// Recover all key byte positions, invoking `on_byte` after each resolved
/// position for progress reporting.
pub fn recover_key_with<F>(dataset: &TraceDataset, sbox: &Sbox, mut on_byte: F) -> RecoveredKey
where
    F: FnMut(usize, &RecoveredByte),
{
    let mut bytes = Vec::with_capacity(BLOCK_SIZE);
    for byte_index in 0..BLOCK_SIZE {
        let scores = recover_byte(byte_index, dataset, sbox);
        let byte = RecoveredByte {
            value: scores.best_guess(),
            score: scores.best_score(),
        };
        on_byte(byte_index, &byte);
        bytes.push(byte);
    }

    RecoveredKey { bytes }
}
