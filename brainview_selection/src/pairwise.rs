// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pairwise affinity matrices and their reduction over a selection.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::SelectionError;

/// A square `n × n` matrix of affinities between neurons, stored row-major.
///
/// Entry `(r, c)` is the affinity of neuron `r` to neuron `c`; symmetry is not
/// required.
#[derive(Clone, Debug, PartialEq)]
pub struct PairwiseMatrix {
    n: usize,
    values: Vec<f64>,
}

impl PairwiseMatrix {
    /// A matrix from `n * n` row-major values.
    pub fn new(n: usize, values: Vec<f64>) -> Result<Self, SelectionError> {
        if n.checked_mul(n) != Some(values.len()) {
            return Err(SelectionError::NotSquare {
                rows: n,
                len: values.len(),
            });
        }
        Ok(Self { n, values })
    }

    /// A matrix from rows, each as long as there are rows.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, SelectionError> {
        let n = rows.len();
        let mut values = Vec::with_capacity(n * n);
        for row in rows {
            let row = row.as_ref();
            if row.len() != n {
                return Err(SelectionError::NotSquare {
                    rows: n,
                    len: values.len() + row.len(),
                });
            }
            values.extend_from_slice(row);
        }
        Ok(Self { n, values })
    }

    /// An all-zero `n × n` matrix.
    pub fn zeros(n: usize) -> Self {
        Self {
            n,
            values: vec![0.0; n * n],
        }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Entry `(r, c)`.
    ///
    /// # Panics
    ///
    /// Panics if `r` or `c` is out of bounds.
    pub fn get(&self, r: usize, c: usize) -> f64 {
        assert!(c < self.n, "column {c} out of bounds for size {}", self.n);
        self.values[r * self.n + c]
    }

    /// Row `r`: the affinities of neuron `r` to every neuron.
    ///
    /// # Panics
    ///
    /// Panics if `r` is out of bounds.
    pub fn row(&self, r: usize) -> &[f64] {
        &self.values[r * self.n..(r + 1) * self.n]
    }
}

/// How a row's affinities to the selected neurons are combined.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Reduction {
    /// Mean of absolute affinities: strength of coupling regardless of sign.
    #[default]
    MeanAbs,
    /// Signed mean: correlated and anti-correlated neurons cancel out.
    Mean,
}

impl Reduction {
    #[inline]
    fn term(self, v: f64) -> f64 {
        match self {
            Self::MeanAbs => v.abs(),
            Self::Mean => v,
        }
    }
}

/// Mean absolute affinity of every neuron to the selected ones.
///
/// See [`aggregate_with`].
pub fn aggregate(pairwise: &PairwiseMatrix, selection: &[usize]) -> Vec<f64> {
    aggregate_with(pairwise, selection, Reduction::MeanAbs)
}

/// Reduce, for every row `r`, the entries `pairwise[r, s]` over `s` in
/// `selection`.
///
/// Every element of `selection` contributes one term, so a repeated index
/// weighs more and the divisor is always the number of summed terms. An
/// empty selection yields all zeros.
///
/// # Panics
///
/// Panics if a selected index is out of bounds for the matrix.
pub fn aggregate_with(
    pairwise: &PairwiseMatrix,
    selection: &[usize],
    reduction: Reduction,
) -> Vec<f64> {
    let n = pairwise.size();
    if selection.is_empty() {
        return vec![0.0; n];
    }
    let count = selection.len() as f64;
    (0..n)
        .map(|r| {
            let row = pairwise.row(r);
            let sum: f64 = selection.iter().map(|&s| reduction.term(row[s])).sum();
            sum / count
        })
        .collect()
}
