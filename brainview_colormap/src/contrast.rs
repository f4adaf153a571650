// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Contrast normalization and per-point coloring.

use alloc::vec::Vec;

use crate::{ColormapError, Colormap, Rgba};

/// Bounds mapping raw values onto the colormap domain.
///
/// `low` maps to 0 and `high` to 1. `low > high` is allowed and reverses the
/// colormap.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContrastRange {
    /// Value mapped to the start of the colormap.
    pub low: f64,
    /// Value mapped to the end of the colormap.
    pub high: f64,
}

impl ContrastRange {
    /// A range from finite, distinct bounds.
    pub fn new(low: f64, high: f64) -> Result<Self, ColormapError> {
        if !low.is_finite() || !high.is_finite() || low == high {
            return Err(ColormapError::DegenerateContrast { low, high });
        }
        Ok(Self { low, high })
    }

    /// The min/max of the finite entries of `values`.
    ///
    /// Fails when there are no finite values or they are all equal.
    pub fn from_values(values: &[f64]) -> Result<Self, ColormapError> {
        let (low, high) = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        Self::new(low, high)
    }

    /// `(v - low) / (high - low)`, not clamped.
    pub fn normalize(&self, v: f64) -> f64 {
        (v - self.low) / (self.high - self.low)
    }
}

/// Map every value through `range` and `cmap`.
///
/// Normalized values outside `[0, 1]` are clamped by [`Colormap::map`].
pub fn colorize(values: &[f64], cmap: &Colormap, range: ContrastRange) -> Vec<Rgba> {
    values
        .iter()
        .map(|&v| cmap.map(range.normalize(v)))
        .collect()
}

/// Overwrite the colors at `indices` with `color`.
///
/// Indices past the end of `colors` are ignored.
pub fn overlay(colors: &mut [Rgba], indices: &[usize], color: Rgba) {
    for &i in indices {
        if let Some(c) = colors.get_mut(i) {
            *c = color;
        }
    }
}
