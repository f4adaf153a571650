// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brainview Selection: region selection over neuron point clouds.
//!
//! A [`SelectionSession`] owns everything a "select neurons by drawing on a
//! slice" tool needs: the point snapshot, the pairwise affinity matrix, the
//! colormap and contrast range, and the current [`Selection`]. Every mutation
//! recomputes the per-point colors:
//!
//! 1. [`aggregate`] reduces the matrix columns of the selected neurons to one
//!    value per neuron (mean absolute affinity by default).
//! 2. The values are colored through the colormap
//!    ([`brainview_colormap::colorize`]).
//! 3. Selected neurons are overwritten with the highlight color.
//!
//! The host forwards its events to the session and applies
//! [`SelectionSession::colors`] (or the colors passed to an
//! [`on_recolor`](SelectionSession::on_recolor) callback) as point face colors.
//!
//! # Example
//!
//! ```rust
//! use brainview_colormap::{ContrastRange, presets};
//! use brainview_region::{Point3, Region, ViewState};
//! use brainview_selection::{PairwiseMatrix, SelectionConfig, SelectionSession};
//!
//! let points = vec![
//!     Point3::new(0.0, 1.0, 1.0),
//!     Point3::new(0.0, 5.0, 5.0),
//!     Point3::new(3.0, 1.0, 1.0), // Off the displayed slice.
//! ];
//! let pairwise = PairwiseMatrix::from_rows(&[
//!     [1.0, 0.2, -0.8],
//!     [0.2, 1.0, 0.0],
//!     [-0.8, 0.0, 1.0],
//! ])?;
//! let range = ContrastRange::new(0.0, 1.0)?;
//! let mut session = SelectionSession::new(
//!     points,
//!     pairwise,
//!     presets::inferno_alpha(),
//!     range,
//!     SelectionConfig::default(),
//! )?;
//! session.set_view(ViewState::slice(0.0));
//!
//! let region = Region::rectangle([(0.0, 0.0), (2.0, 2.0)])?;
//! session.select(&region);
//! assert_eq!(session.current(), &[0]);
//! assert_eq!(session.values(), &[1.0, 0.2, 0.8]);
//! assert_eq!(session.colors()[0], SelectionConfig::default().highlight);
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```
//!
//! Besides region selection, the [`probe`] module covers single-neuron picking:
//! nearest-point lookup, pairwise rows for a picked neuron, and activity traces.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: forwarded to `kurbo` and the sibling crates.
//! - `serde`: derives `Serialize`/`Deserialize` for [`SelectionConfig`],
//!   [`DuplicatePolicy`] and [`Reduction`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod pairwise;
pub mod probe;
mod selection;
mod session;

pub use pairwise::{PairwiseMatrix, Reduction, aggregate, aggregate_with};
pub use selection::{DuplicatePolicy, Selection};
pub use session::{SelectionConfig, SelectionSession};

use brainview_region::RegionError;

/// Errors raised when wiring a selection session or probe.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Matrix data that does not form an `n × n` square.
    #[error("pairwise matrix is not square: {len} values for {rows} rows")]
    NotSquare {
        /// Number of rows supplied.
        rows: usize,
        /// Number of values supplied.
        len: usize,
    },
    /// Point count and matrix size disagree.
    #[error("dimension mismatch: {points} points but a {matrix}x{matrix} pairwise matrix")]
    DimensionMismatch {
        /// Number of points.
        points: usize,
        /// Matrix side length.
        matrix: usize,
    },
    /// Activity data whose neuron count does not match the point set.
    #[error("activity recording {recording} covers {neurons} neurons, expected {expected}")]
    ActivityMismatch {
        /// Index of the offending recording.
        recording: usize,
        /// Neurons in that recording.
        neurons: usize,
        /// Neurons in the point set.
        expected: usize,
    },
    /// Activity values that do not fill whole frames.
    #[error("{len} activity values do not split into frames of {neurons} neurons")]
    RaggedActivity {
        /// Number of values supplied.
        len: usize,
        /// Neurons per frame.
        neurons: usize,
    },
    /// A host shape that is not a valid region.
    #[error(transparent)]
    InvalidRegion(#[from] RegionError),
}
