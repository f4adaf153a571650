// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brainview Colormap: alpha-blended colormaps for point-cloud heatmaps.
//!
//! Correlation heatmaps drawn over a dense neuron point cloud are only
//! readable when weak values fade out. This crate builds colormaps whose alpha
//! channel follows a smooth envelope over the normalized value domain, and
//! maps raw per-point values to RGBA through a [`ContrastRange`].
//!
//! - [`BaseColors`]: the RGB part: either a listed table or a continuous
//!   gradient sampled at [`CONTINUOUS_SAMPLES`] points.
//! - [`AlphaCurve`]: the alpha envelope: [`AlphaShape::Sigmoid`] or
//!   [`AlphaShape::Cosine`] with a center and sharpness.
//! - [`Colormap`]: the resulting lookup table; [`Colormap::map`] interpolates
//!   linearly between entries and clamps its input to `[0, 1]`.
//! - [`colorize`] and [`overlay`]: per-point coloring and highlight.
//!
//! # Example
//!
//! ```rust
//! use brainview_colormap::{
//!     AlphaCurve, BaseColors, ContrastRange, Rgb, Rgba, build_alpha_colormap, colorize, overlay,
//! };
//!
//! let base = BaseColors::listed(vec![Rgb::new(0.0, 0.0, 0.0), Rgb::new(1.0, 1.0, 1.0)])?;
//! let cmap = build_alpha_colormap("Fade", &base, AlphaCurve::sigmoid(0.5, 10.0));
//!
//! let range = ContrastRange::new(0.0, 2.0)?;
//! let mut colors = colorize(&[0.0, 1.0, 2.0], &cmap, range);
//! assert!(colors[0].a < colors[2].a);
//!
//! overlay(&mut colors, &[1], Rgba::RED);
//! assert_eq!(colors[1], Rgba::RED);
//! # Ok::<(), brainview_colormap::ColormapError>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): use `std` floating-point math.
//! - `libm`: `no_std` floating-point math through `kurbo`'s `libm` support.
//! - `serde`: derives `Serialize`/`Deserialize` for [`Rgb`], [`Rgba`],
//!   [`AlphaShape`], [`AlphaCurve`] and [`ContrastRange`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod alpha;
mod color;
mod colormap;
mod contrast;
pub mod presets;

pub use alpha::{AlphaCurve, AlphaShape};
pub use color::{Rgb, Rgba};
pub use colormap::{BaseColors, CONTINUOUS_SAMPLES, Colormap, build_alpha_colormap};
pub use contrast::{ContrastRange, colorize, overlay};

/// Errors raised while validating colormap inputs.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ColormapError {
    /// A color table or gradient without entries.
    #[error("colormap needs at least one color")]
    Empty,
    /// Gradient stop positions that are not finite or not non-decreasing.
    #[error("gradient stop {index} at {position} is out of order")]
    UnsortedStops {
        /// Index of the first offending stop.
        index: usize,
        /// Its position.
        position: f64,
    },
    /// A contrast range that cannot normalize values.
    #[error("contrast range [{low}, {high}] is degenerate")]
    DegenerateContrast {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
}
