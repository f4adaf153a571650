// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lookup-table colormaps and their construction from base colors.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::{AlphaCurve, ColormapError, Rgb, Rgba};

/// Number of samples taken from a continuous gradient.
pub const CONTINUOUS_SAMPLES: usize = 256;

/// The RGB part of a colormap.
#[derive(Clone, Debug, PartialEq)]
pub struct BaseColors(Base);

#[derive(Clone, Debug, PartialEq)]
enum Base {
    Listed(Vec<Rgb>),
    Gradient(Vec<(f64, Rgb)>),
}

impl BaseColors {
    /// A listed colormap: one lookup entry per color, spread uniformly over `[0, 1]`.
    pub fn listed(colors: Vec<Rgb>) -> Result<Self, ColormapError> {
        if colors.is_empty() {
            return Err(ColormapError::Empty);
        }
        Ok(Self(Base::Listed(colors)))
    }

    /// A continuous gradient through `(position, color)` stops.
    ///
    /// Positions must be finite and non-decreasing. Values before the first
    /// stop take its color, values after the last take the last color.
    pub fn gradient(stops: Vec<(f64, Rgb)>) -> Result<Self, ColormapError> {
        if stops.is_empty() {
            return Err(ColormapError::Empty);
        }
        let mut prev = f64::NEG_INFINITY;
        for (index, &(position, _)) in stops.iter().enumerate() {
            if !position.is_finite() || position < prev {
                return Err(ColormapError::UnsortedStops { index, position });
            }
            prev = position;
        }
        Ok(Self(Base::Gradient(stops)))
    }

    pub(crate) fn listed_unchecked(colors: Vec<Rgb>) -> Self {
        debug_assert!(!colors.is_empty(), "preset tables are non-empty");
        Self(Base::Listed(colors))
    }

    pub(crate) fn gradient_unchecked(stops: Vec<(f64, Rgb)>) -> Self {
        debug_assert!(
            !stops.is_empty() && stops.windows(2).all(|w| w[0].0 <= w[1].0),
            "preset gradients are sorted and non-empty"
        );
        Self(Base::Gradient(stops))
    }

    /// Whether this is a continuous gradient.
    pub fn is_continuous(&self) -> bool {
        matches!(self.0, Base::Gradient(_))
    }

    /// Number of lookup entries a colormap built from these colors has.
    pub fn sample_count(&self) -> usize {
        match &self.0 {
            Base::Listed(colors) => colors.len(),
            Base::Gradient(_) => CONTINUOUS_SAMPLES,
        }
    }

    /// The RGB color of lookup entry `i`.
    fn entry(&self, i: usize, x: f64) -> Rgb {
        match &self.0 {
            Base::Listed(colors) => colors[i],
            Base::Gradient(stops) => sample_gradient(stops, x),
        }
    }
}

pub(crate) fn sample_gradient(stops: &[(f64, Rgb)], x: f64) -> Rgb {
    let (first, last) = match (stops.first(), stops.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Rgb::default(),
    };
    if x <= first.0 {
        return first.1;
    }
    if x >= last.0 {
        return last.1;
    }
    // First stop strictly after x; the one before it starts the segment.
    let upper = stops.partition_point(|&(p, _)| p <= x);
    let (p0, c0) = stops[upper - 1];
    let (p1, c1) = stops[upper];
    let span = p1 - p0;
    if span > 0.0 {
        c0.lerp(c1, (x - p0) / span)
    } else {
        c1
    }
}

/// A named RGBA lookup table over `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    name: String,
    lut: Vec<Rgba>,
}

impl Colormap {
    /// A colormap from explicit RGBA entries spread uniformly over `[0, 1]`.
    pub fn new(name: impl Into<String>, lut: Vec<Rgba>) -> Result<Self, ColormapError> {
        if lut.is_empty() {
            return Err(ColormapError::Empty);
        }
        Ok(Self {
            name: name.into(),
            lut,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Lookup entries.
    pub fn entries(&self) -> &[Rgba] {
        &self.lut
    }

    /// Number of lookup entries.
    pub fn len(&self) -> usize {
        self.lut.len()
    }

    /// Always false; colormaps hold at least one entry.
    pub fn is_empty(&self) -> bool {
        self.lut.is_empty()
    }

    /// Color of normalized value `v`.
    ///
    /// `v` is clamped to `[0, 1]` and NaN maps like 0. Between entries the
    /// color is interpolated linearly.
    pub fn map(&self, v: f64) -> Rgba {
        let last = self.lut.len() - 1;
        let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };
        let pos = v * last as f64;
        let lower = pos.floor();
        #[allow(
            clippy::cast_possible_truncation,
            reason = "`lower` is a non-negative integer no larger than the table length."
        )]
        let i = lower as usize;
        if i >= last {
            return self.lut[last];
        }
        self.lut[i].lerp(self.lut[i + 1], pos - lower)
    }
}

/// Blend `base` with an alpha envelope into a colormap.
///
/// Samples `x` uniformly over `[0, 1]`, one sample per listed color or
/// [`CONTINUOUS_SAMPLES`] for a gradient, and pairs each base color with
/// `curve.alpha(x)`.
pub fn build_alpha_colormap(
    name: impl Into<String>,
    base: &BaseColors,
    curve: AlphaCurve,
) -> Colormap {
    let n = base.sample_count();
    if !curve.center.is_finite() || !curve.sharpness.is_finite() {
        log::warn!(
            "alpha curve has non-finite parameters (center {}, sharpness {}); affected entries become transparent",
            curve.center,
            curve.sharpness
        );
    }
    let step = if n > 1 { 1.0 / (n - 1) as f64 } else { 0.0 };
    let lut: Vec<Rgba> = (0..n)
        .map(|i| {
            let x = i as f64 * step;
            base.entry(i, x).with_alpha(curve.alpha(x))
        })
        .collect();
    let name = name.into();
    log::debug!(
        "built colormap {name:?}: {n} entries, {:?} alpha centered at {}",
        curve.shape,
        curve.center
    );
    Colormap { name, lut }
}
