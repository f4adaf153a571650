// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alpha envelopes over the normalized value domain.

use core::f64::consts::PI;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// Shape of an alpha envelope.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlphaShape {
    /// `alpha(x) = 1 - 1 / (1 + exp(sharpness * (x - center)))`.
    ///
    /// Transparent below `center`, opaque above. Suited to sequential maps
    /// where only strong values matter.
    Sigmoid,
    /// `alpha(x) = 1 - cos(pi * (x - center))^sharpness`.
    ///
    /// Transparent around `center`, opaque towards both ends. Suited to
    /// diverging maps centered on zero correlation.
    Cosine,
}

/// An alpha envelope: shape, center and sharpness.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AlphaCurve {
    /// Envelope shape.
    pub shape: AlphaShape,
    /// Center of the envelope in `[0, 1]`.
    pub center: f64,
    /// Steepness of the transition.
    pub sharpness: f64,
}

impl AlphaCurve {
    /// A sigmoid envelope.
    pub const fn sigmoid(center: f64, sharpness: f64) -> Self {
        Self {
            shape: AlphaShape::Sigmoid,
            center,
            sharpness,
        }
    }

    /// A cosine envelope.
    pub const fn cosine(center: f64, sharpness: f64) -> Self {
        Self {
            shape: AlphaShape::Cosine,
            center,
            sharpness,
        }
    }

    /// Alpha at normalized position `x`, clamped to `[0, 1]`.
    ///
    /// For the cosine shape a negative cosine raised to a fractional
    /// `sharpness` has no real value; its magnitude is used instead. Odd
    /// integer exponents keep their sign and are clamped like any other
    /// out-of-range result.
    pub fn alpha(&self, x: f64) -> f64 {
        let raw = match self.shape {
            AlphaShape::Sigmoid => 1.0 - 1.0 / (1.0 + (self.sharpness * (x - self.center)).exp()),
            AlphaShape::Cosine => {
                let base = (PI * (x - self.center)).cos();
                let powered = if base < 0.0 && self.sharpness % 1.0 != 0.0 {
                    base.abs().powf(self.sharpness)
                } else {
                    base.powf(self.sharpness)
                };
                1.0 - powered
            }
        };
        if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) }
    }
}

impl Default for AlphaCurve {
    fn default() -> Self {
        Self::sigmoid(0.5, 10.0)
    }
}
