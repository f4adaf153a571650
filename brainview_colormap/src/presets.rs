// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ready-made base colors and alpha colormaps.
//!
//! - [`seismic_alpha`]: diverging blue-white-red, transparent around the
//!   middle. Use with a symmetric [`ContrastRange`](crate::ContrastRange) for
//!   signed correlations.
//! - [`inferno_alpha`]: perceptually uniform black-purple-orange-yellow,
//!   transparent below the middle. Use for magnitudes.

use alloc::vec;
use alloc::vec::Vec;

use crate::colormap::sample_gradient;
use crate::{AlphaCurve, BaseColors, Colormap, Rgb, build_alpha_colormap};

/// Number of entries in the [`inferno`] table.
pub const INFERNO_LEN: usize = 256;

/// Evenly spaced samples of inferno as 8-bit `0xRRGGBB`, first to last.
const INFERNO_ANCHORS: [u32; 10] = [
    0x00_00_04, 0x1b_0c_41, 0x4a_0c_6b, 0x78_1c_6d, 0xa5_2c_60, 0xcf_44_46, 0xed_69_25, 0xfb_9b_06,
    0xf7_d1_3d, 0xfc_ff_a4,
];

fn rgb_hex(hex: u32) -> Rgb {
    let channel = |shift: u32| f64::from((hex >> shift) & 0xff) / 255.0;
    Rgb::new(channel(16), channel(8), channel(0))
}

/// Diverging gradient: dark blue, blue, white, red, dark red.
pub fn seismic() -> BaseColors {
    BaseColors::gradient_unchecked(vec![
        (0.0, Rgb::new(0.0, 0.0, 0.3)),
        (0.25, Rgb::new(0.0, 0.0, 1.0)),
        (0.5, Rgb::new(1.0, 1.0, 1.0)),
        (0.75, Rgb::new(1.0, 0.0, 0.0)),
        (1.0, Rgb::new(0.5, 0.0, 0.0)),
    ])
}

/// Inferno as a listed table of [`INFERNO_LEN`] colors.
///
/// Entries are interpolated between the anchor samples, so they are within
/// 8-bit rounding of the anchors and smooth in between.
pub fn inferno() -> BaseColors {
    let last = (INFERNO_ANCHORS.len() - 1) as f64;
    let stops: Vec<(f64, Rgb)> = INFERNO_ANCHORS
        .iter()
        .enumerate()
        .map(|(i, &hex)| (i as f64 / last, rgb_hex(hex)))
        .collect();
    let span = (INFERNO_LEN - 1) as f64;
    BaseColors::listed_unchecked(
        (0..INFERNO_LEN)
            .map(|i| sample_gradient(&stops, i as f64 / span))
            .collect(),
    )
}

/// [`seismic`] with a cosine alpha centered at 0.5, sharpness 20.
pub fn seismic_alpha() -> Colormap {
    build_alpha_colormap("SeismicAlpha", &seismic(), AlphaCurve::cosine(0.5, 20.0))
}

/// [`inferno`] with a sigmoid alpha centered at 0.5, sharpness 10.
///
/// One alpha sample per table entry.
pub fn inferno_alpha() -> Colormap {
    build_alpha_colormap("InfernoAlpha", &inferno(), AlphaCurve::sigmoid(0.5, 10.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CONTINUOUS_SAMPLES, Rgba};

    #[test]
    fn seismic_alpha_fades_in_the_middle() {
        let cmap = seismic_alpha();
        assert_eq!(cmap.len(), CONTINUOUS_SAMPLES);
        assert_eq!(cmap.name(), "SeismicAlpha");
        let start = cmap.map(0.0);
        let end = cmap.map(1.0);
        assert_eq!(start.rgb(), Rgb::new(0.0, 0.0, 0.3));
        assert_eq!(end.rgb(), Rgb::new(0.5, 0.0, 0.0));
        assert!(start.a > 0.99 && end.a > 0.99, "ends are opaque");
        assert!(cmap.map(0.5).a < 0.01, "center is transparent");
    }

    #[test]
    fn inferno_is_a_listed_table() {
        let base = inferno();
        assert!(!base.is_continuous());
        assert_eq!(base.sample_count(), INFERNO_LEN);
    }

    #[test]
    fn inferno_alpha_has_one_entry_per_color() {
        let cmap = inferno_alpha();
        assert_eq!(cmap.name(), "InfernoAlpha");
        assert_eq!(cmap.len(), INFERNO_LEN);

        let first = cmap.entries()[0];
        let last = cmap.entries()[INFERNO_LEN - 1];
        assert_eq!(first.rgb(), Rgb::new(0.0, 0.0, 4.0 / 255.0));
        assert_eq!(last.rgb(), rgb_hex(0xfc_ff_a4));
        assert!(first.a < 0.01, "bottom is transparent: {}", first.a);
        assert!(last.a > 0.99, "top is opaque: {}", last.a);
        assert_ne!(cmap.map(0.6), Rgba::TRANSPARENT);
    }

    #[test]
    fn inferno_brightens_towards_the_top() {
        let base = inferno_alpha();
        let luma = |c: Rgba| c.r + c.g + c.b;
        let entries = base.entries();
        for w in entries.windows(32).step_by(32) {
            assert!(luma(w[31]) > luma(w[0]), "luma dips within a block");
        }
    }
}
