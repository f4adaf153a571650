// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-slice filtering for 3D point sets viewed one slice at a time.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

/// A point in volume space, ordered `(depth, x, y)` like the viewer's axes.
///
/// Region tests use the `(x, y)` projection; slice filtering uses `depth`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point3 {
    /// Coordinate along the sliced axis.
    pub depth: f64,
    /// Horizontal in-plane coordinate.
    pub x: f64,
    /// Vertical in-plane coordinate.
    pub y: f64,
}

impl Point3 {
    /// Create a point from its depth and in-plane coordinates.
    pub const fn new(depth: f64, x: f64, y: f64) -> Self {
        Self { depth, x, y }
    }

    /// The in-plane projection.
    pub const fn xy(self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_squared(self, other: Self) -> f64 {
        let dd = self.depth - other.depth;
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dd * dd + dx * dx + dy * dy
    }
}

impl From<[f64; 3]> for Point3 {
    fn from([depth, x, y]: [f64; 3]) -> Self {
        Self::new(depth, x, y)
    }
}

impl From<(f64, f64, f64)> for Point3 {
    fn from((depth, x, y): (f64, f64, f64)) -> Self {
        Self::new(depth, x, y)
    }
}

/// Planar points live on depth 0.
impl From<Point> for Point3 {
    fn from(pt: Point) -> Self {
        Self::new(0.0, pt.x, pt.y)
    }
}

/// Restricts membership tests to points near the displayed depth slice.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliceFilter {
    /// Depth of the displayed slice.
    pub depth: f64,
    /// Full thickness of the accepted band; points within `tolerance / 2` of
    /// `depth` (inclusive) pass.
    pub tolerance: f64,
}

impl SliceFilter {
    /// Band thickness used when none is configured, in depth units.
    pub const DEFAULT_TOLERANCE: f64 = 1.5;

    /// A filter around `depth` with the default tolerance.
    pub const fn new(depth: f64) -> Self {
        Self {
            depth,
            tolerance: Self::DEFAULT_TOLERANCE,
        }
    }

    /// Replace the band thickness.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Whether `depth` lies in the band.
    pub fn contains_depth(&self, depth: f64) -> bool {
        (depth - self.depth).abs() <= self.tolerance / 2.0
    }
}

impl Default for SliceFilter {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Whether `point` is eligible for 2D region selection.
///
/// `None` models a viewer in full 3D display: drawing a 2D region is
/// meaningless there, so every point is excluded.
pub fn in_slice(point: Point3, filter: Option<&SliceFilter>) -> bool {
    filter.is_some_and(|f| f.contains_depth(point.depth))
}

/// How the host viewer is displaying the volume.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DisplayMode {
    /// A single 2D slice through the volume.
    #[default]
    Slice,
    /// The full volume rendered in 3D.
    Volume,
}

/// The display state a host reports to the selection layer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewState {
    /// Current display mode.
    pub mode: DisplayMode,
    /// Depth of the current slice; ignored in [`DisplayMode::Volume`].
    pub depth: f64,
}

impl ViewState {
    /// A 2D slice view at `depth`.
    pub const fn slice(depth: f64) -> Self {
        Self {
            mode: DisplayMode::Slice,
            depth,
        }
    }

    /// A full 3D view.
    pub const fn volume() -> Self {
        Self {
            mode: DisplayMode::Volume,
            depth: 0.0,
        }
    }

    /// The slice filter for this view, or `None` in 3D.
    pub fn slice_filter(&self, tolerance: f64) -> Option<SliceFilter> {
        match self.mode {
            DisplayMode::Slice => Some(SliceFilter::new(self.depth).with_tolerance(tolerance)),
            DisplayMode::Volume => None,
        }
    }
}
