// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Brainview Region: point-in-region tests for interactive point-cloud selection.
//!
//! This crate answers two questions a selection tool asks for every point of a
//! neuron point cloud:
//!
//! - Does the point's 2D projection fall inside a user-drawn shape?
//!   See [`Region`] and [`RegionTest`].
//! - Is the point close enough to the depth slice currently on screen?
//!   See [`SliceFilter`] and [`in_slice`].
//!
//! It is built on [`kurbo`] and knows nothing about viewers, shape layers or
//! event systems. Hosts convert their shape data into a
//! [`Region`] and their display state into a [`ViewState`].
//!
//! # Example
//!
//! ```rust
//! use brainview_region::{Point3, Region, SliceFilter, in_slice, point_in_region};
//! use kurbo::Point;
//!
//! let square = Region::convex_polygon([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])?;
//! assert!(point_in_region(Point::new(0.5, 0.5), &square));
//! assert!(!point_in_region(Point::new(1.5, 0.5), &square));
//!
//! let neuron = Point3::new(0.7, 0.5, 0.5);
//! assert!(in_slice(neuron, Some(&SliceFilter::new(0.0))));
//! // In full 3D display there is no slice and nothing is selectable.
//! assert!(!in_slice(neuron, None));
//! # Ok::<(), brainview_region::RegionError>(())
//! ```
//!
//! ## Region kinds
//!
//! - [`RegionKind::Rectangle`]: axis-aligned bounds of the vertices; inclusive on all edges.
//! - [`RegionKind::ConvexPolygon`]: edge-sign (cross product) consistency test.
//!   Points on an edge are inside.
//! - [`RegionKind::Polygon`]: arbitrary simple polygon (lasso) using the non-zero
//!   winding rule of [`kurbo::Shape::contains`].
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` floating-point math through `kurbo`'s `libm` support.
//! - `serde`: derives `Serialize`/`Deserialize` for [`Point3`], [`SliceFilter`],
//!   [`DisplayMode`] and [`ViewState`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use kurbo::{Point, Rect, Shape};

mod region;
mod slice;

pub use region::{
    Region, RegionError, RegionKind, Vertices, point_in_convex_polygon, point_in_rectangle,
    point_in_region,
};
pub use slice::{DisplayMode, Point3, SliceFilter, ViewState, in_slice};

/// Trait for 2D membership tests used by selection tools.
///
/// Implementations must treat their boundary as inside: a point lying exactly
/// on an edge of a drawn rectangle is selected.
pub trait RegionTest {
    /// Whether `pt` lies inside (or on the boundary of) this region.
    fn contains_point(&self, pt: Point) -> bool;
}

impl RegionTest for Region {
    fn contains_point(&self, pt: Point) -> bool {
        self.contains(pt)
    }
}

/// Inclusive rectangle test.
///
/// Unlike [`Rect::contains`], which is half-open, the right and bottom edges
/// are part of the region.
impl RegionTest for Rect {
    fn contains_point(&self, pt: Point) -> bool {
        contains_inclusive(*self, pt)
    }
}

impl<T: RegionTest + ?Sized> RegionTest for &T {
    fn contains_point(&self, pt: Point) -> bool {
        (**self).contains_point(pt)
    }
}

/// Generic membership test for any [`kurbo::Shape`].
///
/// Rejects using the shape's bounding box first, then defers to
/// [`Shape::contains`]. There is no blanket `impl<T: Shape> RegionTest`; host
/// shape types implement [`RegionTest`] themselves and may call this.
pub fn contains_shape<S: Shape>(shape: &S, pt: Point) -> bool {
    contains_inclusive(shape.bounding_box(), pt) && shape.contains(pt)
}

#[inline]
pub(crate) fn contains_inclusive(bounds: Rect, pt: Point) -> bool {
    bounds.x0 <= pt.x && pt.x <= bounds.x1 && bounds.y0 <= pt.y && pt.y <= bounds.y1
}
