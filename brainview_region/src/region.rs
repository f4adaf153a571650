// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region type and the point-in-region tests.

use kurbo::{BezPath, Point, Rect, Shape};
use smallvec::SmallVec;

use crate::contains_inclusive;

/// Inline storage for region vertices; rectangles never allocate.
pub type Vertices = SmallVec<[Point; 4]>;

/// How a [`Region`] tests membership.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// Axis-aligned bounds of the vertices, inclusive on every edge.
    Rectangle,
    /// Convex polygon tested by edge-sign consistency.
    ConvexPolygon,
    /// Arbitrary simple polygon tested with the non-zero winding rule.
    Polygon,
}

/// Reasons a region cannot be built from the supplied vertices.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegionError {
    /// Not enough vertices for the requested kind.
    #[error("invalid region: {kind:?} needs at least {required} vertices, got {got}")]
    TooFewVertices {
        /// The requested region kind.
        kind: RegionKind,
        /// Minimum vertex count for `kind`.
        required: usize,
        /// Number of vertices supplied.
        got: usize,
    },
    /// A rectangle whose vertices all coincide.
    #[error("invalid region: rectangle needs at least 2 distinct vertices")]
    DegenerateRectangle,
    /// A vertex with a NaN or infinite coordinate.
    #[error("invalid region: vertex {index} is not finite")]
    NonFiniteVertex {
        /// Position of the offending vertex.
        index: usize,
    },
}

/// A user-drawn 2D selection shape.
///
/// Vertices are stored in drawing order. The bounding box is computed once at
/// construction and used to reject far-away points before the exact test.
#[derive(Clone, Debug)]
pub struct Region {
    kind: RegionKind,
    vertices: Vertices,
    bounds: Rect,
    // Only built for `RegionKind::Polygon`.
    path: Option<BezPath>,
}

impl Region {
    /// Build an axis-aligned rectangle from its corner vertices.
    ///
    /// Any number of vertices is accepted as long as at least two of them are
    /// distinct; two opposite corners are enough.
    pub fn rectangle<P: Into<Point>>(
        vertices: impl IntoIterator<Item = P>,
    ) -> Result<Self, RegionError> {
        let vertices = collect_vertices(vertices)?;
        let Some(first) = vertices.first() else {
            return Err(RegionError::TooFewVertices {
                kind: RegionKind::Rectangle,
                required: 2,
                got: 0,
            });
        };
        if vertices.len() < 2 {
            return Err(RegionError::TooFewVertices {
                kind: RegionKind::Rectangle,
                required: 2,
                got: vertices.len(),
            });
        }
        if vertices.iter().all(|v| v == first) {
            return Err(RegionError::DegenerateRectangle);
        }
        Ok(Self::from_parts(RegionKind::Rectangle, vertices))
    }

    /// Build a convex polygon from at least three vertices.
    ///
    /// Convexity is not verified; for a non-convex outline use
    /// [`Region::polygon`].
    pub fn convex_polygon<P: Into<Point>>(
        vertices: impl IntoIterator<Item = P>,
    ) -> Result<Self, RegionError> {
        let vertices = collect_vertices(vertices)?;
        check_polygon(RegionKind::ConvexPolygon, &vertices)?;
        Ok(Self::from_parts(RegionKind::ConvexPolygon, vertices))
    }

    /// Build an arbitrary simple polygon (for example a freehand lasso).
    pub fn polygon<P: Into<Point>>(
        vertices: impl IntoIterator<Item = P>,
    ) -> Result<Self, RegionError> {
        let vertices = collect_vertices(vertices)?;
        check_polygon(RegionKind::Polygon, &vertices)?;
        Ok(Self::from_parts(RegionKind::Polygon, vertices))
    }

    /// A rectangle region covering `rect`.
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        let vertices: Vertices = SmallVec::from_buf([
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ]);
        Self::from_parts(RegionKind::Rectangle, vertices)
    }

    fn from_parts(kind: RegionKind, vertices: Vertices) -> Self {
        let bounds = bounds_of(&vertices);
        let path = (kind == RegionKind::Polygon).then(|| {
            let mut path = BezPath::new();
            let mut it = vertices.iter().copied();
            if let Some(start) = it.next() {
                path.move_to(start);
                for v in it {
                    path.line_to(v);
                }
                path.close_path();
            }
            path
        });
        Self {
            kind,
            vertices,
            bounds,
            path,
        }
    }

    /// The membership rule of this region.
    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    /// Vertices in drawing order.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Axis-aligned bounds of the vertices.
    pub fn bounding_box(&self) -> Rect {
        self.bounds
    }

    /// Whether `pt` lies inside the region. Boundaries count as inside for
    /// rectangles and convex polygons.
    pub fn contains(&self, pt: Point) -> bool {
        if !contains_inclusive(self.bounds, pt) {
            return false;
        }
        match self.kind {
            RegionKind::Rectangle => true,
            RegionKind::ConvexPolygon => point_in_convex_polygon(pt, &self.vertices),
            RegionKind::Polygon => self.path.as_ref().is_some_and(|p| p.contains(pt)),
        }
    }
}

/// Test `pt` against `region`.
///
/// Equivalent to [`Region::contains`]; provided as a free function for callers
/// that map over point sets.
pub fn point_in_region(pt: Point, region: &Region) -> bool {
    region.contains(pt)
}

/// Inclusive axis-aligned bounds test over raw vertices.
///
/// An empty vertex slice contains nothing.
pub fn point_in_rectangle(pt: Point, vertices: &[Point]) -> bool {
    !vertices.is_empty() && contains_inclusive(bounds_of(vertices), pt)
}

/// Edge-sign test for a convex polygon given as a vertex cycle.
///
/// For every edge `(v[i], v[(i + 1) % n])` the cross product of the edge
/// vector with the vector from `v[i]` to `pt` gives the side of the edge the
/// point is on. The point is inside when all non-zero sides agree. A zero
/// cross product (degenerate edge, or `pt` on the edge line) never rejects.
///
/// Points outside the vertices' bounding box are rejected first, so a
/// zero-area polygon (collinear or coincident vertices) only contains points
/// on its own extent. Fewer than three vertices contain nothing.
pub fn point_in_convex_polygon(pt: Point, vertices: &[Point]) -> bool {
    let n = vertices.len();
    if n < 3 || !contains_inclusive(bounds_of(vertices), pt) {
        return false;
    }
    // `None` until the first edge with a non-zero cross product.
    let mut left: Option<bool> = None;
    for (i, &a) in vertices.iter().enumerate() {
        let b = vertices[(i + 1) % n];
        let cross = (b - a).cross(pt - a);
        if cross == 0.0 {
            continue;
        }
        let side = cross > 0.0;
        match left {
            None => left = Some(side),
            Some(consensus) if consensus != side => return false,
            Some(_) => {}
        }
    }
    true
}

fn collect_vertices<P: Into<Point>>(
    vertices: impl IntoIterator<Item = P>,
) -> Result<Vertices, RegionError> {
    let vertices: Vertices = vertices.into_iter().map(Into::into).collect();
    if let Some(index) = vertices.iter().position(|v| !v.is_finite()) {
        return Err(RegionError::NonFiniteVertex { index });
    }
    Ok(vertices)
}

fn check_polygon(kind: RegionKind, vertices: &[Point]) -> Result<(), RegionError> {
    if vertices.len() < 3 {
        return Err(RegionError::TooFewVertices {
            kind,
            required: 3,
            got: vertices.len(),
        });
    }
    Ok(())
}

fn bounds_of(vertices: &[Point]) -> Rect {
    let mut it = vertices.iter().copied();
    let Some(first) = it.next() else {
        return Rect::ZERO;
    };
    it.fold(Rect::from_points(first, first), |acc, v| acc.union_pt(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn unit_square() -> Region {
        Region::convex_polygon([(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
            .expect("valid square")
    }

    #[test]
    fn unit_square_inside_and_outside() {
        let square = unit_square();
        assert!(point_in_region(Point::new(0.5, 0.5), &square));
        assert!(!point_in_region(Point::new(1.5, 0.5), &square));
    }

    #[test]
    fn convex_test_is_orientation_independent() {
        let ccw = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(2.0, 3.0),
        ];
        let cw: Vec<Point> = ccw.iter().rev().copied().collect();
        let inside = Point::new(2.0, 1.0);
        let outside = Point::new(0.0, 3.0);
        assert!(point_in_convex_polygon(inside, &ccw));
        assert!(point_in_convex_polygon(inside, &cw));
        assert!(!point_in_convex_polygon(outside, &ccw));
        assert!(!point_in_convex_polygon(outside, &cw));
    }

    #[test]
    fn points_on_edges_and_vertices_are_inside() {
        let square = unit_square();
        assert!(square.contains(Point::new(0.5, 0.0)));
        assert!(square.contains(Point::new(1.0, 1.0)));
        assert!(square.contains(Point::new(0.0, 0.3)));
    }

    #[test]
    fn repeated_vertex_does_not_reject() {
        let with_dup = [
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
        ];
        assert!(point_in_convex_polygon(Point::new(1.0, 1.0), &with_dup));
    }

    #[test]
    fn zero_area_polygons_stay_within_their_extent() {
        let collinear = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        assert!(!point_in_convex_polygon(Point::new(50.0, 0.0), &collinear));
        assert!(!point_in_convex_polygon(Point::new(1.0, 3.0), &collinear));
        assert!(point_in_convex_polygon(Point::new(1.5, 0.0), &collinear));

        let coincident = [Point::new(1.0, 1.0); 3];
        assert!(!point_in_convex_polygon(Point::new(5.0, 5.0), &coincident));
        assert!(point_in_convex_polygon(Point::new(1.0, 1.0), &coincident));

        // The free function and the region type agree.
        let region = Region::convex_polygon(collinear).expect("three vertices");
        for pt in [Point::new(50.0, 0.0), Point::new(1.5, 0.0)] {
            assert_eq!(
                region.contains(pt),
                point_in_convex_polygon(pt, &collinear),
                "{pt:?}"
            );
        }
    }

    #[test]
    fn outside_bounding_box_is_never_inside() {
        let hexagon = Region::convex_polygon([
            (2.0, 0.0),
            (4.0, 0.0),
            (5.0, 2.0),
            (4.0, 4.0),
            (2.0, 4.0),
            (1.0, 2.0),
        ])
        .expect("valid hexagon");
        let bounds = hexagon.bounding_box();
        for &(x, y) in &[
            (bounds.x0 - 0.1, 2.0),
            (bounds.x1 + 0.1, 2.0),
            (3.0, bounds.y0 - 0.1),
            (3.0, bounds.y1 + 0.1),
            (-100.0, -100.0),
        ] {
            assert!(!hexagon.contains(Point::new(x, y)), "({x}, {y})");
            assert!(
                !point_in_convex_polygon(Point::new(x, y), hexagon.vertices()),
                "({x}, {y})"
            );
        }
    }

    #[test]
    fn rectangle_from_two_corners() {
        let r = Region::rectangle([(12.0, 8.0), (0.0, 0.0)]).expect("two distinct corners");
        assert_eq!(r.kind(), RegionKind::Rectangle);
        assert_eq!(r.bounding_box(), Rect::new(0.0, 0.0, 12.0, 8.0));
        assert!(r.contains(Point::new(12.0, 8.0)));
        assert!(r.contains(Point::new(10.0, 0.0)));
        assert!(!r.contains(Point::new(10.0, 8.5)));
    }

    #[test]
    fn rectangle_rejects_degenerate_input() {
        let empty: [(f64, f64); 0] = [];
        assert_eq!(
            Region::rectangle(empty).unwrap_err(),
            RegionError::TooFewVertices {
                kind: RegionKind::Rectangle,
                required: 2,
                got: 0,
            }
        );
        assert_eq!(
            Region::rectangle([(1.0, 1.0)]).unwrap_err(),
            RegionError::TooFewVertices {
                kind: RegionKind::Rectangle,
                required: 2,
                got: 1,
            }
        );
        assert_eq!(
            Region::rectangle([(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]).unwrap_err(),
            RegionError::DegenerateRectangle
        );
    }

    #[test]
    fn polygons_need_three_vertices() {
        let err = Region::convex_polygon([(0.0, 0.0), (1.0, 1.0)]).unwrap_err();
        assert_eq!(
            err,
            RegionError::TooFewVertices {
                kind: RegionKind::ConvexPolygon,
                required: 3,
                got: 2,
            }
        );
        assert!(Region::polygon([(0.0, 0.0)]).is_err());
        assert!(!point_in_convex_polygon(
            Point::new(0.0, 0.0),
            &[Point::new(0.0, 0.0)]
        ));
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let err = Region::convex_polygon([(0.0, 0.0), (f64::NAN, 1.0), (1.0, 0.0)]).unwrap_err();
        assert_eq!(err, RegionError::NonFiniteVertex { index: 1 });
    }

    #[test]
    fn lasso_polygon_handles_concavity() {
        // An L shape: the notch at the top right is outside.
        let lasso = Region::polygon([
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 2.0),
            (2.0, 4.0),
            (0.0, 4.0),
        ])
        .expect("valid lasso");
        assert!(lasso.contains(Point::new(1.0, 3.0)));
        assert!(lasso.contains(Point::new(3.0, 1.0)));
        assert!(!lasso.contains(Point::new(3.0, 3.0)));
    }

    #[test]
    fn from_rect_normalizes() {
        let r = Region::from_rect(Rect::new(5.0, 5.0, 1.0, 1.0));
        assert_eq!(r.vertices().len(), 4);
        assert!(r.contains(Point::new(1.0, 5.0)));
        assert!(point_in_rectangle(Point::new(3.0, 3.0), r.vertices()));
        assert!(!point_in_rectangle(Point::new(3.0, 3.0), &[]));
    }
}
