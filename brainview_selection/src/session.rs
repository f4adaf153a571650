// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection sessions: region edits in, per-point colors out.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use brainview_colormap::{Colormap, ContrastRange, Rgba, colorize, overlay};
use brainview_region::{Point3, Region, RegionTest, SliceFilter, ViewState, in_slice};
use kurbo::Point;

use crate::{
    DuplicatePolicy, PairwiseMatrix, Reduction, Selection, SelectionError, aggregate_with,
};

/// Tunables for a [`SelectionSession`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionConfig {
    /// Color painted over selected points.
    pub highlight: Rgba,
    /// Thickness of the depth band around the displayed slice.
    pub slice_tolerance: f64,
    /// Treatment of indices selected more than once.
    pub duplicates: DuplicatePolicy,
    /// How affinities to the selection are combined.
    pub reduction: Reduction,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            highlight: Rgba::LIGHT_BLUE,
            slice_tolerance: SliceFilter::DEFAULT_TOLERANCE,
            duplicates: DuplicatePolicy::Set,
            reduction: Reduction::MeanAbs,
        }
    }
}

type RecolorHook = Box<dyn FnMut(&[Rgba])>;

/// A region-selection session over one point layer.
///
/// The session is driven by host events on a single thread:
///
/// - display changes via [`set_view`](Self::set_view),
/// - shape edits via [`select`](Self::select), [`unselect`](Self::unselect),
///   [`reselect`](Self::reselect) and [`clear`](Self::clear).
///
/// Every mutating call recomputes [`values`](Self::values) and
/// [`colors`](Self::colors) and then runs the hooks registered with
/// [`on_recolor`](Self::on_recolor).
pub struct SelectionSession {
    points: Vec<Point3>,
    pairwise: PairwiseMatrix,
    cmap: Colormap,
    range: ContrastRange,
    config: SelectionConfig,
    view: ViewState,
    selection: Selection,
    values: Vec<f64>,
    colors: Vec<Rgba>,
    hooks: Vec<RecolorHook>,
}

impl fmt::Debug for SelectionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionSession")
            .field("points", &self.points.len())
            .field("cmap", &self.cmap.name())
            .field("range", &self.range)
            .field("config", &self.config)
            .field("view", &self.view)
            .field("selection", &self.selection.as_slice())
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

impl SelectionSession {
    /// Start a session with an empty selection.
    ///
    /// Fails with [`SelectionError::DimensionMismatch`] when the number of
    /// points differs from the matrix size. The view starts as a slice at
    /// depth 0.
    pub fn new(
        points: Vec<Point3>,
        pairwise: PairwiseMatrix,
        cmap: Colormap,
        range: ContrastRange,
        config: SelectionConfig,
    ) -> Result<Self, SelectionError> {
        check_dimensions(points.len(), &pairwise)?;
        let mut session = Self {
            points,
            pairwise,
            cmap,
            range,
            config,
            view: ViewState::default(),
            selection: Selection::new(config.duplicates),
            values: Vec::new(),
            colors: Vec::new(),
            hooks: Vec::new(),
        };
        session.recolor();
        Ok(session)
    }

    /// Register a hook run with the new colors after every recolor.
    pub fn on_recolor(&mut self, hook: impl FnMut(&[Rgba]) + 'static) {
        self.hooks.push(Box::new(hook));
    }

    /// Configuration in effect.
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    /// Current point snapshot.
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Swap in a new point snapshot (for example after the host moved the
    /// layer). The selection is kept; colors are not recomputed.
    pub fn replace_points(&mut self, points: Vec<Point3>) -> Result<(), SelectionError> {
        check_dimensions(points.len(), &self.pairwise)?;
        self.points = points;
        Ok(())
    }

    /// Current display state.
    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Update the display state. Affects which points later region edits
    /// reach; the existing selection is kept.
    pub fn set_view(&mut self, view: ViewState) {
        self.view = view;
    }

    /// The slice filter for the current view, `None` in 3D.
    pub fn slice_filter(&self) -> Option<SliceFilter> {
        self.view.slice_filter(self.config.slice_tolerance)
    }

    /// Indices of in-slice points whose `(x, y)` lies in `region`, ascending.
    ///
    /// Always empty in 3D display.
    pub fn points_in_region<R: RegionTest + ?Sized>(&self, region: &R) -> Vec<usize> {
        let Some(filter) = self.slice_filter() else {
            return Vec::new();
        };
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| in_slice(**p, Some(&filter)) && region.contains_point(p.xy()))
            .map(|(i, _)| i)
            .collect()
    }

    /// Add the points in `region` to the selection. Returns how many entries
    /// were appended.
    pub fn select<R: RegionTest + ?Sized>(&mut self, region: &R) -> usize {
        let hits = self.points_in_region(region);
        let added = self.selection.insert_all(hits);
        log::debug!("select: {added} added, {} selected", self.selection.len());
        self.recolor();
        added
    }

    /// Remove the points in `region` from the selection. Returns how many
    /// entries were removed; points that were not selected are ignored.
    pub fn unselect<R: RegionTest + ?Sized>(&mut self, region: &R) -> usize {
        let hits = self.points_in_region(region);
        let removed = self.selection.remove_all(hits.into_iter().rev());
        log::debug!("unselect: {removed} removed, {} selected", self.selection.len());
        self.recolor();
        removed
    }

    /// Replace the selection with the union of `regions`, recoloring once.
    ///
    /// This mirrors a host shape layer whose data changed: the whole layer is
    /// re-evaluated rather than diffed.
    pub fn reselect<'a, R, I>(&mut self, regions: I) -> usize
    where
        R: RegionTest + ?Sized + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        self.selection.clear();
        let mut added = 0;
        for region in regions {
            let hits = self.points_in_region(region);
            added += self.selection.insert_all(hits);
        }
        log::debug!("reselect: {added} selected");
        self.recolor();
        added
    }

    /// [`reselect`](Self::reselect) from raw host shapes, each a convex vertex
    /// list such as a drawn rectangle.
    ///
    /// Fails without touching the selection if any shape is invalid.
    pub fn reselect_shapes<S, P>(&mut self, shapes: &[S]) -> Result<usize, SelectionError>
    where
        S: AsRef<[P]>,
        P: Into<Point> + Copy,
    {
        let regions = shapes
            .iter()
            .map(|s| Region::convex_polygon(s.as_ref().iter().copied()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.reselect(&regions))
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        self.selection.clear();
        log::debug!("clear");
        self.recolor();
    }

    /// Selected indices in insertion order.
    pub fn current(&self) -> &[usize] {
        self.selection.as_slice()
    }

    /// The selection with its membership queries.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Per-point aggregate affinity to the selection.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Per-point colors, highlight applied.
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    fn recolor(&mut self) {
        let selected = self.selection.as_slice();
        self.values = aggregate_with(&self.pairwise, selected, self.config.reduction);
        self.colors = colorize(&self.values, &self.cmap, self.range);
        overlay(&mut self.colors, selected, self.config.highlight);
        log::trace!(
            "recolored {} points, {} highlighted",
            self.colors.len(),
            selected.len()
        );
        for hook in &mut self.hooks {
            hook(&self.colors);
        }
    }
}

fn check_dimensions(points: usize, pairwise: &PairwiseMatrix) -> Result<(), SelectionError> {
    if points != pairwise.size() {
        return Err(SelectionError::DimensionMismatch {
            points,
            matrix: pairwise.size(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use brainview_colormap::{AlphaCurve, BaseColors, Rgb, build_alpha_colormap};
    use core::cell::Cell;
    use kurbo::Rect;

    const HIGHLIGHT: Rgba = Rgba::new(1.0, 0.0, 1.0, 1.0);

    fn gray_ramp() -> Colormap {
        let base = BaseColors::listed(vec![Rgb::new(0.0, 0.0, 0.0), Rgb::new(1.0, 1.0, 1.0)])
            .expect("two colors");
        build_alpha_colormap("gray", &base, AlphaCurve::sigmoid(0.5, 10.0))
    }

    /// Four neurons laid out `(depth, x, y)`.
    fn four_points() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.5, 5.0, 5.0),
            Point3::new(0.0, 10.0, 10.0),
            Point3::new(5.0, 10.0, 0.0),
        ]
    }

    fn session_with(config: SelectionConfig) -> SelectionSession {
        let pairwise = PairwiseMatrix::from_rows(&[
            [1.0, 0.5, -0.5, 0.0],
            [0.5, 1.0, 0.0, 0.25],
            [-0.5, 0.0, 1.0, 0.75],
            [0.0, 0.25, 0.75, 1.0],
        ])
        .expect("square");
        SelectionSession::new(
            four_points(),
            pairwise,
            gray_ramp(),
            ContrastRange::new(0.0, 1.0).expect("valid range"),
            config,
        )
        .expect("dimensions match")
    }

    fn session() -> SelectionSession {
        session_with(SelectionConfig {
            highlight: HIGHLIGHT,
            ..SelectionConfig::default()
        })
    }

    #[test]
    fn rectangle_selects_in_slice_points_only() {
        let mut s = session();
        let rect = Region::rectangle([(0.0, 0.0), (0.0, 8.0), (12.0, 8.0), (12.0, 0.0)])
            .expect("valid rectangle");
        // Point 2 is at y = 10 (outside), point 3 is inside in-plane but at depth 5.
        assert_eq!(s.select(&rect), 2);
        assert_eq!(s.current(), &[0, 1]);
    }

    #[test]
    fn coplanar_rectangle_scenario_selects_three() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 5.0),
            Point3::new(0.0, 10.0, 10.0),
            Point3::new(0.0, 10.0, 0.0),
        ];
        let mut s = SelectionSession::new(
            points,
            PairwiseMatrix::zeros(4),
            gray_ramp(),
            ContrastRange::new(0.0, 1.0).expect("valid range"),
            SelectionConfig::default(),
        )
        .expect("dimensions match");
        let rect = Region::rectangle([(0.0, 0.0), (0.0, 8.0), (12.0, 8.0), (12.0, 0.0)])
            .expect("valid rectangle");
        // Only point 2 (y = 10) falls outside the 12 x 8 rectangle.
        assert_eq!(s.select(&rect), 3);
        assert_eq!(s.current(), &[0, 1, 3]);
    }

    #[test]
    fn volume_view_selects_nothing() {
        let mut s = session();
        s.set_view(ViewState::volume());
        let everything = Rect::new(-100.0, -100.0, 100.0, 100.0);
        assert!(s.points_in_region(&everything).is_empty());
        assert_eq!(s.select(&everything), 0);
        assert!(s.current().is_empty());
    }

    #[test]
    fn slice_depth_moves_the_band() {
        let mut s = session();
        s.set_view(ViewState::slice(5.0));
        let everything = Rect::new(-100.0, -100.0, 100.0, 100.0);
        assert_eq!(s.points_in_region(&everything), vec![3]);
    }

    #[test]
    fn colors_follow_aggregate_and_highlight() {
        let mut s = session();
        assert_eq!(s.values(), &[0.0; 4]);
        assert!(s.colors().iter().all(|c| *c != HIGHLIGHT));

        s.select(&Rect::new(-1.0, -1.0, 1.0, 1.0));
        assert_eq!(s.current(), &[0]);
        assert_eq!(s.values(), &[1.0, 0.5, 0.5, 0.0]);
        assert_eq!(s.colors()[0], HIGHLIGHT);
        let cmap = gray_ramp();
        assert_eq!(s.colors()[1], cmap.map(0.5));
        assert_eq!(s.colors()[3], cmap.map(0.0));
    }

    #[test]
    fn select_then_unselect_round_trips() {
        for duplicates in [DuplicatePolicy::Set, DuplicatePolicy::Multiset] {
            let mut s = session_with(SelectionConfig {
                duplicates,
                ..SelectionConfig::default()
            });
            s.select(&Rect::new(9.0, 9.0, 11.0, 11.0));
            let before = s.current().to_vec();
            let before_colors = s.colors().to_vec();

            let region = Rect::new(-1.0, -1.0, 6.0, 6.0);
            s.select(&region);
            assert_ne!(s.current(), before.as_slice());
            s.unselect(&region);
            assert_eq!(s.current(), before.as_slice(), "{duplicates:?}");
            assert_eq!(s.colors(), before_colors.as_slice(), "{duplicates:?}");
        }
    }

    #[test]
    fn multiset_policy_counts_repeated_selects() {
        let mut s = session_with(SelectionConfig {
            duplicates: DuplicatePolicy::Multiset,
            ..SelectionConfig::default()
        });
        let region = Rect::new(-1.0, -1.0, 1.0, 1.0);
        s.select(&region);
        s.select(&region);
        assert_eq!(s.current(), &[0, 0]);
        assert_eq!(s.values(), &[1.0, 0.5, 0.5, 0.0]);
        s.unselect(&region);
        assert_eq!(s.current(), &[0]);

        let mut set = session();
        set.select(&region);
        set.select(&region);
        assert_eq!(set.current(), &[0]);
    }

    #[test]
    fn unselect_of_unselected_points_is_ignored() {
        let mut s = session();
        s.select(&Rect::new(-1.0, -1.0, 1.0, 1.0));
        assert_eq!(s.unselect(&Rect::new(4.0, 4.0, 6.0, 6.0)), 0);
        assert_eq!(s.current(), &[0]);
    }

    #[test]
    fn reselect_replaces_the_selection() {
        let mut s = session();
        s.select(&Rect::new(-1.0, -1.0, 1.0, 1.0));
        let shapes = [
            Rect::new(4.0, 4.0, 6.0, 6.0),
            Rect::new(9.0, 9.0, 11.0, 11.0),
            Rect::new(4.5, 4.5, 5.5, 5.5),
        ];
        assert_eq!(s.reselect(&shapes), 2);
        assert_eq!(s.current(), &[1, 2]);
    }

    #[test]
    fn reselect_shapes_validates_vertices() {
        let mut s = session();
        let shapes = vec![vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 6.0)]];
        assert_eq!(s.reselect_shapes(&shapes).expect("valid shapes"), 1);
        assert_eq!(s.current(), &[1]);

        let bad = vec![vec![(0.0, 0.0), (1.0, 1.0)]];
        assert!(matches!(
            s.reselect_shapes(&bad),
            Err(SelectionError::InvalidRegion(_))
        ));
        assert_eq!(s.current(), &[1]);
    }

    #[test]
    fn clear_recolors_and_notifies() {
        let mut s = session();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        s.on_recolor(move |colors| {
            assert_eq!(colors.len(), 4);
            seen.set(seen.get() + 1);
        });
        s.select(&Rect::new(-1.0, -1.0, 1.0, 1.0));
        s.clear();
        assert_eq!(calls.get(), 2);
        assert!(s.current().is_empty());
        assert_eq!(s.values(), &[0.0; 4]);
    }

    #[test]
    fn dimension_mismatch_is_reported_once_at_construction() {
        let err = SelectionSession::new(
            four_points(),
            PairwiseMatrix::zeros(3),
            gray_ramp(),
            ContrastRange::new(0.0, 1.0).expect("valid range"),
            SelectionConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SelectionError::DimensionMismatch {
                points: 4,
                matrix: 3
            }
        );

        let mut s = session();
        assert!(s.replace_points(vec![Point3::default()]).is_err());
        assert_eq!(s.points().len(), 4);
    }
}
