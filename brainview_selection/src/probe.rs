// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-neuron probes: pick the neuron nearest to a click, then show its
//! pairwise row or its activity traces.
//!
//! ```rust
//! use brainview_region::Point3;
//! use brainview_selection::probe::{ActivityProbe, ActivityRecording, nearest_point, value_range};
//!
//! let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 10.0, 0.0)];
//! // Two frames of two neurons.
//! let calcium = ActivityRecording::new(2, vec![0.1, 2.0, 0.3, 4.0])?.with_label("dF/F");
//! let mut probe = ActivityProbe::new(points.len(), vec![calcium])?;
//!
//! let picked = nearest_point(&points, Point3::new(0.0, 9.0, 1.0)).expect("non-empty");
//! let traces = probe.pick(picked).expect("in range");
//! assert_eq!(traces[0].values, vec![2.0, 4.0]);
//! assert_eq!(value_range(&traces), Some((2.0, 4.0)));
//! # Ok::<(), brainview_selection::SelectionError>(())
//! ```

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use brainview_colormap::{Colormap, ContrastRange, Rgba, colorize};
use brainview_region::Point3;
use kurbo::Point;

use crate::{PairwiseMatrix, SelectionError};

/// Index of the point closest to `position`, by squared Euclidean distance.
///
/// Ties resolve to the lowest index; `None` for an empty set.
pub fn nearest_point(points: &[Point3], position: Point3) -> Option<usize> {
    nearest_by(points.iter().map(|p| Some(p.distance_squared(position))))
}

/// Index of the centroid closest to `position`, skipping empty slots.
pub fn nearest_centroid(centroids: &[Option<Point>], position: Point) -> Option<usize> {
    nearest_by(centroids.iter().map(|c| c.map(|c| (c - position).hypot2())))
}

fn nearest_by(distances: impl Iterator<Item = Option<f64>>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, d) in distances.enumerate() {
        let Some(d) = d else { continue };
        if best.is_none_or(|(_, b)| d < b) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Center of mass of each neuron's contour vertices.
///
/// `contours` pairs a neuron id with one outline; a neuron may own several
/// outlines. Slot `id` of the result holds the mean of all that neuron's
/// vertices, or `None` when no vertices were given for it.
pub fn centroids<'a>(
    contours: impl IntoIterator<Item = (usize, &'a [Point])>,
) -> Vec<Option<Point>> {
    let mut sums: Vec<(f64, f64, usize)> = Vec::new();
    for (id, outline) in contours {
        if sums.len() <= id {
            sums.resize(id + 1, (0.0, 0.0, 0));
        }
        let slot = &mut sums[id];
        for v in outline {
            slot.0 += v.x;
            slot.1 += v.y;
            slot.2 += 1;
        }
    }
    sums.into_iter()
        .map(|(x, y, n)| (n > 0).then(|| Point::new(x / n as f64, y / n as f64)))
        .collect()
}

/// `n` points in `base`, with `index` in `highlight`.
///
/// An out-of-range `index` highlights nothing.
pub fn single_highlight(n: usize, index: usize, base: Rgba, highlight: Rgba) -> Vec<Rgba> {
    let mut colors = vec![base; n];
    if let Some(c) = colors.get_mut(index) {
        *c = highlight;
    }
    colors
}

/// One color per shape: `highlight` where the shape's neuron id is `picked`,
/// `base` elsewhere.
///
/// A neuron drawn as several contours has all of them highlighted.
pub fn highlight_ids(ids: &[usize], picked: usize, base: Rgba, highlight: Rgba) -> Vec<Rgba> {
    ids.iter()
        .map(|&id| if id == picked { highlight } else { base })
        .collect()
}

/// Colors a point layer by the pairwise row of a picked neuron.
#[derive(Clone, Debug)]
pub struct PairwiseProbe {
    pairwise: PairwiseMatrix,
    cmap: Colormap,
    range: ContrastRange,
    highlight: Rgba,
}

impl PairwiseProbe {
    /// A probe over `point_count` neurons. The picked neuron is highlighted
    /// in red.
    pub fn new(
        point_count: usize,
        pairwise: PairwiseMatrix,
        cmap: Colormap,
        range: ContrastRange,
    ) -> Result<Self, SelectionError> {
        if point_count != pairwise.size() {
            return Err(SelectionError::DimensionMismatch {
                points: point_count,
                matrix: pairwise.size(),
            });
        }
        Ok(Self {
            pairwise,
            cmap,
            range,
            highlight: Rgba::RED,
        })
    }

    /// Replace the highlight color.
    #[must_use]
    pub fn with_highlight(mut self, highlight: Rgba) -> Self {
        self.highlight = highlight;
        self
    }

    /// Colors for every neuron given that `index` was picked, or `None` if
    /// `index` is out of range.
    pub fn colors_for(&self, index: usize) -> Option<Vec<Rgba>> {
        if index >= self.pairwise.size() {
            return None;
        }
        let mut colors = colorize(self.pairwise.row(index), &self.cmap, self.range);
        colors[index] = self.highlight;
        log::debug!("pairwise probe: picked neuron {index}");
        Some(colors)
    }

    /// Pick the neuron nearest to `position` and color by its row.
    pub fn pick(&self, points: &[Point3], position: Point3) -> Option<(usize, Vec<Rgba>)> {
        let index = nearest_point(points, position)?;
        Some((index, self.colors_for(index)?))
    }
}

/// A time series of per-neuron activity, frame-major (`frames × neurons`).
#[derive(Clone, Debug, PartialEq)]
pub struct ActivityRecording {
    neurons: usize,
    values: Vec<f64>,
    label: Option<String>,
}

impl ActivityRecording {
    /// A recording from frame-major values, `neurons` per frame.
    pub fn new(neurons: usize, values: Vec<f64>) -> Result<Self, SelectionError> {
        let ragged = if neurons == 0 {
            !values.is_empty()
        } else {
            values.len() % neurons != 0
        };
        if ragged {
            return Err(SelectionError::RaggedActivity {
                len: values.len(),
                neurons,
            });
        }
        Ok(Self {
            neurons,
            values,
            label: None,
        })
    }

    /// Attach a legend label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Legend label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Neurons per frame.
    pub fn neurons(&self) -> usize {
        self.neurons
    }

    /// Number of frames.
    pub fn frames(&self) -> usize {
        if self.neurons == 0 {
            0
        } else {
            self.values.len() / self.neurons
        }
    }

    /// Activity of every neuron in frame `t`.
    ///
    /// # Panics
    ///
    /// Panics if `t` is out of range.
    pub fn frame(&self, t: usize) -> &[f64] {
        &self.values[t * self.neurons..(t + 1) * self.neurons]
    }

    /// Activity of neuron `index` over time, or `None` if out of range.
    pub fn trace(&self, index: usize) -> Option<Vec<f64>> {
        if index >= self.neurons {
            return None;
        }
        Some(
            self.values
                .chunks_exact(self.neurons)
                .map(|frame| frame[index])
                .collect(),
        )
    }
}

/// One plotted line: a neuron's activity in one recording.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace<'a> {
    /// Label of the recording it came from.
    pub label: Option<&'a str>,
    /// Activity per frame.
    pub values: Vec<f64>,
}

/// The joint min/max of all finite trace values, used to rescale the plot.
pub fn value_range(traces: &[Trace<'_>]) -> Option<(f64, f64)> {
    traces
        .iter()
        .flat_map(|t| t.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Shows the activity traces of the picked neuron across recordings.
#[derive(Clone, Debug)]
pub struct ActivityProbe {
    recordings: Vec<ActivityRecording>,
    point_count: usize,
    picked: Option<usize>,
}

impl ActivityProbe {
    /// A probe over `point_count` neurons; neuron 0 starts picked when there
    /// is one.
    ///
    /// Every recording must cover exactly `point_count` neurons.
    pub fn new(
        point_count: usize,
        recordings: Vec<ActivityRecording>,
    ) -> Result<Self, SelectionError> {
        if let Some((recording, r)) = recordings
            .iter()
            .enumerate()
            .find(|(_, r)| r.neurons() != point_count)
        {
            return Err(SelectionError::ActivityMismatch {
                recording,
                neurons: r.neurons(),
                expected: point_count,
            });
        }
        Ok(Self {
            recordings,
            point_count,
            picked: (point_count > 0).then_some(0),
        })
    }

    /// The recordings, in legend order.
    pub fn recordings(&self) -> &[ActivityRecording] {
        &self.recordings
    }

    /// The picked neuron.
    pub fn picked(&self) -> Option<usize> {
        self.picked
    }

    /// Pick neuron `index` and return its traces, one per recording.
    ///
    /// An out-of-range index leaves the pick unchanged and returns `None`.
    pub fn pick(&mut self, index: usize) -> Option<Vec<Trace<'_>>> {
        if index >= self.point_count {
            return None;
        }
        self.picked = Some(index);
        log::debug!("activity probe: picked neuron {index}");
        Some(self.traces_for(index))
    }

    /// Traces of the picked neuron.
    pub fn traces(&self) -> Vec<Trace<'_>> {
        self.picked.map(|i| self.traces_for(i)).unwrap_or_default()
    }

    /// Point colors: white, with the picked neuron red.
    pub fn colors(&self) -> Vec<Rgba> {
        match self.picked {
            Some(i) => single_highlight(self.point_count, i, Rgba::WHITE, Rgba::RED),
            None => vec![Rgba::WHITE; self.point_count],
        }
    }

    fn traces_for(&self, index: usize) -> Vec<Trace<'_>> {
        self.recordings
            .iter()
            .filter_map(|r| {
                Some(Trace {
                    label: r.label(),
                    values: r.trace(index)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_point_prefers_lowest_index_on_ties() {
        let points = [
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -1.0, 0.0),
            Point3::new(0.0, 5.0, 5.0),
        ];
        assert_eq!(nearest_point(&points, Point3::new(0.0, 0.0, 0.0)), Some(0));
        assert_eq!(nearest_point(&points, Point3::new(0.0, 4.0, 4.0)), Some(2));
        assert_eq!(nearest_point(&[], Point3::default()), None);
    }

    #[test]
    fn centroids_group_by_neuron() {
        let a = [Point::new(0.0, 0.0), Point::new(2.0, 0.0)];
        let b = [Point::new(2.0, 2.0)];
        let c = [Point::new(10.0, 10.0), Point::new(12.0, 10.0)];
        let coms = centroids([(0, &a[..]), (0, &b[..]), (2, &c[..])]);
        assert_eq!(coms.len(), 3);
        assert_eq!(coms[0], Some(Point::new(4.0 / 3.0, 2.0 / 3.0)));
        assert_eq!(coms[1], None);
        assert_eq!(coms[2], Some(Point::new(11.0, 10.0)));
        assert_eq!(nearest_centroid(&coms, Point::new(9.0, 9.0)), Some(2));
        assert_eq!(nearest_centroid(&[None], Point::ZERO), None);
    }

    #[test]
    fn every_contour_of_the_picked_neuron_is_highlighted() {
        let ids = [0, 2, 1, 2, 3];
        assert_eq!(
            highlight_ids(&ids, 2, Rgba::WHITE, Rgba::RED),
            vec![Rgba::WHITE, Rgba::RED, Rgba::WHITE, Rgba::RED, Rgba::WHITE]
        );
        assert!(
            highlight_ids(&ids, 9, Rgba::WHITE, Rgba::RED)
                .iter()
                .all(|&c| c == Rgba::WHITE),
            "unknown id highlights nothing"
        );
        assert!(highlight_ids(&[], 0, Rgba::WHITE, Rgba::RED).is_empty());
    }

    #[test]
    fn pairwise_probe_colors_by_row() {
        let pairwise =
            PairwiseMatrix::from_rows(&[[1.0, 0.0, 0.5], [0.0, 1.0, 0.25], [0.5, 0.25, 1.0]])
                .expect("square");
        let cmap = Colormap::new("ramp", vec![Rgba::TRANSPARENT, Rgba::WHITE]).expect("entries");
        let range = ContrastRange::new(0.0, 1.0).expect("valid range");
        let probe = PairwiseProbe::new(3, pairwise, cmap.clone(), range).expect("matching size");

        let colors = probe.colors_for(2).expect("in range");
        assert_eq!(colors[2], Rgba::RED);
        assert_eq!(colors[0], cmap.map(0.5));
        assert_eq!(colors[1], cmap.map(0.25));
        assert!(probe.colors_for(3).is_none());

        let points = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 5.0, 0.0),
            Point3::new(0.0, 10.0, 0.0),
        ];
        let (picked, colors) = probe
            .with_highlight(Rgba::LIGHT_BLUE)
            .pick(&points, Point3::new(0.0, 4.0, 1.0))
            .expect("non-empty");
        assert_eq!(picked, 1);
        assert_eq!(colors[1], Rgba::LIGHT_BLUE);
    }

    #[test]
    fn pairwise_probe_checks_dimensions() {
        let err = PairwiseProbe::new(
            2,
            PairwiseMatrix::zeros(3),
            Colormap::new("c", vec![Rgba::WHITE]).expect("entry"),
            ContrastRange::new(0.0, 1.0).expect("valid range"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            SelectionError::DimensionMismatch {
                points: 2,
                matrix: 3
            }
        );
    }

    #[test]
    fn recordings_validate_shape() {
        assert!(ActivityRecording::new(3, vec![0.0; 7]).is_err());
        assert!(ActivityRecording::new(0, vec![1.0]).is_err());
        let empty = ActivityRecording::new(0, vec![]).expect("empty is fine");
        assert_eq!(empty.frames(), 0);

        let r = ActivityRecording::new(2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).expect("3 frames");
        assert_eq!(r.frames(), 3);
        assert_eq!(r.frame(1), &[3.0, 4.0]);
        assert_eq!(r.trace(1), Some(vec![2.0, 4.0, 6.0]));
        assert_eq!(r.trace(2), None);
    }

    #[test]
    fn activity_probe_picks_traces_across_recordings() {
        let raw = ActivityRecording::new(2, vec![1.0, 10.0, 2.0, 20.0])
            .expect("2 frames")
            .with_label("raw");
        let smooth = ActivityRecording::new(2, vec![1.5, 15.0, 1.5, 15.0]).expect("2 frames");
        let mut probe = ActivityProbe::new(2, vec![raw, smooth]).expect("matching neurons");
        assert_eq!(probe.picked(), Some(0));
        assert_eq!(probe.traces()[0].values, vec![1.0, 2.0]);

        let traces = probe.pick(1).expect("in range");
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].label, Some("raw"));
        assert_eq!(traces[1].label, None);
        assert_eq!(value_range(&traces), Some((10.0, 20.0)));

        assert!(probe.pick(2).is_none());
        assert_eq!(probe.picked(), Some(1));
        assert_eq!(probe.colors(), vec![Rgba::WHITE, Rgba::RED]);
    }

    #[test]
    fn activity_probe_rejects_mismatched_recordings() {
        let r = ActivityRecording::new(3, vec![0.0; 3]).expect("1 frame");
        assert_eq!(
            ActivityProbe::new(2, vec![r]).unwrap_err(),
            SelectionError::ActivityMismatch {
                recording: 0,
                neurons: 3,
                expected: 2
            }
        );
        let none = ActivityProbe::new(0, vec![]).expect("empty layer");
        assert_eq!(none.picked(), None);
        assert!(none.traces().is_empty());
        assert_eq!(value_range(&[]), None);
        assert_eq!(single_highlight(2, 5, Rgba::WHITE, Rgba::RED), vec![Rgba::WHITE; 2]);
    }
}
