// Copyright 2025 the Brainview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region selection over a synthetic neuron layer, driven the way a viewer
//! would drive it: draw shapes, toggle the view, and probe single neurons.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p brainview_demos --example selection_session`

use std::cell::Cell;
use std::rc::Rc;

use brainview_colormap::{ContrastRange, presets};
use brainview_region::{Point3, Region, ViewState};
use brainview_selection::probe::{
    ActivityProbe, ActivityRecording, PairwiseProbe, nearest_point, value_range,
};
use brainview_selection::{PairwiseMatrix, SelectionConfig, SelectionError, SelectionSession};
use kurbo::Rect;

const GRID: usize = 4;

/// Neurons on a `GRID × GRID` lattice, alternating between two planes.
fn layer() -> Vec<Point3> {
    (0..GRID * GRID)
        .map(|i| {
            let (row, col) = (i / GRID, i % GRID);
            Point3::new((i % 2) as f64 * 2.0, col as f64 * 10.0, row as f64 * 10.0)
        })
        .collect()
}

/// Affinity decaying with lattice distance, negative across planes.
fn affinities(points: &[Point3]) -> Result<PairwiseMatrix, SelectionError> {
    let rows: Vec<Vec<f64>> = points
        .iter()
        .map(|a| {
            points
                .iter()
                .map(|b| {
                    let d = a.xy().distance(b.xy()) / 10.0;
                    let sign = if a.depth == b.depth { 1.0 } else { -1.0 };
                    sign / (1.0 + d)
                })
                .collect()
        })
        .collect();
    PairwiseMatrix::from_rows(&rows)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let points = layer();
    let pairwise = affinities(&points)?;
    let mut session = SelectionSession::new(
        points.clone(),
        pairwise.clone(),
        presets::seismic_alpha(),
        ContrastRange::new(-1.0, 1.0)?,
        SelectionConfig::default(),
    )?;

    let recolors = Rc::new(Cell::new(0_usize));
    let counter = recolors.clone();
    session.on_recolor(move |colors| {
        counter.set(counter.get() + 1);
        log::debug!("host received {} face colors", colors.len());
    });

    session.set_view(ViewState::slice(0.0));
    let lasso = Region::polygon([(-5.0, -5.0), (25.0, -5.0), (-5.0, 25.0)])?;
    let added = session.select(&lasso);
    println!("lasso on plane 0 added {added}: {:?}", session.current());

    session.set_view(ViewState::slice(2.0));
    let added = session.select(&Rect::new(15.0, 15.0, 35.0, 35.0));
    println!("rectangle on plane 2 added {added}: {:?}", session.current());
    println!("aggregated values: {:.3?}", session.values());

    let removed = session.unselect(&Rect::new(15.0, 15.0, 35.0, 35.0));
    println!("unselect removed {removed}: {:?}", session.current());

    session.set_view(ViewState::volume());
    println!(
        "3D view selects nothing: {}",
        session.select(&Rect::new(-100.0, -100.0, 100.0, 100.0))
    );

    session.set_view(ViewState::slice(0.0));
    let shapes = [
        vec![(0.0, 0.0), (12.0, 0.0), (12.0, 12.0), (0.0, 12.0)],
        vec![(18.0, 18.0), (22.0, 18.0), (22.0, 22.0), (18.0, 22.0)],
    ];
    let added = session.reselect_shapes(&shapes)?;
    println!("reselect added {added}: {:?}", session.current());

    session.clear();
    println!("cleared; {} recolors delivered to the host", recolors.get());

    let click = Point3::new(1.0, 21.0, 9.0);
    let probe = PairwiseProbe::new(
        points.len(),
        pairwise,
        presets::seismic_alpha(),
        ContrastRange::new(-1.0, 1.0)?,
    )?;
    if let Some((picked, colors)) = probe.pick(&points, click) {
        println!("pairwise probe picked {picked}, colored {}", colors.len());
    }

    let frames = 5;
    let activity: Vec<f64> = (0..frames * points.len())
        .map(|k| ((k / points.len()) as f64 * 0.5 + (k % points.len()) as f64).sin())
        .collect();
    let recording = ActivityRecording::new(points.len(), activity)?.with_label("dF/F");
    let mut activity_probe = ActivityProbe::new(points.len(), vec![recording])?;
    if let Some(picked) = nearest_point(&points, click) {
        if let Some(traces) = activity_probe.pick(picked) {
            println!(
                "activity probe picked {picked}: {} trace(s), range {:?}",
                traces.len(),
                value_range(&traces)
            );
        }
    }
    Ok(())
}
