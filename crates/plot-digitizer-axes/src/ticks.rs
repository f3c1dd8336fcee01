//! Tick mark detection along a located axis.
//!
//! A pixel on the axis is a tick candidate when ink also appears a few pixels
//! away from the axis on either side (a protrusion). Neighbouring candidates
//! belong to the same tick and are merged by 1-D clustering.

use nalgebra::Point2;
use plot_digitizer_core::Rect;
use serde::{Deserialize, Serialize};

use crate::threshold::InkMap;

/// Protrusion search window and cluster merge distance, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickParams {
    /// Nearest offset from the axis probed for tick ink.
    pub min_offset: u32,
    /// Farthest offset from the axis probed for tick ink (inclusive).
    pub max_offset: u32,
    /// Candidates closer than this merge into one tick.
    pub merge_distance: f32,
}

impl Default for TickParams {
    fn default() -> Self {
        Self {
            min_offset: 3,
            max_offset: 14,
            merge_distance: 4.0,
        }
    }
}

/// Sort `values` and merge neighbours whose gap is `<= merge_distance`.
///
/// Returns the mean of every cluster in ascending order.
pub fn cluster_1d(values: &[f32], merge_distance: f32) -> Vec<f32> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);

    let mut centers = Vec::new();
    let mut sum = 0f64;
    let mut n = 0usize;
    let mut last = f32::NAN;
    for v in sorted {
        if n > 0 && v - last > merge_distance {
            centers.push((sum / n as f64) as f32);
            sum = 0.0;
            n = 0;
        }
        sum += v as f64;
        n += 1;
        last = v;
    }
    if n > 0 {
        centers.push((sum / n as f64) as f32);
    }
    centers
}

fn protrudes(ink: &InkMap<'_>, params: &TickParams, probe: impl Fn(i64) -> (i64, i64)) -> bool {
    (params.min_offset..=params.max_offset).any(|d| {
        let d = d as i64;
        let (xa, ya) = probe(-d);
        let (xb, yb) = probe(d);
        ink.is_ink(xa, ya) || ink.is_ink(xb, yb)
    })
}

/// Ticks crossing the horizontal axis at `axis_row`, sorted by x.
pub fn detect_along_row(
    ink: &InkMap<'_>,
    roi: Rect,
    axis_row: i32,
    params: &TickParams,
) -> Vec<Point2<f32>> {
    let r = roi.clamp_to(ink.image().width(), ink.image().height());
    let y = axis_row as i64;
    let candidates: Vec<f32> = (r.x..r.right())
        .filter(|&x| {
            let x = x as i64;
            ink.is_ink(x, y) && protrudes(ink, params, |d| (x, y + d))
        })
        .map(|x| x as f32)
        .collect();

    let ticks: Vec<Point2<f32>> = cluster_1d(&candidates, params.merge_distance)
        .into_iter()
        .map(|x| Point2::new(x, axis_row as f32))
        .collect();
    log::debug!(
        "x axis: {} tick candidates -> {} ticks",
        candidates.len(),
        ticks.len()
    );
    ticks
}

/// Ticks crossing the vertical axis at `axis_col`, sorted by y.
pub fn detect_along_column(
    ink: &InkMap<'_>,
    roi: Rect,
    axis_col: i32,
    params: &TickParams,
) -> Vec<Point2<f32>> {
    let r = roi.clamp_to(ink.image().width(), ink.image().height());
    let x = axis_col as i64;
    let candidates: Vec<f32> = (r.y..r.bottom())
        .filter(|&y| {
            let y = y as i64;
            ink.is_ink(x, y) && protrudes(ink, params, |d| (x + d, y))
        })
        .map(|y| y as f32)
        .collect();

    let ticks: Vec<Point2<f32>> = cluster_1d(&candidates, params.merge_distance)
        .into_iter()
        .map(|y| Point2::new(axis_col as f32, y))
        .collect();
    log::debug!(
        "y axis: {} tick candidates -> {} ticks",
        candidates.len(),
        ticks.len()
    );
    ticks
}
