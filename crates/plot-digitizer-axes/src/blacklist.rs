use nalgebra::Point2;
use plot_digitizer_core::{Line, PixelMask};
use serde::{Deserialize, Serialize};

use crate::detector::AxisDetectionResult;

/// Exclusion distances around detected axis structure, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlacklistParams {
    /// Pixels closer than this to either axis line are excluded.
    pub axis_band: f32,
    /// Pixels closer than this to any tick point are excluded.
    pub tick_radius: f32,
}

impl Default for BlacklistParams {
    fn default() -> Self {
        Self {
            axis_band: 3.0,
            tick_radius: 16.0,
        }
    }
}

/// Marks pixels that belong to axes or ticks rather than to a curve.
#[derive(Clone, Debug, PartialEq)]
pub struct BlacklistMask {
    x_axis: Line,
    y_axis: Line,
    ticks: Vec<Point2<f32>>,
    axis_band: f32,
    tick_radius_sq: f32,
}

impl BlacklistMask {
    pub fn new(
        x_axis: Line,
        y_axis: Line,
        ticks_x: &[Point2<f32>],
        ticks_y: &[Point2<f32>],
        axis_band: f32,
        tick_radius: f32,
    ) -> Self {
        let mut ticks = Vec::with_capacity(ticks_x.len() + ticks_y.len());
        ticks.extend_from_slice(ticks_x);
        ticks.extend_from_slice(ticks_y);
        Self {
            x_axis,
            y_axis,
            ticks,
            axis_band,
            tick_radius_sq: tick_radius * tick_radius,
        }
    }

    pub fn from_detection(detection: &AxisDetectionResult, params: &BlacklistParams) -> Self {
        Self::new(
            detection.x_axis_line,
            detection.y_axis_line,
            &detection.tick_points_x,
            &detection.tick_points_y,
            params.axis_band,
            params.tick_radius,
        )
    }
}

impl PixelMask for BlacklistMask {
    fn contains(&self, p: Point2<f32>) -> bool {
        if self.x_axis.distance(p) < self.axis_band || self.y_axis.distance(p) < self.axis_band {
            return true;
        }
        self.ticks
            .iter()
            .any(|t| (p - t).norm_squared() < self.tick_radius_sq)
    }
}
