use nalgebra::Point2;
use plot_digitizer_core::{Line, Rect, RgbImageView};
use serde::{Deserialize, Serialize};

use crate::locate::{locate_column, locate_row};
use crate::threshold::{compute_threshold, InkMap};
use crate::ticks::{detect_along_column, detect_along_row, TickParams};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Configuration for [`AxisDetector`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisDetectorParams {
    pub ticks: TickParams,
}

/// Located axes and their ticks, in image pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisDetectionResult {
    /// Horizontal line through the detected X axis row.
    pub x_axis_line: Line,
    /// Vertical line through the detected Y axis column.
    pub y_axis_line: Line,
    /// Ticks on the X axis, ascending in x.
    pub tick_points_x: Vec<Point2<f32>>,
    /// Ticks on the Y axis, ascending in y.
    pub tick_points_y: Vec<Point2<f32>>,
    /// Gray threshold shared by both axes.
    pub threshold: u8,
}

/// Finds the X axis inside one ROI and the Y axis inside another.
///
/// Both regions are binarized with one Otsu threshold taken from the larger
/// region (ties favour the X region). A small region with different contrast
/// may therefore be binarized poorly.
#[derive(Clone, Debug, Default)]
pub struct AxisDetector {
    params: AxisDetectorParams,
}

impl AxisDetector {
    pub fn new(params: AxisDetectorParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &AxisDetectorParams {
        &self.params
    }

    /// Detect both axes. Never fails; out-of-range ROIs are clamped.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image), fields(width = image.width(), height = image.height()))
    )]
    pub fn detect(
        &self,
        image: &RgbImageView<'_>,
        roi_x: Rect,
        roi_y: Rect,
    ) -> AxisDetectionResult {
        let roi_x = roi_x.clamp_to(image.width(), image.height());
        let roi_y = roi_y.clamp_to(image.width(), image.height());

        let threshold_roi = if roi_x.area() >= roi_y.area() {
            roi_x
        } else {
            roi_y
        };
        let threshold = compute_threshold(image, threshold_roi);
        let ink = InkMap::new(*image, threshold);

        let row = locate_row(&ink, roi_x);
        let tick_points_x = detect_along_row(&ink, roi_x, row, &self.params.ticks);

        let col = locate_column(&ink, roi_y);
        let tick_points_y = detect_along_column(&ink, roi_y, col, &self.params.ticks);

        log::debug!(
            "axes: threshold={threshold} row={row} col={col} ticks={}x{}",
            tick_points_x.len(),
            tick_points_y.len()
        );

        AxisDetectionResult {
            x_axis_line: Line::horizontal(row as f32, roi_x.x as f32),
            y_axis_line: Line::vertical(col as f32, roi_y.y as f32),
            tick_points_x,
            tick_points_y,
            threshold,
        }
    }
}
