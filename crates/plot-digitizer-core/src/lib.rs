//! Core types and utilities for extracting data series from plot images.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! decode image files or know about any UI; it works on borrowed pixel
//! buffers and plain points expressed in buffer coordinates.

mod calibration;
mod geometry;
mod image;
mod logger;
mod mask;

pub use calibration::{
    AxisCalibration, CalibrationAxis, CalibrationError, CalibrationInput, CalibrationMapper,
    DataPoint, PixelToData, MIN_CALIBRATION_SPAN,
};
pub use geometry::{normalize_or_zero, point_line_distance, projected_span, Line, Rect};
pub use image::{gray_from_rgb, Color, ImageError, RgbImage, RgbImageView};
pub use mask::{NoMask, PixelMask};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_with_level, DEFAULT_LOG_DIRECTIVES};
