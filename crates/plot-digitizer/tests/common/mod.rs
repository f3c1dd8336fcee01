#![allow(dead_code)]

use nalgebra::Point2;
use plot_digitizer::core::{AxisCalibration, CalibrationInput, Color, RgbImage};
use plot_digitizer::{DigitizeJob, DigitizerParams, Rect};

pub const CURVE: Color = Color::new(220, 30, 30);
const BLACK: Color = Color::new(0, 0, 0);

/// Curve row (top of a 2 px band) at column `x`, for `x` in `30..=185`.
pub fn curve_y(x: i64) -> i64 {
    120 - (x - 30) / 2
}

/// 200×200 chart: X axis on row 150 with ticks at x = 20, 100, 180
/// (data 0, 8, 16), Y axis on column 20 with ticks at y = 150, 90, 20
/// (data 0, 6, 13), and a red descending curve two pixels thick.
pub fn synthetic_chart() -> RgbImage {
    let mut img = RgbImage::filled(200, 200, Color::new(255, 255, 255));
    for x in 20..=190 {
        img.put(x, 150, BLACK);
    }
    for x in [20, 100, 180] {
        for y in 151..=158 {
            img.put(x, y, BLACK);
        }
    }
    for y in 10..=150 {
        img.put(20, y, BLACK);
    }
    for y in [20, 90, 150] {
        for x in 12..=19 {
            img.put(x, y, BLACK);
        }
    }
    for x in 30..=185 {
        let y = curve_y(x);
        img.put(x, y, CURVE);
        img.put(x, y + 1, CURVE);
    }
    img
}

pub fn chart_job() -> DigitizeJob {
    DigitizeJob {
        crop: None,
        axis_roi_x: Rect::new(0, 130, 200, 40),
        axis_roi_y: Rect::new(0, 0, 40, 170),
        calibration: CalibrationInput {
            x: AxisCalibration::new(Point2::new(20.0, 150.0), Point2::new(180.0, 150.0), 0.0, 16.0),
            y: AxisCalibration::new(Point2::new(20.0, 150.0), Point2::new(20.0, 20.0), 0.0, 13.0),
        },
        seeds: vec![
            Point2::new(150.0, curve_y(150) as f32),
            Point2::new(60.0, curve_y(60) as f32),
            Point2::new(100.0, curve_y(100) as f32),
        ],
        color: None,
        reverse_x: false,
        params: DigitizerParams::default(),
    }
}
