//! Pixel → data calibration from two reference points per axis.
//!
//! Each axis is an independent 1-D projection: the pixel offset from the
//! first reference point is projected onto the unit direction between the two
//! reference points and scaled to data units. Axes need not be aligned with
//! the pixel grid, but there is no coupling between X and Y (no shear fit).

use nalgebra::{Matrix2, Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::geometry::{normalize_or_zero, projected_span};

/// Smallest accepted projected distance between an axis's two reference points.
pub const MIN_CALIBRATION_SPAN: f64 = 1e-6;

/// A point in data space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps a pixel-space point to data space.
pub trait PixelToData {
    fn map(&self, p: Point2<f32>) -> DataPoint;
}

impl<F> PixelToData for F
where
    F: Fn(Point2<f32>) -> DataPoint,
{
    fn map(&self, p: Point2<f32>) -> DataPoint {
        self(p)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalibrationAxis {
    X,
    Y,
}

impl std::fmt::Display for CalibrationAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CalibrationAxis::X => f.write_str("x"),
            CalibrationAxis::Y => f.write_str("y"),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CalibrationError {
    #[error("degenerate {axis} calibration: reference points span {span:e} px")]
    Degenerate { axis: CalibrationAxis, span: f64 },
}

/// Two reference pixels on one axis and the data values they represent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisCalibration {
    pub px_a: Point2<f32>,
    pub px_b: Point2<f32>,
    pub value_a: f64,
    pub value_b: f64,
}

impl AxisCalibration {
    pub fn new(px_a: Point2<f32>, px_b: Point2<f32>, value_a: f64, value_b: f64) -> Self {
        Self {
            px_a,
            px_b,
            value_a,
            value_b,
        }
    }
}

/// The four operator-picked reference points and their values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationInput {
    pub x: AxisCalibration,
    pub y: AxisCalibration,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
struct AxisProjection {
    origin: Point2<f64>,
    dir: Vector2<f64>,
    scale: f64,
    offset: f64,
}

impl AxisProjection {
    fn build(cal: &AxisCalibration, axis: CalibrationAxis) -> Result<Self, CalibrationError> {
        let a = to_f64(cal.px_a);
        let b = to_f64(cal.px_b);
        let dir = normalize_or_zero(b - a);
        let span = projected_span(a, b);
        if span.abs() < MIN_CALIBRATION_SPAN {
            return Err(CalibrationError::Degenerate { axis, span });
        }
        Ok(Self {
            origin: a,
            dir,
            scale: (cal.value_b - cal.value_a) / span,
            offset: cal.value_a,
        })
    }

    #[inline]
    fn eval(&self, p: Point2<f64>) -> f64 {
        self.offset + self.scale * (p - self.origin).dot(&self.dir)
    }
}

/// Immutable pixel → data transform. Rebuild it whenever any input changes.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalibrationMapper {
    x: AxisProjection,
    y: AxisProjection,
}

impl CalibrationMapper {
    pub fn build(input: &CalibrationInput) -> Result<Self, CalibrationError> {
        let x = AxisProjection::build(&input.x, CalibrationAxis::X)?;
        let y = AxisProjection::build(&input.y, CalibrationAxis::Y)?;
        log::debug!(
            "calibration: sx={:.6} dir_x=({:.4},{:.4}) sy={:.6} dir_y=({:.4},{:.4})",
            x.scale,
            x.dir.x,
            x.dir.y,
            y.scale,
            y.dir.x,
            y.dir.y
        );
        Ok(Self { x, y })
    }

    /// Data units per pixel along the X and Y calibration directions.
    pub fn scales(&self) -> [f64; 2] {
        [self.x.scale, self.y.scale]
    }

    /// Pixel position of a data point, the inverse of [`PixelToData::map`].
    ///
    /// Returns `None` when both calibration directions are parallel, or when
    /// a scale is zero (all reference values equal).
    pub fn data_to_pixel(&self, q: DataPoint) -> Option<Point2<f32>> {
        if self.x.scale == 0.0 || self.y.scale == 0.0 {
            return None;
        }
        // dir_x · p = (X - x1)/sx + dir_x · origin_x, likewise for y.
        let rhs = Vector2::new(
            (q.x - self.x.offset) / self.x.scale + self.x.dir.dot(&self.x.origin.coords),
            (q.y - self.y.offset) / self.y.scale + self.y.dir.dot(&self.y.origin.coords),
        );
        let m = Matrix2::new(
            self.x.dir.x,
            self.x.dir.y, //
            self.y.dir.x,
            self.y.dir.y,
        );
        if m.determinant().abs() < 1e-12 {
            return None;
        }
        let p = m.lu().solve(&rhs)?;
        Some(Point2::new(p.x as f32, p.y as f32))
    }
}

impl PixelToData for CalibrationMapper {
    #[inline]
    fn map(&self, p: Point2<f32>) -> DataPoint {
        let p = to_f64(p);
        DataPoint::new(self.x.eval(p), self.y.eval(p))
    }
}

#[inline]
fn to_f64(p: Point2<f32>) -> Point2<f64> {
    Point2::new(p.x as f64, p.y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn reference_input() -> CalibrationInput {
        CalibrationInput {
            x: AxisCalibration::new(Point2::new(0.0, 100.0), Point2::new(100.0, 100.0), 0.0, 10.0),
            y: AxisCalibration::new(Point2::new(0.0, 100.0), Point2::new(0.0, 0.0), 0.0, 1.0),
        }
    }

    #[test]
    fn maps_grid_aligned_axes() {
        let mapper = CalibrationMapper::build(&reference_input()).expect("mapper");
        let q = mapper.map(Point2::new(50.0, 50.0));
        assert_relative_eq!(q.x, 5.0, epsilon = 1e-12);
        assert_relative_eq!(q.y, 0.5, epsilon = 1e-12);

        let origin = mapper.map(Point2::new(0.0, 100.0));
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(origin.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn coincident_points_are_degenerate() {
        let mut input = reference_input();
        input.x.px_b = input.x.px_a;
        let err = CalibrationMapper::build(&input).unwrap_err();
        assert!(matches!(
            err,
            CalibrationError::Degenerate {
                axis: CalibrationAxis::X,
                ..
            }
        ));

        let mut input = reference_input();
        input.y.px_b = Point2::new(0.0, 100.0 + 1e-9);
        assert!(matches!(
            CalibrationMapper::build(&input),
            Err(CalibrationError::Degenerate {
                axis: CalibrationAxis::Y,
                ..
            })
        ));
    }

    #[test]
    fn scale_divides_by_projected_span() {
        let a = Point2::new(2.0f32, 7.0);
        let b = Point2::new(14.0f32, 12.0);
        let mut input = reference_input();
        input.x = AxisCalibration::new(a, b, 1.0, 27.0);
        let mapper = CalibrationMapper::build(&input).expect("mapper");
        let span = projected_span(to_f64(a), to_f64(b));
        assert_relative_eq!(span, 13.0, epsilon = 1e-12);
        assert_relative_eq!(mapper.scales()[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(mapper.map(b).x, 27.0, epsilon = 1e-9);
    }

    #[test]
    fn rotated_axes_project_independently() {
        // X axis along the (1, 1) diagonal, 10 units over sqrt(2)*50 px.
        let input = CalibrationInput {
            x: AxisCalibration::new(Point2::new(0.0, 0.0), Point2::new(50.0, 50.0), 0.0, 10.0),
            y: AxisCalibration::new(Point2::new(0.0, 0.0), Point2::new(-50.0, 50.0), 0.0, 10.0),
        };
        let mapper = CalibrationMapper::build(&input).expect("mapper");
        let q = mapper.map(Point2::new(25.0, 25.0));
        assert_relative_eq!(q.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(q.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn descending_values_keep_sign() {
        let input = CalibrationInput {
            x: AxisCalibration::new(Point2::new(0.0, 0.0), Point2::new(100.0, 0.0), 10.0, 0.0),
            ..reference_input()
        };
        let mapper = CalibrationMapper::build(&input).expect("mapper");
        assert_relative_eq!(mapper.map(Point2::new(25.0, 0.0)).x, 7.5, epsilon = 1e-12);
        assert!(mapper.scales()[0] < 0.0);
    }

    #[test]
    fn data_to_pixel_inverts_map() {
        let mapper = CalibrationMapper::build(&reference_input()).expect("mapper");
        for p in [
            Point2::new(50.0_f32, 50.0),
            Point2::new(13.0, 77.0),
            Point2::new(-20.0, 140.0),
        ] {
            let back = mapper.data_to_pixel(mapper.map(p)).expect("invertible");
            assert_relative_eq!(back.x, p.x, epsilon = 1e-3);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-3);
        }
    }

    #[test]
    fn parallel_axes_have_no_inverse() {
        let input = CalibrationInput {
            x: AxisCalibration::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 0.0, 1.0),
            y: AxisCalibration::new(Point2::new(0.0, 5.0), Point2::new(10.0, 5.0), 0.0, 1.0),
        };
        let mapper = CalibrationMapper::build(&input).expect("mapper");
        assert!(mapper.data_to_pixel(DataPoint::new(0.5, 0.5)).is_none());
    }

    #[test]
    fn closures_are_mappers() {
        let double_x = |p: Point2<f32>| DataPoint::new(2.0 * p.x as f64, p.y as f64);
        assert_eq!(double_x.map(Point2::new(3.0, 1.0)), DataPoint::new(6.0, 1.0));
    }
}
