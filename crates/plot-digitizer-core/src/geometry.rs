use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// Axis-aligned pixel region, `[x, x + w) × [y, y + h)`.
///
/// Operator-supplied rects may be out of range or empty; consumers call
/// [`Rect::clamp_to`] before touching pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Clamp into a `width × height` raster.
    ///
    /// The result always satisfies `0 <= x`, `0 <= y`, `x + w <= width`,
    /// `y + h <= height`, `w >= 1` and `h >= 1`. Zero-sized bounds are
    /// treated as 1×1.
    pub fn clamp_to(&self, width: usize, height: usize) -> Rect {
        let (x, w) = clamp_span(self.x, self.w, width);
        let (y, h) = clamp_span(self.y, self.h, height);
        Rect { x, y, w, h }
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.w.max(0) as i64 * self.h.max(0) as i64
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }
}

fn clamp_span(start: i32, len: i32, bound: usize) -> (i32, i32) {
    let bound = bound.clamp(1, i32::MAX as usize) as i64;
    let start = start as i64;
    let s = start.clamp(0, bound - 1);
    let e = (start + len as i64).clamp(s + 1, bound);
    (s as i32, (e - s) as i32)
}

/// Infinite line through `p` with direction `v` (not necessarily unit).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub p: Point2<f32>,
    pub v: Vector2<f32>,
}

impl Line {
    pub fn new(p: Point2<f32>, v: Vector2<f32>) -> Self {
        Self { p, v }
    }

    pub fn horizontal(y: f32, x0: f32) -> Self {
        Self::new(Point2::new(x0, y), Vector2::new(1.0, 0.0))
    }

    pub fn vertical(x: f32, y0: f32) -> Self {
        Self::new(Point2::new(x, y0), Vector2::new(0.0, 1.0))
    }

    #[inline]
    pub fn distance(&self, q: Point2<f32>) -> f32 {
        point_line_distance(q, self)
    }
}

/// Unit vector along `v`, or zero when `v` has no length.
#[inline]
pub fn normalize_or_zero(v: Vector2<f64>) -> Vector2<f64> {
    v.try_normalize(0.0).unwrap_or_else(Vector2::zeros)
}

/// Length of `b - a` projected on its own unit direction.
#[inline]
pub fn projected_span(a: Point2<f64>, b: Point2<f64>) -> f64 {
    let d = b - a;
    d.dot(&normalize_or_zero(d))
}

/// Perpendicular distance from `q` to `line`.
///
/// A line with a zero direction degenerates to its anchor point.
pub fn point_line_distance(q: Point2<f32>, line: &Line) -> f32 {
    let d = q - line.p;
    match line.v.try_normalize(0.0) {
        Some(u) => (d.x * u.y - d.y * u.x).abs(),
        None => d.norm(),
    }
}
