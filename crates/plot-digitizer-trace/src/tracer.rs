use nalgebra::Point2;
use plot_digitizer_core::{Color, PixelMask, RgbImageView};
use serde::{Deserialize, Serialize};

use crate::runs::{runs_in_column, RepresentativeMode};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Tracing configuration.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceParams {
    /// Maximum Euclidean RGB distance (exclusive) of a matching pixel.
    pub color_threshold: f32,
    /// Largest accepted |y - y_predicted| between neighbouring columns.
    pub max_jump: f32,
    /// Run reduction mode.
    pub mode: RepresentativeMode,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            color_threshold: 60.0,
            max_jump: 10.0,
            mode: RepresentativeMode::Centerline,
        }
    }
}

/// The three operator-picked points on the target curve.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Seeds(pub [Point2<f32>; 3]);

impl Seeds {
    pub fn new(a: Point2<f32>, b: Point2<f32>, c: Point2<f32>) -> Self {
        Self([a, b, c])
    }

    /// `None` unless exactly three points are given.
    pub fn from_slice(points: &[Point2<f32>]) -> Option<Self> {
        let arr: [Point2<f32>; 3] = points.try_into().ok()?;
        Some(Self(arr))
    }

    /// Seeds ordered by ascending x, then y; pick order does not matter.
    pub fn sorted_by_x(&self) -> [Point2<f32>; 3] {
        let mut s = self.0;
        s.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        s
    }
}

fn seed_pixel(image: &RgbImageView<'_>, p: Point2<f32>) -> (usize, usize) {
    (
        clamp_index(p.x, image.width()),
        clamp_index(p.y, image.height()),
    )
}

#[inline]
fn clamp_index(v: f32, len: usize) -> usize {
    let max = len.saturating_sub(1) as f32;
    let v = if v.is_finite() { v.round() } else { 0.0 };
    v.clamp(0.0, max) as usize
}

/// Rounded mean color under the three seeds.
pub fn seed_color(image: &RgbImageView<'_>, seeds: &Seeds) -> Color {
    let mut sum = [0u32; 3];
    for &p in &seeds.0 {
        let (x, y) = seed_pixel(image, p);
        let c = image.pixel(x, y);
        sum[0] += c.r as u32;
        sum[1] += c.g as u32;
        sum[2] += c.b as u32;
    }
    let mean = |s: u32| (s as f32 / 3.0).round() as u8;
    Color::new(mean(sum[0]), mean(sum[1]), mean(sum[2]))
}

/// Greedy column-by-column curve follower.
///
/// Stateless between calls: every [`CurveTracer::trace`] starts from its
/// seeds and returns a polyline with strictly increasing x.
#[derive(Clone, Debug, Default)]
pub struct CurveTracer {
    params: TraceParams,
}

impl CurveTracer {
    pub fn new(params: TraceParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &TraceParams {
        &self.params
    }

    /// Trace the curve of `color` through the middle seed.
    ///
    /// Returns an empty polyline when the seed column holds no matching run.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, image, mask), fields(width = image.width(), height = image.height()))
    )]
    pub fn trace<M: PixelMask + ?Sized>(
        &self,
        image: &RgbImageView<'_>,
        seeds: &Seeds,
        color: Color,
        mask: &M,
    ) -> Vec<Point2<f32>> {
        let origin = seeds.sorted_by_x()[1];
        let (x0, _) = seed_pixel(image, origin);

        let runs = runs_in_column(image, x0, color, self.params.color_threshold, mask);
        let Some(y0) = runs
            .iter()
            .map(|r| r.representative_y(self.params.mode))
            .min_by(|a, b| (a - origin.y).abs().total_cmp(&(b - origin.y).abs()))
        else {
            log::warn!("no run of {color:?} in seed column {x0}");
            return Vec::new();
        };

        let left = self.trace_direction(image, x0, y0, -1, color, mask);
        let right = self.trace_direction(image, x0, y0, 1, color, mask);
        log::debug!(
            "traced {} px left and {} px right of column {x0}",
            left.len() - 1,
            right.len() - 1
        );

        let mut out = Vec::with_capacity(left.len() + right.len() - 1);
        out.extend(left.into_iter().rev());
        out.extend(right.into_iter().skip(1));
        out
    }

    /// Follow the curve from `(x0, y0)` in steps of `step` columns.
    ///
    /// The returned points start with the origin.
    fn trace_direction<M: PixelMask + ?Sized>(
        &self,
        image: &RgbImageView<'_>,
        x0: usize,
        y0: f32,
        step: i64,
        color: Color,
        mask: &M,
    ) -> Vec<Point2<f32>> {
        let p = &self.params;
        let mut points = vec![Point2::new(x0 as f32, y0)];
        let mut prev = y0;
        let mut prev2: Option<f32> = None;
        let mut x = x0 as i64 + step;

        while x >= 0 && (x as usize) < image.width() {
            let predicted = match prev2 {
                Some(p2) => prev + (prev - p2),
                None => prev,
            };
            let best = runs_in_column(image, x as usize, color, p.color_threshold, mask)
                .iter()
                .map(|r| r.representative_y(p.mode))
                .min_by(|a, b| (a - predicted).abs().total_cmp(&(b - predicted).abs()));
            let Some(y) = best else {
                break;
            };
            if (y - predicted).abs() > p.max_jump {
                log::debug!("jump at column {x}: |{y} - {predicted}| > {}", p.max_jump);
                break;
            }
            points.push(Point2::new(x as f32, y));
            prev2 = Some(prev);
            prev = y;
            x += step;
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use plot_digitizer_core::{NoMask, RgbImage};

    const RED: Color = Color::new(230, 20, 20);
    const WHITE: Color = Color::new(255, 255, 255);

    fn seeds(pts: [(f32, f32); 3]) -> Seeds {
        Seeds(pts.map(|(x, y)| Point2::new(x, y)))
    }

    #[test]
    fn seeds_require_exactly_three_points() {
        let p = Point2::new(1.0, 2.0);
        assert!(Seeds::from_slice(&[p, p]).is_none());
        assert!(Seeds::from_slice(&[p, p, p, p]).is_none());
        assert!(Seeds::from_slice(&[p, p, p]).is_some());
    }

    #[test]
    fn seed_color_is_rounded_mean() {
        let mut img = RgbImage::filled(10, 10, WHITE);
        img.put(1, 1, Color::new(10, 0, 0));
        img.put(2, 2, Color::new(11, 0, 1));
        img.put(9, 9, Color::new(11, 3, 1));
        let view = img.view().expect("view");
        // The last seed lies outside the image and is clamped onto (9, 9).
        let c = seed_color(&view, &seeds([(1.2, 0.8), (2.0, 2.4), (40.0, 12.0)]));
        assert_eq!(c, Color::new(11, 1, 1));
    }

    #[test]
    fn follows_straight_line_to_both_edges() {
        let mut img = RgbImage::filled(40, 30, WHITE);
        for x in 0..40 {
            img.put(x, 12, RED);
            img.put(x, 13, RED);
        }
        let view = img.view().expect("view");
        let tracer = CurveTracer::default();
        let s = seeds([(30.0, 12.0), (5.0, 13.0), (18.0, 12.0)]);
        let line = tracer.trace(&view, &s, RED, &NoMask);
        assert_eq!(line.len(), 40);
        for p in &line {
            assert_relative_eq!(p.y, 12.5);
        }
        assert!(line.windows(2).all(|w| w[1].x == w[0].x + 1.0));
    }

    fn steep_line_with_distractor() -> RgbImage {
        let mut img = RgbImage::filled(50, 100, WHITE);
        for x in 0..50 {
            img.put(x, 2 * x - 10, RED);
            img.put(x, 50, RED);
        }
        img
    }

    #[test]
    fn prediction_keeps_slope_through_crossing() {
        let img = steep_line_with_distractor();
        let view = img.view().expect("view");
        let tracer = CurveTracer::new(TraceParams {
            max_jump: 3.0,
            ..TraceParams::default()
        });
        let s = seeds([(40.0, 70.0), (10.0, 10.0), (20.0, 30.0)]);
        let line = tracer.trace(&view, &s, RED, &NoMask);

        assert_eq!(line.first().map(|p| p.x), Some(5.0));
        assert_eq!(line.last().map(|p| p.x), Some(49.0));
        for p in &line {
            assert_relative_eq!(p.y, 2.0 * p.x - 10.0);
        }
    }

    #[test]
    fn jump_beyond_limit_stops_direction() {
        let mut img = RgbImage::filled(60, 60, WHITE);
        for x in 0..60 {
            let y = if x < 30 { 20 } else { 40 };
            img.put(x, y, RED);
        }
        let view = img.view().expect("view");
        let tracer = CurveTracer::new(TraceParams {
            max_jump: 5.0,
            ..TraceParams::default()
        });
        let s = seeds([(5.0, 20.0), (10.0, 20.0), (15.0, 20.0)]);
        let line = tracer.trace(&view, &s, RED, &NoMask);
        assert_eq!(line.first().map(|p| p.x), Some(0.0));
        assert_eq!(line.last().map(|p| p.x), Some(29.0));
        assert!(line.iter().all(|p| p.y == 20.0));
    }

    #[test]
    fn median_mode_changes_only_rounding() {
        let mut img = RgbImage::filled(20, 20, WHITE);
        for x in 0..20 {
            img.put(x, 6, RED);
            img.put(x, 7, RED);
        }
        let view = img.view().expect("view");
        let tracer = CurveTracer::new(TraceParams {
            mode: RepresentativeMode::Median,
            ..TraceParams::default()
        });
        let s = seeds([(2.0, 6.0), (9.0, 6.0), (15.0, 7.0)]);
        let line = tracer.trace(&view, &s, RED, &NoMask);
        assert_eq!(line.len(), 20);
        assert!(line.iter().all(|p| p.y == 6.0));
    }

    #[test]
    fn empty_seed_column_gives_empty_trace() {
        let mut img = RgbImage::filled(20, 20, WHITE);
        for x in 0..8 {
            img.put(x, 5, RED);
        }
        let view = img.view().expect("view");
        let line = CurveTracer::default().trace(
            &view,
            &seeds([(1.0, 5.0), (15.0, 5.0), (12.0, 5.0)]),
            RED,
            &NoMask,
        );
        assert!(line.is_empty());
    }

    #[test]
    fn origin_uses_run_nearest_to_seed() {
        let mut img = RgbImage::filled(30, 40, WHITE);
        for x in 0..30 {
            img.put(x, 8, RED);
            img.put(x, 30, RED);
        }
        let view = img.view().expect("view");
        let tracer = CurveTracer::default();
        let s = seeds([(3.0, 27.0), (15.0, 26.0), (25.0, 29.0)]);
        let line = tracer.trace(&view, &s, RED, &NoMask);
        assert_eq!(line.len(), 30);
        assert!(line.iter().all(|p| p.y == 30.0));
    }

    #[test]
    fn tracing_is_deterministic() {
        let img = steep_line_with_distractor();
        let view = img.view().expect("view");
        let tracer = CurveTracer::new(TraceParams {
            max_jump: 3.0,
            ..TraceParams::default()
        });
        let s = seeds([(40.0, 70.0), (10.0, 10.0), (20.0, 30.0)]);
        let a = tracer.trace(&view, &s, RED, &NoMask);
        let b = tracer.trace(&view, &s, RED, &NoMask);
        assert_eq!(a, b);
        let shuffled = seeds([(20.0, 30.0), (40.0, 70.0), (10.0, 10.0)]);
        assert_eq!(tracer.trace(&view, &shuffled, RED, &NoMask), a);
    }

    #[test]
    fn seeds_sharing_x_order_by_y() {
        let mut img = RgbImage::filled(40, 60, WHITE);
        for x in 0..40 {
            img.put(x, 5, RED);
            img.put(x, 50, RED);
        }
        let view = img.view().expect("view");
        let tracer = CurveTracer::default();

        let a = seeds([(10.0, 5.0), (10.0, 50.0), (20.0, 5.0)]);
        let b = seeds([(10.0, 50.0), (10.0, 5.0), (20.0, 5.0)]);
        assert_eq!(a.sorted_by_x(), b.sorted_by_x());
        assert_eq!(a.sorted_by_x()[1], Point2::new(10.0, 50.0));

        let line_a = tracer.trace(&view, &a, RED, &NoMask);
        let line_b = tracer.trace(&view, &b, RED, &NoMask);
        assert_eq!(line_a, line_b);
        assert_eq!(line_a.first().map(|p| p.y), Some(50.0));
    }

    #[test]
    fn params_round_trip_through_json() {
        let params = TraceParams {
            color_threshold: 42.5,
            max_jump: 7.0,
            mode: RepresentativeMode::Median,
        };
        let json = serde_json::to_string(&params).expect("serialize");
        assert!(json.contains("\"median\""), "{json}");
        let back: TraceParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, params);

        let partial: TraceParams =
            serde_json::from_str(r#"{"mode": "centerline"}"#).expect("partial");
        assert_eq!(partial, TraceParams::default());
    }
}
