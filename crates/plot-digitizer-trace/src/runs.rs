use nalgebra::Point2;
use plot_digitizer_core::{Color, PixelMask, RgbImageView};
use serde::{Deserialize, Serialize};

/// How a run is reduced to one y coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepresentativeMode {
    /// Midpoint of the run, `(y_min + y_max) / 2`.
    #[default]
    Centerline,
    /// Midpoint rounded down. Not a statistical median.
    Median,
}

/// Maximal vertical band of matching pixels in one column, inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub y_min: usize,
    pub y_max: usize,
}

impl Run {
    /// Number of rows covered.
    #[inline]
    pub fn height(&self) -> usize {
        self.y_max - self.y_min + 1
    }

    #[inline]
    pub fn representative_y(&self, mode: RepresentativeMode) -> f32 {
        let mid = (self.y_min + self.y_max) as f32 / 2.0;
        match mode {
            RepresentativeMode::Centerline => mid,
            RepresentativeMode::Median => mid.floor(),
        }
    }
}

/// Runs of pixels in column `x` within `threshold` (RGB distance) of `color`.
///
/// Masked pixels never match. Rows are scanned top to bottom, so runs come
/// out ordered by `y_min`.
pub fn runs_in_column<M: PixelMask + ?Sized>(
    image: &RgbImageView<'_>,
    x: usize,
    color: Color,
    threshold: f32,
    mask: &M,
) -> Vec<Run> {
    let mut runs = Vec::new();
    if x >= image.width() {
        return runs;
    }
    let mut start: Option<usize> = None;
    for y in 0..image.height() {
        let matched = !mask.contains(Point2::new(x as f32, y as f32))
            && image.pixel(x, y).distance(&color) < threshold;
        match (matched, start) {
            (true, None) => start = Some(y),
            (false, Some(y_min)) => {
                runs.push(Run { y_min, y_max: y - 1 });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(y_min) = start {
        runs.push(Run {
            y_min,
            y_max: image.height() - 1,
        });
    }
    runs
}
