//! Otsu binarization of a rectangular region.

use plot_digitizer_core::{Rect, RgbImageView};

/// Threshold used when no split exists (empty or single-level histogram).
pub const DEFAULT_THRESHOLD: u8 = 128;

/// Otsu's split over a 256-bin gray histogram.
///
/// Returns the first gray level of the bright class, so that `gray < t`
/// selects the dark class exactly. `None` when fewer than two levels are
/// populated.
pub fn otsu_threshold(hist: &[u64; 256]) -> Option<u8> {
    let total: f64 = hist.iter().map(|&h| h as f64).sum();
    if total < 1.0 {
        return None;
    }
    let sum_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &h)| i as f64 * h as f64)
        .sum();

    let mut sum_b = 0f64;
    let mut w_b = 0f64;
    let mut best_var = 0f64;
    let mut best_t: Option<usize> = None;

    for (t, &h) in hist.iter().enumerate() {
        w_b += h as f64;
        if w_b < 1.0 {
            continue;
        }
        let w_f = total - w_b;
        if w_f < 1.0 {
            break;
        }

        sum_b += t as f64 * h as f64;
        let m_b = sum_b / w_b;
        let m_f = (sum_total - sum_b) / w_f;

        let var_between = w_b * w_f * (m_b - m_f) * (m_b - m_f);
        if var_between > best_var {
            best_var = var_between;
            best_t = Some(t);
        }
    }

    // The loop breaks before t = 255 can win, so t + 1 fits in a u8.
    best_t.map(|t| (t + 1) as u8)
}

/// Gray histogram of `rect` (clamped to the image).
pub fn gray_histogram(image: &RgbImageView<'_>, rect: Rect) -> [u64; 256] {
    let r = rect.clamp_to(image.width(), image.height());
    let mut hist = [0u64; 256];
    for y in r.y..r.bottom() {
        for x in r.x..r.right() {
            hist[image.gray(x as usize, y as usize) as usize] += 1;
        }
    }
    hist
}

/// Otsu threshold of the pixels inside `rect`, or [`DEFAULT_THRESHOLD`].
pub fn compute_threshold(image: &RgbImageView<'_>, rect: Rect) -> u8 {
    let hist = gray_histogram(image, rect);
    match otsu_threshold(&hist) {
        Some(t) => t,
        None => {
            log::debug!("no Otsu split in {rect:?}, using {DEFAULT_THRESHOLD}");
            DEFAULT_THRESHOLD
        }
    }
}

/// Ink predicate: a pixel is ink when its gray level is below `threshold`.
#[derive(Clone, Copy, Debug)]
pub struct InkMap<'a> {
    image: RgbImageView<'a>,
    threshold: u8,
}

impl<'a> InkMap<'a> {
    pub fn new(image: RgbImageView<'a>, threshold: u8) -> Self {
        Self { image, threshold }
    }

    #[inline]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    #[inline]
    pub fn image(&self) -> &RgbImageView<'a> {
        &self.image
    }

    /// Pixels outside the image are never ink.
    #[inline]
    pub fn is_ink(&self, x: i64, y: i64) -> bool {
        self.image.contains(x, y) && self.image.gray(x as usize, y as usize) < self.threshold
    }
}
