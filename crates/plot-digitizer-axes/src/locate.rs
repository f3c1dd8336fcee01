//! Axis line localization by ink projection.

use plot_digitizer_core::Rect;

use crate::threshold::InkMap;

/// Row of `roi` with the most ink pixels.
///
/// Rows are scanned top to bottom and only a strictly larger count replaces
/// the current best, so the first maximum wins.
pub fn locate_row(ink: &InkMap<'_>, roi: Rect) -> i32 {
    let r = roi.clamp_to(ink.image().width(), ink.image().height());
    let mut best_y = r.y;
    let mut best_count = -1i64;
    for y in r.y..r.bottom() {
        let count = (r.x..r.right())
            .filter(|&x| ink.is_ink(x as i64, y as i64))
            .count() as i64;
        if count > best_count {
            best_count = count;
            best_y = y;
        }
    }
    log::debug!("x axis row {best_y} ({best_count} ink px)");
    best_y
}

/// Column of `roi` with the most ink pixels; first maximum wins.
pub fn locate_column(ink: &InkMap<'_>, roi: Rect) -> i32 {
    let r = roi.clamp_to(ink.image().width(), ink.image().height());
    let mut best_x = r.x;
    let mut best_count = -1i64;
    for x in r.x..r.right() {
        let count = (r.y..r.bottom())
            .filter(|&y| ink.is_ink(x as i64, y as i64))
            .count() as i64;
        if count > best_count {
            best_count = count;
            best_x = x;
        }
    }
    log::debug!("y axis column {best_x} ({best_count} ink px)");
    best_x
}
