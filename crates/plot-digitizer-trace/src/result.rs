use nalgebra::Point2;
use plot_digitizer_core::{DataPoint, PixelToData};

/// Map a traced polyline into data space, ordered by X.
///
/// Points are sorted ascending by X after mapping (a negative calibration
/// scale reverses pixel order), then the whole sequence is reversed when
/// `reverse_x` is set.
pub fn map_and_sort<T: PixelToData + ?Sized>(
    points: &[Point2<f32>],
    mapper: &T,
    reverse_x: bool,
) -> Vec<DataPoint> {
    let mut out: Vec<DataPoint> = points.iter().map(|&p| mapper.map(p)).collect();
    out.sort_by(|a, b| a.x.total_cmp(&b.x));
    if reverse_x {
        out.reverse();
    }
    out
}
