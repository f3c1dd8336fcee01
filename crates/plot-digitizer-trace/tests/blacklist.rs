use nalgebra::Point2;
use plot_digitizer_axes::BlacklistMask;
use plot_digitizer_core::{Color, Line, NoMask, RgbImage};
use plot_digitizer_trace::{CurveTracer, Seeds, TraceParams};

const INK: Color = Color::new(0, 0, 0);

fn horizontal_curve() -> RgbImage {
    let mut img = RgbImage::filled(60, 40, Color::new(255, 255, 255));
    for x in 0..60 {
        img.put(x, 20, INK);
    }
    img
}

fn seeds() -> Seeds {
    Seeds::new(
        Point2::new(4.0, 20.0),
        Point2::new(10.0, 20.0),
        Point2::new(16.0, 20.0),
    )
}

#[test]
fn masked_band_halts_tracing() {
    let img = horizontal_curve();
    let view = img.view().expect("view");
    // A vertical axis at x = 40 hides columns 39..=41; nothing is skipped over.
    let mask = BlacklistMask::new(
        Line::horizontal(1000.0, 0.0),
        Line::vertical(40.0, 0.0),
        &[],
        &[],
        2.0,
        0.0,
    );
    let tracer = CurveTracer::new(TraceParams::default());

    let line = tracer.trace(&view, &seeds(), INK, &mask);
    assert_eq!(line.first().map(|p| p.x), Some(0.0));
    assert_eq!(line.last().map(|p| p.x), Some(38.0));

    let unmasked = tracer.trace(&view, &seeds(), INK, &NoMask);
    assert_eq!(unmasked.len(), 60);
}

#[test]
fn masked_seed_column_yields_nothing() {
    let img = horizontal_curve();
    let view = img.view().expect("view");
    let mask = BlacklistMask::new(
        Line::horizontal(20.0, 0.0),
        Line::vertical(-100.0, 0.0),
        &[],
        &[],
        1.0,
        0.0,
    );
    let line = CurveTracer::default().trace(&view, &seeds(), INK, &mask);
    assert!(line.is_empty());
}
