//! Two-column CSV output of a data series.

use std::io::Write;

use plot_digitizer_core::DataPoint;

/// Write `X,Y` followed by one row per point.
pub fn write_csv<W: Write>(mut out: W, series: &[DataPoint]) -> std::io::Result<()> {
    writeln!(out, "X,Y")?;
    for p in series {
        writeln!(out, "{},{}", p.x, p.y)?;
    }
    out.flush()
}

pub fn to_csv_string(series: &[DataPoint]) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_csv(&mut buf, series);
    String::from_utf8_lossy(&buf).into_owned()
}
