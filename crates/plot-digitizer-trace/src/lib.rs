//! Single-curve tracing for plot images.
//!
//! Three operator-picked seeds give the target color and the starting
//! column. From there the tracer walks column by column in both directions,
//! following the run of matching pixels nearest to a linear prediction, and
//! stops for good once the curve jumps farther than allowed. The pixel
//! polyline is finally mapped into data space with [`map_and_sort`].

mod result;
mod runs;
mod tracer;

pub use result::map_and_sort;
pub use runs::{runs_in_column, RepresentativeMode, Run};
pub use tracer::{seed_color, CurveTracer, Seeds, TraceParams};
