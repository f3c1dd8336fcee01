//! High-level facade crate for the `plot-digitizer-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - [`digitize`], which runs detection, calibration, masking, tracing and
//!   data mapping for one [`DigitizeJob`] in a single top-down pass
//! - CSV export of the resulting series
//! - (feature `image`) loading image files into [`core::RgbImage`]
//!
//! ## Quickstart
//!
//! ```no_run
//! use plot_digitizer::{digitize, export, io, DigitizeJob};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = io::load_rgb("plot.png")?;
//! let job: DigitizeJob = serde_json::from_str(&std::fs::read_to_string("job.json")?)?;
//! let out = digitize(&img.view()?, &job)?;
//! print!("{}", export::to_csv_string(&out.series));
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `plot_digitizer::core`: pixel buffers, geometry, calibration, mask trait.
//! - `plot_digitizer::axes`: Otsu threshold, axis/tick detection, blacklist.
//! - `plot_digitizer::trace`: seeded curve tracing and data mapping.
//! - `plot_digitizer::io` (feature `image`): image file loading.

pub use plot_digitizer_axes as axes;
pub use plot_digitizer_core as core;
pub use plot_digitizer_trace as trace;

pub use plot_digitizer_axes::{AxisDetectionResult, AxisDetector, AxisDetectorParams};
pub use plot_digitizer_core::{CalibrationInput, CalibrationMapper, DataPoint, Rect};
pub use plot_digitizer_trace::{CurveTracer, Seeds, TraceParams};

mod digitize;
pub mod export;
#[cfg(feature = "image")]
pub mod io;

pub use digitize::{digitize, DigitizeError, DigitizeJob, Digitized, DigitizerParams};

#[cfg(feature = "tracing")]
pub use plot_digitizer_core::init_tracing;
pub use plot_digitizer_core::init_with_level;
