//! Axis detection for plot images.
//!
//! The detector binarizes the operator-selected axis regions with a single
//! Otsu threshold, finds the densest ink row (X axis) and column (Y axis), and
//! collects tick marks protruding from those lines. The detection result also
//! feeds [`BlacklistMask`], which hides axis structure from curve tracing.
//!
//! ```
//! use plot_digitizer_axes::{AxisDetector, AxisDetectorParams};
//! use plot_digitizer_core::{Color, Rect, RgbImage};
//!
//! let mut img = RgbImage::filled(64, 64, Color::new(255, 255, 255));
//! for x in 4..60 {
//!     img.put(x, 50, Color::new(0, 0, 0));
//! }
//! let view = img.view().unwrap();
//! let detector = AxisDetector::new(AxisDetectorParams::default());
//! let result = detector.detect(&view, Rect::new(0, 40, 64, 20), Rect::new(0, 0, 10, 64));
//! assert_eq!(result.x_axis_line.p.y, 50.0);
//! ```

mod blacklist;
mod detector;
mod locate;
mod threshold;
mod ticks;

pub use blacklist::{BlacklistMask, BlacklistParams};
pub use detector::{AxisDetectionResult, AxisDetector, AxisDetectorParams};
pub use locate::{locate_column, locate_row};
pub use threshold::{compute_threshold, otsu_threshold, InkMap, DEFAULT_THRESHOLD};
pub use ticks::{cluster_1d, detect_along_column, detect_along_row, TickParams};
