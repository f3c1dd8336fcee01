use nalgebra::Point2;
use plot_digitizer_axes::{
    AxisDetectionResult, AxisDetector, AxisDetectorParams, BlacklistMask, BlacklistParams,
};
use plot_digitizer_core::{
    CalibrationError, CalibrationInput, CalibrationMapper, Color, DataPoint, ImageError, NoMask,
    PixelMask, Rect, RgbImageView,
};
use plot_digitizer_trace::{map_and_sort, seed_color, CurveTracer, Seeds, TraceParams};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level helpers.
#[derive(thiserror::Error, Debug)]
pub enum DigitizeError {
    #[error(transparent)]
    Calibration(#[from] CalibrationError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid job description: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "image")]
    #[error(transparent)]
    Decode(#[from] ::image::ImageError),
}

/// All tunables of one digitizing run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitizerParams {
    pub axes: AxisDetectorParams,
    pub blacklist: BlacklistParams,
    pub trace: TraceParams,
    /// Hide detected axes and ticks from the tracer.
    pub use_blacklist: bool,
}

impl Default for DigitizerParams {
    fn default() -> Self {
        Self {
            axes: AxisDetectorParams::default(),
            blacklist: BlacklistParams::default(),
            trace: TraceParams::default(),
            use_blacklist: true,
        }
    }
}

/// Operator input for one run, in coordinates of the (cropped) plot image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DigitizeJob {
    /// Plot region of the source image. Hosts crop to it before calling
    /// [`digitize`]; every other coordinate is relative to the crop.
    #[serde(default)]
    pub crop: Option<Rect>,
    pub axis_roi_x: Rect,
    pub axis_roi_y: Rect,
    pub calibration: CalibrationInput,
    pub seeds: Vec<Point2<f32>>,
    /// Curve color; the mean seed color when absent.
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default)]
    pub reverse_x: bool,
    #[serde(default)]
    pub params: DigitizerParams,
}

/// Every entity derived from a [`DigitizeJob`], upstream first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Digitized {
    pub detection: AxisDetectionResult,
    pub calibration: CalibrationMapper,
    /// Color that was traced, `None` when the seeds were incomplete.
    pub color: Option<Color>,
    /// Traced pixel polyline, ascending in x.
    pub polyline: Vec<Point2<f32>>,
    /// Data series, ordered by X (descending when `reverse_x`).
    pub series: Vec<DataPoint>,
}

/// Run the whole pipeline for `job` on `image`.
///
/// Nothing is cached: each call rebuilds detection, calibration, mask and
/// trace from scratch. A calibration failure aborts the run; missing seeds or
/// an empty seed column produce an empty series.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(image, job), fields(width = image.width(), height = image.height()))
)]
pub fn digitize(image: &RgbImageView<'_>, job: &DigitizeJob) -> Result<Digitized, DigitizeError> {
    let params = &job.params;
    let detection =
        AxisDetector::new(params.axes.clone()).detect(image, job.axis_roi_x, job.axis_roi_y);
    let calibration = CalibrationMapper::build(&job.calibration)?;

    let Some(seeds) = Seeds::from_slice(&job.seeds) else {
        log::warn!("expected 3 seeds, got {}", job.seeds.len());
        return Ok(Digitized {
            detection,
            calibration,
            color: job.color,
            polyline: Vec::new(),
            series: Vec::new(),
        });
    };

    let color = job.color.unwrap_or_else(|| seed_color(image, &seeds));
    let mask: Box<dyn PixelMask> = if params.use_blacklist {
        Box::new(BlacklistMask::from_detection(&detection, &params.blacklist))
    } else {
        Box::new(NoMask)
    };
    let polyline = CurveTracer::new(params.trace).trace(image, &seeds, color, mask.as_ref());
    let series = map_and_sort(&polyline, &calibration, job.reverse_x);
    log::info!(
        "digitized {} points (color {:?}, threshold {})",
        series.len(),
        color,
        detection.threshold
    );

    Ok(Digitized {
        detection,
        calibration,
        color: Some(color),
        polyline,
        series,
    })
}
