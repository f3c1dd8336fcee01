//! Image file loading via the `image` crate.

use std::path::Path;

use ::image::ImageReader;
use plot_digitizer_core::RgbImage;

use crate::DigitizeError;

/// Convert an `image::RgbImage` into the workspace's owned raster.
pub fn from_image_rgb(img: &::image::RgbImage) -> RgbImage {
    RgbImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw().clone(),
    }
}

/// Decode any supported image file into RGB, dropping alpha.
pub fn load_rgb(path: impl AsRef<Path>) -> Result<RgbImage, DigitizeError> {
    let path = path.as_ref();
    let img = ImageReader::open(path)?
        .with_guessed_format()?
        .decode()?
        .to_rgb8();
    log::debug!(
        "loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    Ok(from_image_rgb(&img))
}

/// Encode a raster to a file; the format follows the extension.
pub fn save_rgb(img: &RgbImage, path: impl AsRef<Path>) -> Result<(), DigitizeError> {
    let buf = ::image::RgbImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
        .ok_or(plot_digitizer_core::ImageError::InvalidBufferLength {
            expected: img.width * img.height * 3,
            got: img.data.len(),
        })?;
    buf.save(path)?;
    Ok(())
}
