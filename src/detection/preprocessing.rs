use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbImage};

use crate::error::VisionError;

/// Resize a frame to the working resolution with bilinear interpolation.
pub fn resize_frame(frame: &DynamicImage, width: u32, height: u32) -> Result<RgbImage, VisionError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(VisionError::InvalidFrame {
            width: frame.width(),
            height: frame.height(),
        });
    }
    if width == 0 || height == 0 {
        return Err(VisionError::InvalidFrame { width, height });
    }

    let rgb = frame.to_rgb8();
    if rgb.dimensions() == (width, height) {
        return Ok(rgb);
    }
    Ok(imageops::resize(&rgb, width, height, FilterType::Triangle))
}
