use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};

use crate::domain::TransformError;
use crate::domain::repositories::ImageTransform;

/// Cover-fit resize backed by the `image` crate.
///
/// The output keeps the input's format where it can be encoded (PNG stays
/// PNG); everything else is written as JPEG.
#[derive(Clone, Copy, Debug)]
pub struct CoverCropTransform {
    filter: FilterType,
}

impl CoverCropTransform {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl Default for CoverCropTransform {
    fn default() -> Self {
        Self::new(FilterType::Lanczos3)
    }
}

impl ImageTransform for CoverCropTransform {
    fn resize_cover_crop(
        &self,
        data: &[u8],
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, TransformError> {
        if width == 0 || height == 0 {
            return Err(TransformError::InvalidGeometry { width, height });
        }

        let format =
            image::guess_format(data).map_err(|e| TransformError::Decode(e.to_string()))?;
        let img = image::load_from_memory_with_format(data, format)
            .map_err(|e| TransformError::Decode(e.to_string()))?;

        // resize_to_fill scales to cover the box and crops the overflow evenly
        let cropped = img.resize_to_fill(width, height, self.filter);

        encode(cropped, output_format(format))
    }
}

fn output_format(input: ImageFormat) -> ImageFormat {
    match input {
        ImageFormat::Png => ImageFormat::Png,
        _ => ImageFormat::Jpeg,
    }
}

fn encode(img: DynamicImage, format: ImageFormat) -> Result<Vec<u8>, TransformError> {
    // JPEG has no alpha channel
    let img = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };

    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, format)
        .map_err(|e| TransformError::Encode(e.to_string()))?;
    Ok(buf.into_inner())
}
