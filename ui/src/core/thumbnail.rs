//! Downsized JPEG previews for scan history.

use std::io::Cursor;

use api::ImageData;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("could not decode image: {0}")]
    Decode(#[source] image::ImageError),
    #[error("could not encode thumbnail: {0}")]
    Encode(#[source] image::ImageError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailBounds {
    pub max_width: u32,
    pub max_height: u32,
    pub quality: u8,
}

impl Default for ThumbnailBounds {
    fn default() -> Self {
        Self {
            max_width: 100,
            max_height: 100,
            quality: 80,
        }
    }
}

/// Target size for a `width`×`height` image. Landscape images are bounded by
/// width, everything else by height; images are never enlarged.
pub fn fit_within(width: u32, height: u32, bounds: ThumbnailBounds) -> (u32, u32) {
    let scale = |side: u32, ratio: f64| ((side as f64 * ratio).round() as u32).max(1);

    if width > height {
        if width > bounds.max_width {
            let ratio = bounds.max_width as f64 / width as f64;
            return (bounds.max_width, scale(height, ratio));
        }
    } else if height > bounds.max_height {
        let ratio = bounds.max_height as f64 / height as f64;
        return (scale(width, ratio), bounds.max_height);
    }
    (width.max(1), height.max(1))
}

/// Encode a thumbnail as a `data:image/jpeg;base64,...` URL.
pub fn create_thumbnail(image: &ImageData, bounds: ThumbnailBounds) -> Result<String, ThumbnailError> {
    let decoded = image::load_from_memory(&image.bytes).map_err(ThumbnailError::Decode)?;
    let (width, height) = fit_within(decoded.width(), decoded.height(), bounds);
    let rgb = decoded.resize_exact(width, height, FilterType::Triangle).to_rgb8();

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, bounds.quality)
        .encode_image(&rgb)
        .map_err(ThumbnailError::Encode)?;

    Ok(format!(
        "data:image/jpeg;base64,{}",
        STANDARD.encode(buffer.into_inner())
    ))
}

/// MIME type sniffed from the file's magic bytes.
pub fn sniff_mime_type(bytes: &[u8]) -> Option<&'static str> {
    image::guess_format(bytes).ok().map(|format| format.to_mime_type())
}
