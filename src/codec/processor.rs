//! Image byte pipeline
//!
//! Handles the full transformation: decode → watermark → encode

use image::{ImageReader, RgbImage};
use std::io::Cursor;
use tracing::debug;

use super::encoder::{EncodedImage, EncoderFactory, EncoderQuality};
use super::format::{detect_format, OutputFormat};
use super::limits::DecodeLimits;
use crate::watermark::{Compositor, WatermarkError};

/// Encoder and decoder settings for [`watermark_image`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageOptions {
    pub quality: EncoderQuality,
    pub limits: DecodeLimits,
}

/// Decode image bytes into a 3-channel buffer.
///
/// The header is read first and checked against `limits`; alpha is dropped.
pub fn decode_image(data: &[u8], limits: &DecodeLimits) -> Result<RgbImage, WatermarkError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| WatermarkError::decode(e.to_string()))?;

    if reader.format().is_none() {
        return Err(WatermarkError::decode("unrecognized image format"));
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| WatermarkError::decode(e.to_string()))?;
    limits.check(width, height)?;

    let image = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| WatermarkError::decode(e.to_string()))?
        .decode()
        .map_err(|e| WatermarkError::decode(e.to_string()))?;

    Ok(image.to_rgb8())
}

/// Watermark encoded image bytes with the embedded font.
///
/// When `format` is `None` the detected input format is kept.
pub fn watermark_image(
    data: &[u8],
    text: &str,
    format: Option<OutputFormat>,
    options: &ImageOptions,
) -> Result<EncodedImage, WatermarkError> {
    watermark_image_with(&Compositor::new()?, data, text, format, options)
}

/// Watermark encoded image bytes with a configured compositor.
pub fn watermark_image_with(
    compositor: &Compositor,
    data: &[u8],
    text: &str,
    format: Option<OutputFormat>,
    options: &ImageOptions,
) -> Result<EncodedImage, WatermarkError> {
    let image = decode_image(data, &options.limits)?;

    let output_format = match format {
        Some(format) => format,
        None => detect_format(data)
            .ok_or_else(|| WatermarkError::UnsupportedFormat("unknown input format".to_string()))?,
    };

    let marked = compositor.overlay_text(&image, text)?;
    let encoded = EncoderFactory::create(output_format).encode(&marked, options.quality)?;

    debug!(
        width = image.width(),
        height = image.height(),
        format = %output_format,
        input_bytes = data.len(),
        output_bytes = encoded.data.len(),
        "Watermarked image"
    );

    Ok(encoded)
}
