//! Image encoder abstraction
//!
//! One [`ImageEncoder`] per output format, selected through
//! [`EncoderFactory`]. Encoders take the blended RGB buffer as is; alpha never
//! reaches them.

use super::format::OutputFormat;
use crate::watermark::WatermarkError;
use image::{ExtendedColorType, ImageEncoder as _, RgbImage};
use std::io::Cursor;

/// Quality settings for image encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderQuality {
    /// Quality value (1-100, where 100 is best quality); JPEG only
    pub quality: u8,
}

impl Default for EncoderQuality {
    fn default() -> Self {
        Self { quality: 80 }
    }
}

impl EncoderQuality {
    /// Create quality settings with specified quality level
    pub fn with_quality(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }
}

/// Result of encoding an image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub data: Vec<u8>,
    pub format: OutputFormat,
    /// MIME type of `data`
    pub content_type: &'static str,
}

impl EncodedImage {
    pub fn new(data: Vec<u8>, format: OutputFormat) -> Self {
        Self {
            data,
            format,
            content_type: format.content_type(),
        }
    }
}

/// Trait for image encoders
pub trait ImageEncoder: Send + Sync {
    /// The output format this encoder produces
    fn format(&self) -> OutputFormat;

    /// Encode an RGB buffer to the target format
    fn encode(&self, image: &RgbImage, quality: EncoderQuality)
        -> Result<EncodedImage, WatermarkError>;
}

fn encode_failed(format: OutputFormat, err: image::ImageError) -> WatermarkError {
    WatermarkError::encode(format.as_str(), err.to_string())
}

/// JPEG encoder using the image crate
pub struct JpegEncoder;

impl ImageEncoder for JpegEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Jpeg
    }

    fn encode(
        &self,
        image: &RgbImage,
        quality: EncoderQuality,
    ) -> Result<EncodedImage, WatermarkError> {
        use image::codecs::jpeg::JpegEncoder as ImageJpegEncoder;

        let mut output = Vec::new();
        ImageJpegEncoder::new_with_quality(&mut output, quality.quality)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| encode_failed(OutputFormat::Jpeg, e))?;

        Ok(EncodedImage::new(output, OutputFormat::Jpeg))
    }
}

/// PNG encoder using the image crate
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Png
    }

    fn encode(
        &self,
        image: &RgbImage,
        _quality: EncoderQuality,
    ) -> Result<EncodedImage, WatermarkError> {
        use image::codecs::png::PngEncoder as ImagePngEncoder;

        let mut output = Vec::new();
        ImagePngEncoder::new(&mut output)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| encode_failed(OutputFormat::Png, e))?;

        Ok(EncodedImage::new(output, OutputFormat::Png))
    }
}

/// TIFF encoder using the image crate
pub struct TiffEncoder;

impl ImageEncoder for TiffEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Tiff
    }

    fn encode(
        &self,
        image: &RgbImage,
        _quality: EncoderQuality,
    ) -> Result<EncodedImage, WatermarkError> {
        use image::codecs::tiff::TiffEncoder as ImageTiffEncoder;

        // TIFF writes directory offsets, so the sink must be seekable
        let mut output = Cursor::new(Vec::new());
        ImageTiffEncoder::new(&mut output)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| encode_failed(OutputFormat::Tiff, e))?;

        Ok(EncodedImage::new(output.into_inner(), OutputFormat::Tiff))
    }
}

/// BMP encoder using the image crate
pub struct BmpEncoder;

impl ImageEncoder for BmpEncoder {
    fn format(&self) -> OutputFormat {
        OutputFormat::Bmp
    }

    fn encode(
        &self,
        image: &RgbImage,
        _quality: EncoderQuality,
    ) -> Result<EncodedImage, WatermarkError> {
        use image::codecs::bmp::BmpEncoder as ImageBmpEncoder;

        let mut output = Vec::new();
        ImageBmpEncoder::new(&mut output)
            .write_image(
                image.as_raw(),
                image.width(),
                image.height(),
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| encode_failed(OutputFormat::Bmp, e))?;

        Ok(EncodedImage::new(output, OutputFormat::Bmp))
    }
}

/// Factory for creating encoders based on output format
pub struct EncoderFactory;

impl EncoderFactory {
    pub fn create(format: OutputFormat) -> Box<dyn ImageEncoder> {
        match format {
            OutputFormat::Jpeg => Box::new(JpegEncoder),
            OutputFormat::Png => Box::new(PngEncoder),
            OutputFormat::Tiff => Box::new(TiffEncoder),
            OutputFormat::Bmp => Box::new(BmpEncoder),
        }
    }
}
