//! Watermark error types.
//!
//! Every variant is terminal for the call that produced it: there is no
//! retry and no partially watermarked result.

use thiserror::Error;

/// Errors that can occur while watermarking a raster image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatermarkError {
    /// Input bytes are not a decodable raster image
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// The encoder rejected the blended buffer
    #[error("Failed to encode to {format}: {message}")]
    Encode { format: String, message: String },

    /// The text cannot be fitted onto the image at any positive scale
    #[error("Cannot fit {text_len} characters into an image {width}px wide")]
    Layout { width: u32, text_len: usize },

    /// Watermark text is empty or contains control characters
    #[error("Invalid watermark text: {0}")]
    InvalidText(String),

    /// Font data could not be parsed
    #[error("Failed to load font: {0}")]
    Font(String),

    /// Requested output format is not one of JPEG, PNG, TIFF or BMP
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Decoded dimensions exceed the configured limits
    #[error("Image dimensions {width}x{height} exceed limit ({reason})")]
    ImageTooLarge {
        width: u32,
        height: u32,
        reason: String,
    },

    /// Source and mask buffers disagree on size
    #[error("Failed to composite watermark: {0}")]
    Composite(String),
}

impl WatermarkError {
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    pub fn encode(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Encode {
            format: format.into(),
            message: message.into(),
        }
    }
}
