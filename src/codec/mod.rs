//! Raster codec layer
//!
//! Bytes in, bytes out around the compositor:
//! - Format detection from magic bytes and parsing from names
//! - Header-first decoding with size limits
//! - One encoder per output format (JPEG, PNG, TIFF, BMP)

pub mod config;
pub mod encoder;
pub mod format;
pub mod limits;
pub mod processor;

pub use config::OutputConfig;
pub use encoder::{EncodedImage, EncoderFactory, EncoderQuality, ImageEncoder};
pub use format::{detect_format, OutputFormat};
pub use limits::DecodeLimits;
pub use processor::{decode_image, watermark_image, watermark_image_with, ImageOptions};
