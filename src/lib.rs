// Watermarker library: text watermarks for images, PDFs, video and audio

pub mod codec;
pub mod config;
pub mod logging;
pub mod media;
pub mod watermark;

pub use codec::{watermark_image, EncodedImage, ImageOptions, OutputFormat};
pub use config::Config;
pub use media::{MediaError, MediaKind, Watermarker};
pub use watermark::{overlay_text, Compositor, WatermarkError};
