//! Raster output formats and magic-byte detection.

use crate::watermark::WatermarkError;
use std::str::FromStr;

/// Raster formats the watermarker reads and writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Jpeg,
    Png,
    Tiff,
    Bmp,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Tiff => "tiff",
            Self::Bmp => "bmp",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Tiff => "image/tiff",
            Self::Bmp => "image/bmp",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Tiff => "tiff",
            Self::Bmp => "bmp",
        }
    }

    /// Map an `image` crate format onto ours, if supported.
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Tiff => Some(Self::Tiff),
            image::ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = WatermarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            "tiff" | "tif" => Ok(OutputFormat::Tiff),
            "bmp" => Ok(OutputFormat::Bmp),
            _ => Err(WatermarkError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Detect the raster format of `data` from its leading bytes.
pub fn detect_format(data: &[u8]) -> Option<OutputFormat> {
    image::guess_format(data)
        .ok()
        .and_then(OutputFormat::from_image_format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_aliases() {
        assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("JPEG".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("Png".parse::<OutputFormat>().unwrap(), OutputFormat::Png);
        assert_eq!("tif".parse::<OutputFormat>().unwrap(), OutputFormat::Tiff);
        assert_eq!("TIFF".parse::<OutputFormat>().unwrap(), OutputFormat::Tiff);
        assert_eq!("bmp".parse::<OutputFormat>().unwrap(), OutputFormat::Bmp);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "webp".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err, WatermarkError::UnsupportedFormat("webp".to_string()));
        assert!("".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_metadata() {
        assert_eq!(OutputFormat::Jpeg.content_type(), "image/jpeg");
        assert_eq!(OutputFormat::Tiff.content_type(), "image/tiff");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Bmp.extension(), "bmp");
        assert_eq!(OutputFormat::Png.to_string(), "png");
    }

    #[test]
    fn test_detect_format_magic_bytes() {
        assert_eq!(
            detect_format(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]),
            Some(OutputFormat::Png)
        );
        assert_eq!(detect_format(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(OutputFormat::Jpeg));
        assert_eq!(detect_format(b"BM\0\0\0\0"), Some(OutputFormat::Bmp));
        assert_eq!(detect_format(b"II*\0"), Some(OutputFormat::Tiff));
        assert_eq!(detect_format(b"GIF89a"), None);
        assert_eq!(detect_format(b"hello"), None);
    }
}
