//! Decode-size limits.
//!
//! Dimensions are read from the image header and checked before the pixel
//! data is decoded, so a small file that expands to a huge buffer is
//! rejected up front.

use crate::watermark::WatermarkError;
use serde::{Deserialize, Serialize};

fn default_max_width() -> u32 {
    20_000
}

fn default_max_height() -> u32 {
    20_000
}

fn default_max_pixels() -> u64 {
    100_000_000
}

/// Upper bounds on decoded image size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeLimits {
    #[serde(default = "default_max_width")]
    pub max_width: u32,

    #[serde(default = "default_max_height")]
    pub max_height: u32,

    /// Maximum width * height (default: 100 megapixels)
    #[serde(default = "default_max_pixels")]
    pub max_pixels: u64,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_height: default_max_height(),
            max_pixels: default_max_pixels(),
        }
    }
}

impl DecodeLimits {
    pub fn validate(&self) -> Result<(), String> {
        if self.max_width == 0 || self.max_height == 0 || self.max_pixels == 0 {
            return Err("limits must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Check header dimensions against the limits.
    pub fn check(&self, width: u32, height: u32) -> Result<(), WatermarkError> {
        let too_large = |reason: String| WatermarkError::ImageTooLarge {
            width,
            height,
            reason,
        };

        if width > self.max_width {
            return Err(too_large(format!("max width {}", self.max_width)));
        }
        if height > self.max_height {
            return Err(too_large(format!("max height {}", self.max_height)));
        }
        let pixels = width as u64 * height as u64;
        if pixels > self.max_pixels {
            return Err(too_large(format!("max pixels {}", self.max_pixels)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = DecodeLimits::default();
        assert_eq!(limits.max_width, 20_000);
        assert_eq!(limits.max_height, 20_000);
        assert_eq!(limits.max_pixels, 100_000_000);
        assert!(limits.validate().is_ok());
    }

    #[test]
    fn test_check_within_limits() {
        let limits = DecodeLimits::default();
        assert!(limits.check(1920, 1080).is_ok());
        assert!(limits.check(20_000, 5_000).is_ok());
    }

    #[test]
    fn test_check_rejects_each_bound() {
        let limits = DecodeLimits {
            max_width: 100,
            max_height: 50,
            max_pixels: 4_000,
        };

        let err = limits.check(101, 10).unwrap_err();
        assert!(err.to_string().contains("max width 100"));

        let err = limits.check(10, 51).unwrap_err();
        assert!(err.to_string().contains("max height 50"));

        let err = limits.check(100, 50).unwrap_err();
        assert_eq!(
            err,
            WatermarkError::ImageTooLarge {
                width: 100,
                height: 50,
                reason: "max pixels 4000".to_string()
            }
        );
    }

    #[test]
    fn test_validate_rejects_zero() {
        let limits = DecodeLimits {
            max_pixels: 0,
            ..Default::default()
        };
        assert!(limits.validate().is_err());
    }

    #[test]
    fn test_partial_yaml() {
        let limits: DecodeLimits = serde_yaml::from_str("max_width: 640").unwrap();
        assert_eq!(limits.max_width, 640);
        assert_eq!(limits.max_height, 20_000);
    }
}
