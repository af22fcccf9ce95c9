use serde::{Deserialize, Serialize};

/// Encoder settings for watermarked images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Quality for JPEG output, 1-100
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

fn default_jpeg_quality() -> u8 {
    80
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(format!(
                "output jpeg_quality must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }
        Ok(())
    }
}
