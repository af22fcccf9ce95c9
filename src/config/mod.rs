// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::codec::{DecodeLimits, EncoderQuality, ImageOptions, OutputConfig};
use crate::logging::LoggingConfig;
use crate::media::{AudioConfig, PdfConfig, VideoConfig};
use crate::watermark::WatermarkConfig;

/// Top-level configuration. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub watermark: WatermarkConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub limits: DecodeLimits,
    #[serde(default)]
    pub pdf: PdfConfig,
    #[serde(default)]
    pub video: VideoConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        // First, check that all referenced environment variables exist
        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                )
            })?;
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        // A document with no content means "all defaults"
        let blank = substituted.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&substituted).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    pub fn validate(&self) -> Result<(), String> {
        self.watermark.validate()?;
        self.output.validate()?;
        self.limits.validate()?;
        self.pdf.validate()?;
        self.video.validate()?;
        self.audio.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Encoder quality and decode limits for the image pipeline.
    pub fn image_options(&self) -> ImageOptions {
        ImageOptions {
            quality: EncoderQuality::with_quality(self.output.jpeg_quality),
            limits: self.limits,
        }
    }
}
