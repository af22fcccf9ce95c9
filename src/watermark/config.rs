//! Watermark configuration types.
//!
//! ```yaml
//! watermark:
//!   font_path: /usr/share/fonts/truetype/dejavu/DejaVuSans.ttf
//!   blend:
//!     alpha: 0.7
//!     beta: 0.3
//!     gamma: 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_alpha() -> f32 {
    0.7
}

fn default_beta() -> f32 {
    0.3
}

fn default_gamma() -> f32 {
    0.5
}

/// Coefficients of the per-channel blend
/// `out = alpha * src + beta * mask + gamma`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    /// Weight of the source image (default: 0.7)
    #[serde(default = "default_alpha")]
    pub alpha: f32,

    /// Weight of the inverted text mask (default: 0.3)
    #[serde(default = "default_beta")]
    pub beta: f32,

    /// Constant added before rounding (default: 0.5)
    #[serde(default = "default_gamma")]
    pub gamma: f32,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            beta: default_beta(),
            gamma: default_gamma(),
        }
    }
}

impl BlendWeights {
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !value.is_finite() {
                return Err(format!("blend {} must be a finite number", name));
            }
        }
        Ok(())
    }
}

/// Font and blend settings for the image compositor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WatermarkConfig {
    /// TrueType/OpenType font file; the embedded DejaVu Serif when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    #[serde(default)]
    pub blend: BlendWeights,
}

impl WatermarkConfig {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.font_path {
            if path.as_os_str().is_empty() {
                return Err("watermark font_path cannot be empty".to_string());
            }
        }
        self.blend.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let weights = BlendWeights::default();
        assert_eq!(weights.alpha, 0.7);
        assert_eq!(weights.beta, 0.3);
        assert_eq!(weights.gamma, 0.5);

        let config = WatermarkConfig::default();
        assert!(config.font_path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_blend_from_yaml() {
        let yaml = r#"
font_path: /fonts/Custom.ttf
blend:
  beta: 0.4
"#;
        let config: WatermarkConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.font_path, Some(PathBuf::from("/fonts/Custom.ttf")));
        assert_eq!(config.blend.alpha, 0.7);
        assert_eq!(config.blend.beta, 0.4);
        assert_eq!(config.blend.gamma, 0.5);
    }

    #[test]
    fn test_validate_rejects_non_finite_weights() {
        let config = WatermarkConfig {
            font_path: None,
            blend: BlendWeights {
                alpha: f32::NAN,
                ..Default::default()
            },
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("alpha"));

        let weights = BlendWeights {
            gamma: f32::INFINITY,
            ..Default::default()
        };
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_font_path() {
        let config = WatermarkConfig {
            font_path: Some(PathBuf::new()),
            blend: BlendWeights::default(),
        };
        assert!(config.validate().is_err());
    }
}
