//! Settings for the PDF, video and audio adapters.

use crate::watermark::parse_hex_color;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_render_scale() -> f32 {
    2.0
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_video_font_size() -> u32 {
    15
}

fn default_video_color() -> String {
    "#808080".to_string()
}

fn default_top_offset() -> u32 {
    15
}

fn default_tts_program() -> String {
    "espeak-ng".to_string()
}

fn default_speech_rate() -> u32 {
    100
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Rasterization scale relative to 72 dpi (default: 2.0)
    #[serde(default = "default_render_scale")]
    pub render_scale: f32,

    /// Directory holding libpdfium, tried after the working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_path: Option<PathBuf>,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            render_scale: default_render_scale(),
            library_path: None,
        }
    }
}

impl PdfConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.render_scale.is_finite() || self.render_scale <= 0.0 {
            return Err(format!(
                "pdf render_scale must be greater than 0, got {}",
                self.render_scale
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConfig {
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// Text size in pixels (default: 15)
    #[serde(default = "default_video_font_size")]
    pub font_size: u32,

    /// Text color as hex string (default: "#808080")
    #[serde(default = "default_video_color")]
    pub color: String,

    /// Pixels between the clip top and the frame's vertical center
    #[serde(default = "default_top_offset")]
    pub top_offset: u32,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            font_size: default_video_font_size(),
            color: default_video_color(),
            top_offset: default_top_offset(),
        }
    }
}

impl VideoConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.ffmpeg_path.trim().is_empty() {
            return Err("video ffmpeg_path cannot be empty".to_string());
        }
        if self.font_size == 0 {
            return Err("video font_size must be greater than 0".to_string());
        }
        parse_hex_color(&self.color).map_err(|e| format!("video color: {}", e))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// espeak-ng compatible speech synthesizer
    #[serde(default = "default_tts_program")]
    pub tts_program: String,

    /// Words per minute (default: 100)
    #[serde(default = "default_speech_rate")]
    pub speech_rate: u32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            tts_program: default_tts_program(),
            speech_rate: default_speech_rate(),
        }
    }
}

impl AudioConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.ffmpeg_path.trim().is_empty() {
            return Err("audio ffmpeg_path cannot be empty".to_string());
        }
        if self.tts_program.trim().is_empty() {
            return Err("audio tts_program cannot be empty".to_string());
        }
        if self.speech_rate == 0 {
            return Err("audio speech_rate must be greater than 0".to_string());
        }
        Ok(())
    }
}
