//! Video watermarking through ffmpeg.
//!
//! The text is rendered once into a transparent PNG clip, then ffmpeg
//! overlays the clip on every frame: centered horizontally, its top edge
//! `top_offset` pixels above the vertical center. Audio streams are copied
//! and the video codec is whatever ffmpeg picks for the output container.

use super::command::ToolCommand;
use super::config::VideoConfig;
use super::error::MediaError;
use crate::watermark::{parse_hex_color, render_text, TextRenderOptions, WatermarkError};
use ab_glyph::FontArc;
use image::RgbaImage;
use std::path::Path;
use tracing::info;

/// Filter graph placing input 1 over input 0.
pub fn overlay_filter(top_offset: u32) -> String {
    format!("[0:v][1:v]overlay=(W-w)/2:H/2-{}:format=auto", top_offset)
}

/// ffmpeg invocation overlaying `clip` onto `input`, writing `output`.
pub fn overlay_command(config: &VideoConfig, input: &Path, clip: &Path, output: &Path) -> ToolCommand {
    ToolCommand::new(&config.ffmpeg_path)
        .args(["-y", "-hide_banner", "-loglevel", "error"])
        .arg("-i")
        .arg(input)
        .arg("-i")
        .arg(clip)
        .arg("-filter_complex")
        .arg(overlay_filter(config.top_offset))
        .args(["-c:a", "copy"])
        .arg(output)
}

/// Render the watermark text clip.
pub fn render_clip(font: &FontArc, text: &str, config: &VideoConfig) -> Result<RgbaImage, MediaError> {
    let color = parse_hex_color(&config.color).map_err(MediaError::InvalidSettings)?;
    let options = TextRenderOptions {
        text: text.to_string(),
        font_size: config.font_size as f32,
        color,
        opacity: 1.0,
    };
    Ok(render_text(font, &options)?)
}

/// Watermark a video file on disk.
pub fn watermark_video_file(
    font: &FontArc,
    input: &Path,
    output: &Path,
    text: &str,
    config: &VideoConfig,
) -> Result<(), MediaError> {
    let clip = render_clip(font, text, config)?;

    let clip_file = tempfile::Builder::new()
        .prefix("watermark-clip-")
        .suffix(".png")
        .tempfile()?;
    clip.save_with_format(clip_file.path(), image::ImageFormat::Png)
        .map_err(|e| WatermarkError::encode("png", e.to_string()))?;

    info!(
        input = %input.display(),
        output = %output.display(),
        clip_width = clip.width(),
        clip_height = clip.height(),
        "Overlaying text clip on video"
    );

    overlay_command(config, input, clip_file.path(), output).run()
}

/// Watermark video bytes; `extension` selects the container on both sides.
pub fn watermark_video_bytes(
    font: &FontArc,
    data: &[u8],
    extension: &str,
    text: &str,
    config: &VideoConfig,
) -> Result<Vec<u8>, MediaError> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join(format!("input.{}", extension));
    let output = dir.path().join(format!("output.{}", extension));

    std::fs::write(&input, data)?;
    watermark_video_file(font, &input, &output, text, config)?;
    Ok(std::fs::read(&output)?)
}
