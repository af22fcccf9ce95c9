//! Media dispatch
//!
//! Maps a file to a [`MediaKind`] by extension and routes it:
//! - **Image**: decode, composite, encode in-process
//! - **PDF**: rasterize pages with pdfium (feature `pdf`) and rebuild
//! - **Video**: overlay a rendered text clip with ffmpeg
//! - **Audio**: mix synthesized speech over the track with ffmpeg

pub mod audio;
pub mod command;
pub mod config;
pub mod error;
pub mod pdf;
pub mod video;

pub use command::ToolCommand;
pub use config::{AudioConfig, PdfConfig, VideoConfig};
pub use error::{ExitStatusText, MediaError};

use crate::codec::{watermark_image_with, ImageOptions, OutputFormat};
use crate::config::Config;
use crate::watermark::Compositor;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm", "ogv"];
const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac", "m4a"];

/// What kind of media a file holds, decided by its extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaKind {
    Image(OutputFormat),
    Pdf,
    /// Lowercased container extension
    Video(String),
    /// Lowercased container extension
    Audio(String),
}

impl MediaKind {
    pub fn from_extension(extension: &str) -> Result<Self, MediaError> {
        let ext = extension.trim_start_matches('.').to_lowercase();

        if let Ok(format) = OutputFormat::from_str(&ext) {
            return Ok(Self::Image(format));
        }
        if ext == "pdf" {
            return Ok(Self::Pdf);
        }
        if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
            return Ok(Self::Video(ext));
        }
        if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
            return Ok(Self::Audio(ext));
        }
        Err(MediaError::unsupported(format!("extension '{}'", extension)))
    }

    pub fn from_path(path: &Path) -> Result<Self, MediaError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| MediaError::unsupported(format!("no extension on {}", path.display())))?;
        Self::from_extension(ext)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Pdf => "pdf",
            Self::Video(_) => "video",
            Self::Audio(_) => "audio",
        }
    }
}

/// `<dir>/<stem>_watermark.<ext>` next to `input`.
///
/// `image_format` replaces the extension of image inputs.
pub fn default_output_path(input: &Path, image_format: Option<OutputFormat>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());

    let original_ext = input
        .extension()
        .map(|e| e.to_string_lossy().into_owned());

    let ext = match (image_format, MediaKind::from_path(input)) {
        (Some(format), Ok(MediaKind::Image(_))) => Some(format.extension().to_string()),
        _ => original_ext,
    };

    let file_name = match ext {
        Some(ext) => format!("{}_watermark.{}", stem, ext),
        None => format!("{}_watermark", stem),
    };
    input.with_file_name(file_name)
}

/// Configured entry point for every media kind.
#[derive(Debug, Clone)]
pub struct Watermarker {
    compositor: Compositor,
    image_options: ImageOptions,
    pdf: PdfConfig,
    video: VideoConfig,
    audio: AudioConfig,
}

impl Watermarker {
    /// Build from configuration; loads the font once.
    pub fn from_config(config: &Config) -> Result<Self, MediaError> {
        Ok(Self {
            compositor: Compositor::from_config(&config.watermark)?,
            image_options: config.image_options(),
            pdf: config.pdf.clone(),
            video: config.video.clone(),
            audio: config.audio.clone(),
        })
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn image_options(&self) -> &ImageOptions {
        &self.image_options
    }

    /// Watermark in-memory media. Images are re-encoded as the format the
    /// kind names.
    pub fn watermark_bytes(
        &self,
        kind: &MediaKind,
        data: &[u8],
        text: &str,
    ) -> Result<Vec<u8>, MediaError> {
        debug!(kind = kind.name(), bytes = data.len(), "Watermarking media");

        match kind {
            MediaKind::Image(format) => Ok(watermark_image_with(
                &self.compositor,
                data,
                text,
                Some(*format),
                &self.image_options,
            )?
            .data),
            MediaKind::Pdf => pdf::watermark_pdf(&self.compositor, data, text, &self.pdf),
            MediaKind::Video(ext) => {
                video::watermark_video_bytes(self.compositor.font(), data, ext, text, &self.video)
            }
            MediaKind::Audio(ext) => audio::watermark_audio_bytes(data, ext, text, &self.audio),
        }
    }

    /// Watermark `input` into `output`.
    ///
    /// For images the output extension picks the encoder; video and audio
    /// are handed to ffmpeg path to path.
    pub fn watermark_file(&self, input: &Path, output: &Path, text: &str) -> Result<MediaKind, MediaError> {
        self.watermark_file_as(input, output, text, None)
    }

    /// Like [`Self::watermark_file`], with `image_format` taking precedence
    /// over the output extension for image inputs.
    pub fn watermark_file_as(
        &self,
        input: &Path,
        output: &Path,
        text: &str,
        image_format: Option<OutputFormat>,
    ) -> Result<MediaKind, MediaError> {
        let kind = MediaKind::from_path(input)?;

        match &kind {
            MediaKind::Image(input_format) => {
                let format = match (image_format, MediaKind::from_path(output)) {
                    (Some(format), _) => format,
                    (None, Ok(MediaKind::Image(format))) => format,
                    (None, _) => *input_format,
                };
                let data = std::fs::read(input)?;
                let marked = self.watermark_bytes(&MediaKind::Image(format), &data, text)?;
                std::fs::write(output, marked)?;
            }
            MediaKind::Pdf => {
                let data = std::fs::read(input)?;
                let marked = self.watermark_bytes(&kind, &data, text)?;
                std::fs::write(output, marked)?;
            }
            MediaKind::Video(_) => {
                video::watermark_video_file(self.compositor.font(), input, output, text, &self.video)?
            }
            MediaKind::Audio(_) => audio::watermark_audio_file(input, output, text, &self.audio)?,
        }

        info!(
            kind = kind.name(),
            input = %input.display(),
            output = %output.display(),
            "Watermarked file"
        );
        Ok(kind)
    }
}
