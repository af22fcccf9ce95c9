//! Media error types.

use crate::watermark::WatermarkError;
use thiserror::Error;

/// Errors from the PDF, video and audio adapters.
#[derive(Debug, Error)]
pub enum MediaError {
    /// pdfium could not be bound, or rejected the document
    #[error("PDF processing failed: {0}")]
    Pdf(String),

    /// An external tool ran but exited unsuccessfully
    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        tool: String,
        status: ExitStatusText,
        stderr: String,
    },

    /// An external tool could not be started at all
    #[error("Failed to run {tool}: {message}")]
    ToolUnavailable { tool: String, message: String },

    /// Adapter settings that slipped past config validation
    #[error("Invalid media settings: {0}")]
    InvalidSettings(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File kind or extension the watermarker does not handle
    #[error("Unsupported media: {0}")]
    UnsupportedMedia(String),

    #[error(transparent)]
    Watermark(#[from] WatermarkError),
}

/// Exit code of a finished process, or `None` when killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitStatusText(pub Option<i32>);

impl std::fmt::Display for ExitStatusText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(code) => write!(f, "exit code {}", code),
            None => f.write_str("terminated by signal"),
        }
    }
}

impl MediaError {
    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedMedia(message.into())
    }

    /// Exit code for `ToolFailed`, if the tool exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ToolFailed { status, .. } => status.0,
            _ => None,
        }
    }
}
