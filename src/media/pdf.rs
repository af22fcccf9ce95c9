//! PDF watermarking through pdfium.
//!
//! Every page is rasterized, watermarked like any other image, and placed
//! as a full-page image in a new document. Page size in points equals the
//! raster size in pixels. Text, links and annotations of the source are not
//! carried over.
//!
//! Needs the `pdf` feature and libpdfium at runtime, searched in:
//! 1. Current directory
//! 2. `pdf.library_path` from the configuration
//! 3. System library paths

use super::config::PdfConfig;
use super::error::MediaError;
use crate::watermark::Compositor;

#[cfg(feature = "pdf")]
pub use enabled::{create_pdfium, watermark_pdf};

#[cfg(not(feature = "pdf"))]
pub fn watermark_pdf(
    _compositor: &Compositor,
    _data: &[u8],
    _text: &str,
    _config: &PdfConfig,
) -> Result<Vec<u8>, MediaError> {
    Err(MediaError::unsupported(
        "PDF support is not compiled in (enable the `pdf` feature)",
    ))
}

#[cfg(feature = "pdf")]
mod enabled {
    use super::*;
    use image::DynamicImage;
    use pdfium_render::prelude::*;
    use tracing::{debug, info};

    fn pdf_error(context: &str, err: PdfiumError) -> MediaError {
        MediaError::Pdf(format!("{}: {:?}", context, err))
    }

    /// Bind libpdfium, trying the working directory, the configured
    /// directory and then the system paths.
    pub fn create_pdfium(config: &PdfConfig) -> Result<Pdfium, MediaError> {
        let configured = config
            .library_path
            .as_ref()
            .map(|dir| dir.to_string_lossy().into_owned());

        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|e| match &configured {
                Some(dir) => {
                    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(dir))
                }
                None => Err(e),
            })
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| pdf_error("Failed to load PDFium library", e))?;

        Ok(Pdfium::new(bindings))
    }

    /// Watermark every page of a PDF document.
    pub fn watermark_pdf(
        compositor: &Compositor,
        data: &[u8],
        text: &str,
        config: &PdfConfig,
    ) -> Result<Vec<u8>, MediaError> {
        let pdfium = create_pdfium(config)?;
        let source = pdfium
            .load_pdf_from_byte_slice(data, None)
            .map_err(|e| pdf_error("Failed to open PDF", e))?;

        let render_config = PdfRenderConfig::new().scale_page_by_factor(config.render_scale);

        let mut pages = Vec::new();
        for (index, page) in source.pages().iter().enumerate() {
            let raster = page
                .render_with_config(&render_config)
                .map_err(|e| pdf_error(&format!("Failed to render page {}", index + 1), e))?
                .as_image()
                .to_rgb8();

            debug!(
                page = index + 1,
                width = raster.width(),
                height = raster.height(),
                "Rendered PDF page"
            );

            pages.push(compositor.overlay_text(&raster, text)?);
        }

        let mut output = pdfium
            .create_new_pdf()
            .map_err(|e| pdf_error("Failed to create PDF", e))?;

        for (index, marked) in pages.into_iter().enumerate() {
            let width = PdfPoints::new(marked.width() as f32);
            let height = PdfPoints::new(marked.height() as f32);

            let mut page = output
                .pages_mut()
                .create_page_at_end(PdfPagePaperSize::Custom(width, height))
                .map_err(|e| pdf_error(&format!("Failed to add page {}", index + 1), e))?;

            page.objects_mut()
                .create_image_object(
                    PdfPoints::ZERO,
                    PdfPoints::ZERO,
                    &DynamicImage::ImageRgb8(marked),
                    Some(width),
                    Some(height),
                )
                .map_err(|e| pdf_error(&format!("Failed to place page {}", index + 1), e))?;
        }

        let bytes = output
            .save_to_bytes()
            .map_err(|e| pdf_error("Failed to save PDF", e))?;

        info!(
            pages = output.pages().len(),
            input_bytes = data.len(),
            output_bytes = bytes.len(),
            "Watermarked PDF"
        );

        Ok(bytes)
    }
}
