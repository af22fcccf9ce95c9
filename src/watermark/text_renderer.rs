//! Text rasterization.
//!
//! Two renderers share one font handle:
//!
//! - [`draw_text_mask`] stamps hard-edged, stroke-widened text into a gray
//!   mask for the image compositor.
//! - [`render_text`] produces an anti-aliased RGBA clip with a transparent
//!   background, used as the overlay for video.
//!
//! # Example
//!
//! ```ignore
//! use watermarker::watermark::text_renderer::{default_font, render_text, TextRenderOptions};
//!
//! let font = default_font()?;
//! let options = TextRenderOptions {
//!     text: "Copyright 2025".to_string(),
//!     ..Default::default()
//! };
//! let clip = render_text(&font, &options)?;
//! ```

use super::WatermarkError;
use ab_glyph::{point, Font, FontArc, GlyphId, PxScale, ScaleFont};
use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;
use std::path::Path;
use std::sync::OnceLock;
use tracing::debug;

/// Embedded DejaVu Serif, used when no font file is configured.
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSerif.ttf");

static EMBEDDED_FONT: OnceLock<Result<FontArc, String>> = OnceLock::new();

/// Coverage at or above this value counts as ink in the mask.
const COVERAGE_THRESHOLD: f32 = 0.5;

/// Get the embedded font, parsing it on first use.
pub fn default_font() -> Result<FontArc, WatermarkError> {
    EMBEDDED_FONT
        .get_or_init(|| FontArc::try_from_slice(EMBEDDED_FONT_DATA).map_err(|e| e.to_string()))
        .clone()
        .map_err(WatermarkError::Font)
}

/// Load a TrueType/OpenType font from disk.
pub fn load_font_file(path: &Path) -> Result<FontArc, WatermarkError> {
    let data = std::fs::read(path)
        .map_err(|e| WatermarkError::Font(format!("{}: {}", path.display(), e)))?;
    let font = FontArc::try_from_vec(data)
        .map_err(|e| WatermarkError::Font(format!("{}: {}", path.display(), e)))?;
    debug!(path = %path.display(), "Loaded watermark font");
    Ok(font)
}

/// Reject text the renderers cannot place on a single line.
pub fn validate_text(text: &str) -> Result<(), WatermarkError> {
    if text.is_empty() {
        return Err(WatermarkError::InvalidText("text is empty".to_string()));
    }
    if let Some(c) = text.chars().find(|c| c.is_control()) {
        return Err(WatermarkError::InvalidText(format!(
            "control character U+{:04X} not allowed",
            c as u32
        )));
    }
    Ok(())
}

/// Parsed RGB color from hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Mid gray (#808080).
    pub fn gray() -> Self {
        Self::new(128, 128, 128)
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Parse a hex color string (`#RGB` or `#RRGGBB`).
pub fn parse_hex_color(hex: &str) -> Result<Color, String> {
    let digits = hex
        .strip_prefix('#')
        .ok_or_else(|| format!("color '{}' must start with '#'", hex))?;

    let channel = |s: &str| {
        u8::from_str_radix(s, 16).map_err(|_| format!("invalid hex digits '{}' in '{}'", s, hex))
    };

    if !digits.is_ascii() {
        return Err(format!("invalid hex color '{}'", hex));
    }

    match digits.len() {
        3 => Ok(Color::new(
            channel(&digits[0..1])? * 17,
            channel(&digits[1..2])? * 17,
            channel(&digits[2..3])? * 17,
        )),
        6 => Ok(Color::new(
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        )),
        n => Err(format!(
            "color must be #RGB or #RRGGBB format, got {} digits",
            n
        )),
    }
}

/// Sum of glyph advances plus pair kerning, in pixels.
pub fn advance_width(font: &FontArc, text: &str, px: f32) -> f32 {
    let scaled_font = font.as_scaled(PxScale::from(px));

    let mut width = 0.0f32;
    let mut prev_glyph: Option<GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            width += scaled_font.kern(prev, glyph_id);
        }
        width += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    width
}

/// Width and height of `text` once drawn with a stroke of `stroke_radius`.
///
/// The stroke widens the text by `stroke_radius` on each side.
pub fn measure_text(font: &FontArc, text: &str, px: f32, stroke_radius: u32) -> (u32, u32) {
    let scaled_font = font.as_scaled(PxScale::from(px));
    let pad = 2 * stroke_radius;

    (
        (advance_width(font, text, px).ceil() as u32).saturating_add(pad),
        (scaled_font.height().ceil() as u32).saturating_add(pad),
    )
}

/// Rasterize `text` with its baseline origin at `(x, baseline_y)` into
/// `mask`, setting every pixel with at least half coverage to 255.
///
/// Glyph parts falling outside the mask are clipped.
pub fn draw_text_mask(
    mask: &mut GrayImage,
    font: &FontArc,
    text: &str,
    px: f32,
    x: i32,
    baseline_y: i32,
) {
    let scale = PxScale::from(px);
    let scaled_font = font.as_scaled(scale);
    let (mask_w, mask_h) = (mask.width() as i32, mask.height() as i32);

    let mut cursor_x = x as f32;
    let mut prev_glyph: Option<GlyphId> = None;

    for c in text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y as f32));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px_x = gx as i32 + bounds.min.x as i32;
                let px_y = gy as i32 + bounds.min.y as i32;
                if coverage >= COVERAGE_THRESHOLD
                    && px_x >= 0
                    && px_y >= 0
                    && px_x < mask_w
                    && px_y < mask_h
                {
                    mask.put_pixel(px_x as u32, px_y as u32, Luma([255]));
                }
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }
}

/// Grow every foreground pixel into a square of side `2 * radius + 1`.
pub fn thicken(mask: &GrayImage, radius: u32) -> GrayImage {
    if radius == 0 {
        return mask.clone();
    }
    dilate(mask, Norm::LInf, radius.min(u8::MAX as u32) as u8)
}

/// Options for clip rendering.
#[derive(Debug, Clone)]
pub struct TextRenderOptions {
    /// The text to render.
    pub text: String,
    /// Font size in pixels.
    pub font_size: f32,
    pub color: Color,
    /// Opacity (0.0 to 1.0).
    pub opacity: f32,
}

impl Default for TextRenderOptions {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_size: 15.0,
            color: Color::gray(),
            opacity: 1.0,
        }
    }
}

/// Render text to an RGBA image with a transparent background.
///
/// The canvas is the measured text box plus a 1px margin on each side.
pub fn render_text(font: &FontArc, options: &TextRenderOptions) -> Result<RgbaImage, WatermarkError> {
    validate_text(&options.text)?;

    let scale = PxScale::from(options.font_size);
    let scaled_font = font.as_scaled(scale);

    let (text_w, text_h) = measure_text(font, &options.text, options.font_size, 0);
    let canvas_width = (text_w + 2).max(1);
    let canvas_height = (text_h + 2).max(1);
    let mut image = RgbaImage::new(canvas_width, canvas_height);

    let alpha = (options.opacity.clamp(0.0, 1.0) * 255.0) as u8;
    let baseline_y = 1.0 + scaled_font.ascent();

    let mut cursor_x = 1.0f32;
    let mut prev_glyph: Option<GlyphId> = None;

    for c in options.text.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(prev) = prev_glyph {
            cursor_x += scaled_font.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let x = gx as i32 + bounds.min.x as i32;
                let y = gy as i32 + bounds.min.y as i32;

                if x >= 0 && y >= 0 && x < canvas_width as i32 && y < canvas_height as i32 {
                    let pixel = Rgba([
                        options.color.r,
                        options.color.g,
                        options.color.b,
                        (coverage.min(1.0) * alpha as f32) as u8,
                    ]);
                    let existing = image.get_pixel(x as u32, y as u32);
                    let blended = blend_pixels(*existing, pixel);
                    image.put_pixel(x as u32, y as u32, blended);
                }
            });
        }

        cursor_x += scaled_font.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }

    Ok(image)
}

/// Source-over compositing of two RGBA pixels.
fn blend_pixels(bottom: Rgba<u8>, top: Rgba<u8>) -> Rgba<u8> {
    let top_alpha = top[3] as f32 / 255.0;
    let bottom_alpha = bottom[3] as f32 / 255.0;

    let out_alpha = top_alpha + bottom_alpha * (1.0 - top_alpha);
    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |t: u8, b: u8| -> u8 {
        let t = t as f32 / 255.0;
        let b = b as f32 / 255.0;
        let result = (t * top_alpha + b * bottom_alpha * (1.0 - top_alpha)) / out_alpha;
        (result * 255.0).round() as u8
    };

    Rgba([
        channel(top[0], bottom[0]),
        channel(top[1], bottom[1]),
        channel(top[2], bottom[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}
