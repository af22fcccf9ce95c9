//! Text watermark compositor.
//!
//! Draws the watermark text three times (at a quarter, half and three
//! quarters of the image height) into a mask, inverts the mask, and blends
//! it channel by channel into the source:
//!
//! ```text
//! out = clamp(round(alpha * src + beta * mask + gamma), 0, 255)
//! ```
//!
//! With the default weights a uniform 128 gray becomes 167 away from the
//! text and 107 under it.
//!
//! # Example
//!
//! ```ignore
//! use watermarker::watermark::Compositor;
//!
//! let compositor = Compositor::new()?;
//! let marked = compositor.overlay_text(&image, "CONFIDENTIAL")?;
//! assert_eq!(marked.dimensions(), image.dimensions());
//! ```

use super::config::{BlendWeights, WatermarkConfig};
use super::layout::{baselines, plan_layout, WatermarkSpec};
use super::text_renderer::{default_font, draw_text_mask, load_font_file, thicken, validate_text};
use super::WatermarkError;
use ab_glyph::FontArc;
use image::{GrayImage, Rgb, RgbImage};
use tracing::debug;

/// Gray level the text is drawn with before inversion.
pub const MASK_INK: u8 = 200;

/// Applies text watermarks to RGB images.
///
/// Holds only an immutable font handle and blend weights, so one instance
/// can serve any number of threads.
#[derive(Clone)]
pub struct Compositor {
    font: FontArc,
    weights: BlendWeights,
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("weights", &self.weights)
            .finish_non_exhaustive()
    }
}

impl Compositor {
    /// Compositor with the embedded font and default weights.
    pub fn new() -> Result<Self, WatermarkError> {
        Ok(Self::with_font(default_font()?))
    }

    pub fn with_font(font: FontArc) -> Self {
        Self {
            font,
            weights: BlendWeights::default(),
        }
    }

    pub fn with_weights(mut self, weights: BlendWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Build from configuration, loading the font file when one is set.
    pub fn from_config(config: &WatermarkConfig) -> Result<Self, WatermarkError> {
        let font = match &config.font_path {
            Some(path) => load_font_file(path)?,
            None => default_font()?,
        };
        Ok(Self::with_font(font).with_weights(config.blend))
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }

    pub fn weights(&self) -> BlendWeights {
        self.weights
    }

    /// Size and place `text` for an image `width` pixels wide.
    pub fn plan(&self, text: &str, width: u32) -> Result<WatermarkSpec, WatermarkError> {
        validate_text(text)?;
        plan_layout(&self.font, text, width)
    }

    /// Build the inverted watermark mask for a `width` x `height` image.
    ///
    /// Background pixels are 255 and text pixels are `255 - MASK_INK`.
    pub fn build_mask(&self, text: &str, spec: &WatermarkSpec, width: u32, height: u32) -> RgbImage {
        let mut ink = GrayImage::new(width, height);
        let px = spec.font_scale.px();
        let x = spec.glyph_x();

        for baseline_y in baselines(height) {
            draw_text_mask(&mut ink, &self.font, text, px, x, baseline_y);
        }

        let ink = thicken(&ink, spec.stroke_radius());

        RgbImage::from_fn(width, height, |x, y| {
            let drawn = if ink.get_pixel(x, y)[0] > 0 { MASK_INK } else { 0 };
            let inverted = 255 - drawn;
            Rgb([inverted, inverted, inverted])
        })
    }

    /// Overlay `text` onto `image`, returning a new image of the same size.
    pub fn overlay_text(&self, image: &RgbImage, text: &str) -> Result<RgbImage, WatermarkError> {
        let (width, height) = image.dimensions();
        let spec = self.plan(text, width)?;
        let mask = self.build_mask(text, &spec, width, height);

        debug!(
            width,
            height,
            scale = %spec.font_scale,
            thickness = spec.thickness,
            origin_x = spec.origin_x,
            "Compositing text watermark"
        );

        blend(image, &mask, self.weights)
    }
}

/// Per-channel weighted sum of two equally sized images.
pub fn blend(
    src: &RgbImage,
    mask: &RgbImage,
    weights: BlendWeights,
) -> Result<RgbImage, WatermarkError> {
    if src.dimensions() != mask.dimensions() {
        return Err(WatermarkError::Composite(format!(
            "mask is {}x{} but image is {}x{}",
            mask.width(),
            mask.height(),
            src.width(),
            src.height()
        )));
    }

    let mut out = RgbImage::new(src.width(), src.height());
    for ((o, s), m) in out.pixels_mut().zip(src.pixels()).zip(mask.pixels()) {
        for c in 0..3 {
            let value = weights.alpha * s[c] as f32 + weights.beta * m[c] as f32 + weights.gamma;
            o[c] = value.round().clamp(0.0, 255.0) as u8;
        }
    }
    Ok(out)
}

/// Overlay `text` with the embedded font and default blend weights.
pub fn overlay_text(image: &RgbImage, text: &str) -> Result<RgbImage, WatermarkError> {
    Compositor::new()?.overlay_text(image, text)
}
