//! Watermark placement.
//!
//! Turns an image size and a text into a [`WatermarkSpec`]: the font scale
//! after shrink-to-fit, the stroke thickness, the measured text width and the
//! horizontal origin shared by the three watermark lines.

use super::sizing::{font_metrics_for_width, stroke_radius, FontScale};
use super::text_renderer::measure_text;
use super::WatermarkError;
use ab_glyph::FontArc;
use tracing::debug;

/// Fractions of the image height (in percent) where the baselines sit.
pub const BASELINE_PERCENTS: [u32; 3] = [25, 50, 75];

/// Geometry of one watermark application, derived per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatermarkSpec {
    pub font_scale: FontScale,
    pub thickness: u32,
    /// Rendered width including the stroke on both sides.
    pub text_width: u32,
    /// Left edge of every line.
    pub origin_x: i32,
}

impl WatermarkSpec {
    /// Dilation radius applied to the glyph mask.
    pub fn stroke_radius(&self) -> u32 {
        stroke_radius(self.thickness)
    }

    /// Glyph origin x; the stroke extends `stroke_radius` to its left.
    pub fn glyph_x(&self) -> i32 {
        self.origin_x + self.stroke_radius() as i32
    }
}

/// Baseline rows for an image `height` pixels tall.
pub fn baselines(height: u32) -> [i32; 3] {
    BASELINE_PERCENTS.map(|pct| (height as u64 * pct as u64 / 100) as i32)
}

/// Pick the largest scale, starting from the width ladder, at which `text`
/// fits inside `image_width`.
///
/// Each step shrinks the scale by 0.1. Fails with [`WatermarkError::Layout`]
/// when even a scale of 0.1 is too wide.
pub fn plan_layout(
    font: &FontArc,
    text: &str,
    image_width: u32,
) -> Result<WatermarkSpec, WatermarkError> {
    let metrics = font_metrics_for_width(image_width);
    let radius = stroke_radius(metrics.thickness);

    let mut scale = metrics.scale;
    let mut probes = 0u32;

    loop {
        probes += 1;
        let (text_width, _) = measure_text(font, text, scale.px(), radius);

        if text_width <= image_width {
            let origin_x = ((image_width - text_width) / 2) as i32;
            debug!(
                image_width,
                start_scale = %metrics.scale,
                scale = %scale,
                thickness = metrics.thickness,
                text_width,
                origin_x,
                probes,
                "Planned watermark layout"
            );
            return Ok(WatermarkSpec {
                font_scale: scale,
                thickness: metrics.thickness,
                text_width,
                origin_x,
            });
        }

        scale = scale.shrink().ok_or(WatermarkError::Layout {
            width: image_width,
            text_len: text.chars().count(),
        })?;
    }
}
