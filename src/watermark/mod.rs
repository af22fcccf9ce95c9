//! Text watermarking for raster images.
//!
//! The pipeline for one image:
//!
//! 1. **Sizing**: pick a starting font scale and stroke thickness from the
//!    image width ([`sizing`]).
//! 2. **Layout**: shrink the scale in 0.1 steps until the text fits, then
//!    center it horizontally ([`layout`]).
//! 3. **Mask**: draw the text at 25%, 50% and 75% of the height, widen the
//!    strokes and invert ([`compositor`]).
//! 4. **Blend**: weighted per-channel sum of source and mask.
//!
//! # Configuration Example
//!
//! ```yaml
//! watermark:
//!   font_path: /usr/share/fonts/truetype/dejavu/DejaVuSerif.ttf
//!   blend:
//!     alpha: 0.7
//!     beta: 0.3
//!     gamma: 0.5
//! ```

pub mod compositor;
pub mod config;
pub mod error;
pub mod layout;
pub mod sizing;
pub mod text_renderer;

pub use compositor::{blend, overlay_text, Compositor, MASK_INK};
pub use config::{BlendWeights, WatermarkConfig};
pub use error::WatermarkError;
pub use layout::{baselines, plan_layout, WatermarkSpec};
pub use sizing::{font_metrics_for_width, FontMetrics, FontScale};
pub use text_renderer::{
    default_font, measure_text, parse_hex_color, render_text, validate_text, Color,
    TextRenderOptions,
};
