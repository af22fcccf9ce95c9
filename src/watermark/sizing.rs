//! Font metric selection.
//!
//! The watermark font scale and stroke thickness are a step function of the
//! image width alone, chosen from a fixed table of tiers.

/// Pixels per em at a scale of 1.0.
pub const PX_PER_SCALE: f32 = 30.0;

/// Width tiers, widest first: (minimum width, scale in tenths, thickness).
const FONT_LADDER: [(u32, u32, u32); 6] = [
    (5000, 101, 30),
    (4000, 81, 25),
    (3000, 61, 18),
    (2000, 41, 11),
    (1000, 21, 5),
    (0, 11, 2),
];

/// A font scale held in tenths so that shrinking by 0.1 is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontScale(u32);

impl FontScale {
    pub const fn from_tenths(tenths: u32) -> Self {
        Self(tenths)
    }

    pub fn tenths(&self) -> u32 {
        self.0
    }

    pub fn as_f32(&self) -> f32 {
        self.0 as f32 / 10.0
    }

    /// Font size in pixels per em.
    pub fn px(&self) -> f32 {
        self.as_f32() * PX_PER_SCALE
    }

    /// The next smaller scale, or `None` once the scale would reach zero.
    pub fn shrink(&self) -> Option<Self> {
        match self.0 {
            0 | 1 => None,
            n => Some(Self(n - 1)),
        }
    }
}

impl std::fmt::Display for FontScale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Starting scale and stroke thickness for an image width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub scale: FontScale,
    pub thickness: u32,
}

/// Pick the starting font metrics for an image `width` pixels wide.
pub fn font_metrics_for_width(width: u32) -> FontMetrics {
    let (_, tenths, thickness) = FONT_LADDER
        .iter()
        .copied()
        .find(|(min_width, _, _)| width >= *min_width)
        .unwrap_or(FONT_LADDER[FONT_LADDER.len() - 1]);

    FontMetrics {
        scale: FontScale::from_tenths(tenths),
        thickness,
    }
}

/// Radius of the square dilation that gives glyphs their stroke weight.
pub fn stroke_radius(thickness: u32) -> u32 {
    thickness / 4
}
