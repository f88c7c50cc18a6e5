// src/font_config.rs

// Font handling for rendered figures.
// Sizes are kept in points and converted to pixels at render time so the same
// style renders consistently at any dpi.

use plotters::style::{FontDesc, IntoFont, RGBColor, TextStyle};

use crate::constants::POINTS_PER_INCH;

/// Generic family name understood by plotters' font lookup
pub const FONT_FAMILY_SYSTEM: &str = "sans-serif";

/// Face requested by the house style when it is installed on the system
pub const FONT_FACE_PREFERRED: &str = "Arial";

/// A font family plus a size in points
#[derive(Debug, Clone, PartialEq)]
pub struct FontStyle {
    pub family: String,
    pub size_pt: f64,
}

impl FontStyle {
    pub fn new(family: &str, size_pt: f64) -> Self {
        Self {
            family: family.to_string(),
            size_pt,
        }
    }

    pub fn size_px(&self, dpi: u32) -> f64 {
        self.size_pt * dpi as f64 / POINTS_PER_INCH
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            family: self.family.clone(),
            size_pt: self.size_pt * factor,
        }
    }

    /// Builds a plotters font for this style at the given dpi.
    pub fn to_font(&self, dpi: u32) -> FontDesc<'_> {
        (self.family.as_str(), self.size_px(dpi).max(1.0)).into_font()
    }

    pub fn to_text_style(&self, dpi: u32, color: &RGBColor) -> TextStyle<'_> {
        self.to_font(dpi).color(color)
    }
}

/// Returns true when plotters can lay out text with the given family.
/// Unknown names resolve to plotters' sans-serif face, so this only fails when
/// no system font can be loaded at all.
pub fn font_available(family: &str) -> bool {
    (family, 12.0).into_font().box_size("0").is_ok()
}

/// Picks the first non-empty face from `preferred`, or `generic` when there is none.
/// A face that is not installed is substituted by plotters at lookup time.
pub fn resolve_family(generic: &str, preferred: &[String]) -> String {
    preferred
        .iter()
        .map(|face| face.trim())
        .find(|face| !face.is_empty())
        .unwrap_or(generic)
        .to_string()
}
