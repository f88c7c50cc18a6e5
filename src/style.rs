// src/style.rs

// House style for every figure produced by this crate.
// `fix_plot` is the single place where the publication defaults are assembled;
// TOML files may override any subset of them.

use std::fs;
use std::path::Path;

use log::debug;
use plotters::style::colors::BLACK;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use crate::constants::{
    AXES_LABEL_PAD, AXES_LINE_WIDTH, AXES_MARGIN, COLOR_CYCLE, DEFAULT_DPI,
    DEFAULT_FIGURE_SIZE_IN, FONT_SIZE_BASE, FONT_SIZE_LEGEND, FONT_SIZE_TICK_LABEL,
    MARKER_EDGE_WIDTH, MARKER_SIZE, POINTS_PER_INCH, SUBPLOT_BOTTOM, SUBPLOT_LEFT,
    SUBPLOT_RIGHT, SUBPLOT_TOP, TICK_MAJOR_PAD, TICK_MAJOR_SIZE, TICK_MAJOR_WIDTH,
    TICK_MINOR_SIZE, TICK_MINOR_WIDTH,
};
use crate::error::{PlotError, Result};
use crate::font_config::{FONT_FACE_PREFERRED, FONT_FAMILY_SYSTEM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickDirection {
    In,
    Out,
    InOut,
}

/// How autoscaled limits are chosen when no explicit limits are set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutolimitMode {
    /// Limits hug the data (plus the margin).
    Data,
    /// Limits are widened outwards to the next major tick.
    RoundNumbers,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickStyle {
    pub label_size: f64,
    pub major_size: f64,
    pub minor_size: f64,
    pub major_width: f64,
    pub minor_width: f64,
    pub major_pad: f64,
    pub minor_visible: bool,
    pub direction: TickDirection,
    /// Also draw ticks on the opposite side (top for x, right for y).
    pub mirror: bool,
}

impl Default for TickStyle {
    fn default() -> Self {
        Self {
            label_size: FONT_SIZE_TICK_LABEL,
            major_size: TICK_MAJOR_SIZE,
            minor_size: TICK_MINOR_SIZE,
            major_width: TICK_MAJOR_WIDTH,
            minor_width: TICK_MINOR_WIDTH,
            major_pad: TICK_MAJOR_PAD,
            minor_visible: true,
            direction: TickDirection::In,
            mirror: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendStyle {
    pub frame_alpha: f64,
    pub edge_color: String,
    pub font_size: f64,
}

impl Default for LegendStyle {
    fn default() -> Self {
        Self {
            frame_alpha: 1.0,
            edge_color: "000000".to_string(),
            font_size: FONT_SIZE_LEGEND,
        }
    }
}

/// Position of the main axes as figure fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubplotMargins {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Default for SubplotMargins {
    fn default() -> Self {
        Self {
            left: SUBPLOT_LEFT,
            right: SUBPLOT_RIGHT,
            bottom: SUBPLOT_BOTTOM,
            top: SUBPLOT_TOP,
        }
    }
}

impl SubplotMargins {
    /// `[left, bottom, width, height]` in figure fractions.
    pub fn rect(&self) -> [f64; 4] {
        [
            self.left,
            self.bottom,
            self.right - self.left,
            self.top - self.bottom,
        ]
    }
}

/// Global style applied to new figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotStyle {
    pub font_family: String,
    /// Preferred faces; the first non-empty entry is requested and plotters substitutes
    /// its sans-serif face when it is not installed.
    pub font_sans_serif: Vec<String>,
    pub font_size: f64,
    pub axes_line_width: f64,
    pub axes_label_pad: f64,
    pub color_cycle: Vec<String>,
    pub x_margin: f64,
    pub y_margin: f64,
    pub autolimit_mode: AutolimitMode,
    pub legend: LegendStyle,
    pub xtick: TickStyle,
    pub ytick: TickStyle,
    /// Width and height in inches.
    pub figure_size: (f64, f64),
    pub subplot: SubplotMargins,
    pub marker_size: f64,
    pub marker_edge_width: f64,
    pub dpi: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        fix_plot(DEFAULT_FIGURE_SIZE_IN.0, DEFAULT_FIGURE_SIZE_IN.1)
    }
}

/// Returns the house style for a figure of `lx` by `ly` inches.
pub fn fix_plot(lx: f64, ly: f64) -> PlotStyle {
    PlotStyle {
        font_family: FONT_FAMILY_SYSTEM.to_string(),
        font_sans_serif: vec![FONT_FACE_PREFERRED.to_string()],
        font_size: FONT_SIZE_BASE,
        axes_line_width: AXES_LINE_WIDTH,
        axes_label_pad: AXES_LABEL_PAD,
        color_cycle: COLOR_CYCLE.iter().map(|c| c.to_string()).collect(),
        x_margin: AXES_MARGIN,
        y_margin: AXES_MARGIN,
        autolimit_mode: AutolimitMode::RoundNumbers,
        legend: LegendStyle::default(),
        xtick: TickStyle::default(),
        ytick: TickStyle::default(),
        figure_size: (lx, ly),
        subplot: SubplotMargins::default(),
        marker_size: MARKER_SIZE,
        marker_edge_width: MARKER_EDGE_WIDTH,
        dpi: DEFAULT_DPI,
    }
}

impl PlotStyle {
    /// Parses a TOML document; keys that are absent keep the house defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let style: PlotStyle = toml::from_str(text)?;
        style.validate()?;
        Ok(style)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading plot style from '{}'", path.display());
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }

    /// Rejects styles the renderer cannot honour.
    pub fn validate(&self) -> Result<()> {
        let (lx, ly) = self.figure_size;
        if !(lx > 0.0 && ly > 0.0 && lx.is_finite() && ly.is_finite()) {
            return Err(PlotError::InvalidArgument(format!(
                "figure size must be positive, got ({lx}, {ly})"
            )));
        }
        if self.dpi == 0 {
            return Err(PlotError::InvalidArgument("dpi must be positive".into()));
        }
        let m = &self.subplot;
        let ordered = 0.0 <= m.left && m.left < m.right && m.right <= 1.0;
        let stacked = 0.0 <= m.bottom && m.bottom < m.top && m.top <= 1.0;
        if !(ordered && stacked) {
            return Err(PlotError::InvalidArgument(format!(
                "subplot margins out of order: {m:?}"
            )));
        }
        if self.color_cycle.is_empty() {
            return Err(PlotError::InvalidArgument("color cycle is empty".into()));
        }
        for hex in self.color_cycle.iter().chain(std::iter::once(&self.legend.edge_color)) {
            parse_hex_color(hex)?;
        }
        Ok(())
    }

    /// Colour `index` of the cycle, wrapping around.
    pub fn color(&self, index: usize) -> RGBColor {
        if self.color_cycle.is_empty() {
            return BLACK;
        }
        let hex = &self.color_cycle[index % self.color_cycle.len()];
        parse_hex_color(hex).unwrap_or(BLACK)
    }

    pub fn legend_edge_color(&self) -> RGBColor {
        parse_hex_color(&self.legend.edge_color).unwrap_or(BLACK)
    }

    /// Figure size in pixels at `dpi`.
    pub fn pixel_size(&self, dpi: u32) -> (u32, u32) {
        let (lx, ly) = self.figure_size;
        (
            (lx * dpi as f64).round().max(1.0) as u32,
            (ly * dpi as f64).round().max(1.0) as u32,
        )
    }
}

pub fn points_to_px(points: f64, dpi: u32) -> f64 {
    points * dpi as f64 / POINTS_PER_INCH
}

/// Parses `RRGGBB`, with or without a leading `#`.
pub fn parse_hex_color(hex: &str) -> Result<RGBColor> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(PlotError::InvalidArgument(format!(
            "colour '{hex}' is not of the form RRGGBB"
        )));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| {
            PlotError::InvalidArgument(format!("colour '{hex}' has a non-hex digit"))
        })
    };
    Ok(RGBColor(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
