// src/axes.rs

// Retained-mode axes. Artists are recorded here and only turned into pixels
// when the owning figure is saved, so limits and ticks can still be changed
// after the data has been added, and insets can copy what an axes holds.

use std::ops::Range;

use plotters::style::RGBColor;

use crate::font_config::FontStyle;
use crate::line_format::{LineFormat, Marker};
use crate::style::{AutolimitMode, PlotStyle};
use crate::ticks::{MajorLocator, MinorLocator, TickFormatter};

const NONSINGULAR_EXPANDER: f64 = 0.05;
const ROUND_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    X,
    Y,
}

/// Index of an artist within its axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtistId(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub struct LineArtist {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: RGBColor,
    /// Stroke width in points.
    pub width: f64,
    pub format: LineFormat,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterArtist {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub color: RGBColor,
    /// Marker area in points squared.
    pub size: f64,
    pub marker: Marker,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    Line(LineArtist),
    Scatter(ScatterArtist),
}

impl Artist {
    pub fn data(&self) -> (&[f64], &[f64]) {
        match self {
            Artist::Line(line) => (&line.x, &line.y),
            Artist::Scatter(scatter) => (&scatter.x, &scatter.y),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Artist::Line(line) => line.label.as_deref(),
            Artist::Scatter(scatter) => scatter.label.as_deref(),
        }
    }
}

/// Partial update of an axis' tick appearance, sizes in points.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickParams {
    pub label_size: Option<f64>,
    pub major_length: Option<f64>,
    pub minor_length: Option<f64>,
}

/// Per-axis state.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisState {
    pub limits: Option<Range<f64>>,
    pub major: MajorLocator,
    pub minor: MinorLocator,
    pub formatter: TickFormatter,
    pub label: Option<String>,
    /// Font of the axis title; the style's base font when unset.
    pub label_font: Option<FontStyle>,
    pub label_size: f64,
    pub major_length: f64,
    pub minor_length: f64,
}

impl AxisState {
    fn from_style(tick: &crate::style::TickStyle) -> Self {
        Self {
            limits: None,
            major: MajorLocator::Auto,
            minor: if tick.minor_visible {
                MinorLocator::Auto
            } else {
                MinorLocator::Null
            },
            formatter: TickFormatter::Auto,
            label: None,
            label_font: None,
            label_size: tick.label_size,
            major_length: tick.major_size,
            minor_length: tick.minor_size,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Axes {
    rect: [f64; 4],
    style: PlotStyle,
    x: AxisState,
    y: AxisState,
    artists: Vec<Artist>,
    color_index: usize,
    legend: bool,
}

impl Axes {
    /// Axes at `[left, bottom, width, height]` in figure fractions.
    pub fn new(rect: [f64; 4], style: &PlotStyle) -> Self {
        Self {
            rect,
            style: style.clone(),
            x: AxisState::from_style(&style.xtick),
            y: AxisState::from_style(&style.ytick),
            artists: Vec::new(),
            color_index: 0,
            legend: false,
        }
    }

    pub fn rect(&self) -> [f64; 4] {
        self.rect
    }

    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    pub fn axis(&self, kind: AxisKind) -> &AxisState {
        match kind {
            AxisKind::X => &self.x,
            AxisKind::Y => &self.y,
        }
    }

    fn axis_mut(&mut self, kind: AxisKind) -> &mut AxisState {
        match kind {
            AxisKind::X => &mut self.x,
            AxisKind::Y => &mut self.y,
        }
    }

    /// Next colour of the cycle; each call advances the cycle.
    pub fn next_color(&mut self) -> RGBColor {
        let color = self.style.color(self.color_index);
        self.color_index += 1;
        color
    }

    pub fn plot(&mut self, line: LineArtist) -> ArtistId {
        self.artists.push(Artist::Line(line));
        ArtistId(self.artists.len() - 1)
    }

    pub fn scatter(&mut self, scatter: ScatterArtist) -> ArtistId {
        self.artists.push(Artist::Scatter(scatter));
        ArtistId(self.artists.len() - 1)
    }

    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn artist(&self, id: ArtistId) -> Option<&Artist> {
        self.artists.get(id.0)
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineArtist> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Line(line) => Some(line),
            Artist::Scatter(_) => None,
        })
    }

    pub fn scatters(&self) -> impl Iterator<Item = &ScatterArtist> {
        self.artists.iter().filter_map(|a| match a {
            Artist::Scatter(scatter) => Some(scatter),
            Artist::Line(_) => None,
        })
    }

    pub fn set_xlim(&mut self, limits: Range<f64>) {
        self.x.limits = Some(limits);
    }

    pub fn set_ylim(&mut self, limits: Range<f64>) {
        self.y.limits = Some(limits);
    }

    pub fn xlim(&self) -> Range<f64> {
        self.limits(AxisKind::X)
    }

    pub fn ylim(&self) -> Range<f64> {
        self.limits(AxisKind::Y)
    }

    /// Explicit limits when set, otherwise limits autoscaled from the artists.
    pub fn limits(&self, kind: AxisKind) -> Range<f64> {
        match &self.axis(kind).limits {
            Some(limits) => limits.clone(),
            None => self.autoscale(kind),
        }
    }

    /// Min and max of the artists' data along one axis, ignoring NaN.
    pub fn data_bounds(&self, kind: AxisKind) -> Option<(f64, f64)> {
        self.artists
            .iter()
            .flat_map(|artist| {
                let (x, y) = artist.data();
                match kind {
                    AxisKind::X => x.iter(),
                    AxisKind::Y => y.iter(),
                }
            })
            .filter(|v| v.is_finite())
            .fold(None, |acc, &v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    fn autoscale(&self, kind: AxisKind) -> Range<f64> {
        let Some((mut lo, mut hi)) = self.data_bounds(kind) else {
            return 0.0..1.0;
        };
        let margin = match kind {
            AxisKind::X => self.style.x_margin,
            AxisKind::Y => self.style.y_margin,
        };
        let span = hi - lo;
        lo -= span * margin;
        hi += span * margin;
        if hi - lo <= f64::EPSILON * lo.abs().max(hi.abs()) {
            let expand = if lo == 0.0 {
                NONSINGULAR_EXPANDER
            } else {
                NONSINGULAR_EXPANDER * lo.abs()
            };
            lo -= expand;
            hi += expand;
        }
        if self.style.autolimit_mode == AutolimitMode::RoundNumbers {
            let step = self.axis(kind).major.step(lo, hi);
            if step.is_finite() && step > 0.0 {
                lo = ((lo / step) + ROUND_TOLERANCE).floor() * step;
                hi = ((hi / step) - ROUND_TOLERANCE).ceil() * step;
            }
        }
        lo..hi
    }

    pub fn set_major_locator(&mut self, kind: AxisKind, locator: MajorLocator) {
        self.axis_mut(kind).major = locator;
    }

    pub fn set_minor_locator(&mut self, kind: AxisKind, locator: MinorLocator) {
        self.axis_mut(kind).minor = locator;
    }

    pub fn set_formatter(&mut self, kind: AxisKind, formatter: TickFormatter) {
        self.axis_mut(kind).formatter = formatter;
    }

    pub fn set_label(&mut self, kind: AxisKind, label: &str) {
        self.axis_mut(kind).label = Some(label.to_string());
    }

    pub fn set_label_font(&mut self, kind: AxisKind, font: Option<FontStyle>) {
        self.axis_mut(kind).label_font = font;
    }

    pub fn set_xlabel(&mut self, label: &str) {
        self.set_label(AxisKind::X, label);
    }

    pub fn set_ylabel(&mut self, label: &str) {
        self.set_label(AxisKind::Y, label);
    }

    pub fn tick_params(&mut self, kind: AxisKind, params: TickParams) {
        let axis = self.axis_mut(kind);
        if let Some(size) = params.label_size {
            axis.label_size = size;
        }
        if let Some(length) = params.major_length {
            axis.major_length = length;
        }
        if let Some(length) = params.minor_length {
            axis.minor_length = length;
        }
    }

    /// Draw a legend for the labelled artists when the figure is saved.
    pub fn legend(&mut self) {
        self.legend = true;
    }

    pub fn has_legend(&self) -> bool {
        self.legend
    }
}
