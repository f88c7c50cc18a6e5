// src/figure.rs

use std::fs;
use std::path::Path;

use log::{info, warn};
use plotters::backend::{BitMapBackend, DrawingBackend, SVGBackend};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::style::colors::WHITE;

use crate::axes::Axes;
use crate::error::{PlotError, Result};
use crate::font_config::{font_available, resolve_family};
use crate::plot_framework::{draw_axes, render_err, RenderContext};
use crate::style::PlotStyle;

/// Index of an axes within its figure. The main axes is always `AxesId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId(pub usize);

/// A figure: one main axes at the style's subplot margins plus any insets.
#[derive(Debug, Clone)]
pub struct Figure {
    style: PlotStyle,
    axes: Vec<Axes>,
}

impl Figure {
    pub fn new(style: &PlotStyle) -> Self {
        let main = Axes::new(style.subplot.rect(), style);
        Self {
            style: style.clone(),
            axes: vec![main],
        }
    }

    pub fn style(&self) -> &PlotStyle {
        &self.style
    }

    pub fn main_axes(&self) -> AxesId {
        AxesId(0)
    }

    /// The main axes.
    pub fn ax(&mut self) -> &mut Axes {
        &mut self.axes[0]
    }

    /// Adds empty axes at `[left, bottom, width, height]` in figure fractions.
    pub fn add_axes(&mut self, rect: [f64; 4]) -> Result<AxesId> {
        let axes = Axes::new(rect, &self.style);
        self.insert_axes(axes)
    }

    /// Adds axes that were prepared separately, e.g. an inset built from another axes.
    pub fn insert_axes(&mut self, axes: Axes) -> Result<AxesId> {
        check_rect(axes.rect())?;
        self.axes.push(axes);
        Ok(AxesId(self.axes.len() - 1))
    }

    pub fn axes(&self, id: AxesId) -> Result<&Axes> {
        self.axes.get(id.0).ok_or(PlotError::UnknownAxes(id.0))
    }

    pub fn axes_mut(&mut self, id: AxesId) -> Result<&mut Axes> {
        self.axes.get_mut(id.0).ok_or(PlotError::UnknownAxes(id.0))
    }

    pub fn axes_count(&self) -> usize {
        self.axes.len()
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>, dpi: u32) -> Result<()> {
        root.fill(&WHITE).map_err(render_err)?;
        let family = resolve_family(&self.style.font_family, &self.style.font_sans_serif);
        let text = font_available(&family);
        if !text {
            warn!("No usable font for '{family}'; rendering without text");
        }
        let ctx = RenderContext { dpi, family, text };
        for axes in &self.axes {
            draw_axes(root, axes, &ctx)?;
        }
        Ok(())
    }

    /// Renders the figure at `dpi`; `.svg` paths are written as SVG, anything else as a bitmap.
    pub fn save(&self, path: impl AsRef<Path>, dpi: u32) -> Result<()> {
        let path = path.as_ref();
        if dpi == 0 {
            return Err(PlotError::InvalidArgument("dpi must be positive".into()));
        }
        self.style.validate()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let size = self.style.pixel_size(dpi);
        let is_svg = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);
        if is_svg {
            let root = SVGBackend::new(path, size).into_drawing_area();
            self.draw(&root, dpi)?;
            root.present().map_err(render_err)?;
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            self.draw(&root, dpi)?;
            root.present().map_err(render_err)?;
        }
        info!(
            "Figure saved as '{}' ({}x{} px)",
            path.display(),
            size.0,
            size.1
        );
        Ok(())
    }
}

fn check_rect(rect: [f64; 4]) -> Result<()> {
    let [left, bottom, width, height] = rect;
    if !rect.iter().all(|v| v.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(PlotError::InvalidArgument(format!(
            "axes rectangle {rect:?} needs a positive width and height"
        )));
    }
    if left < 0.0 || bottom < 0.0 || left + width > 1.0 || bottom + height > 1.0 {
        return Err(PlotError::InvalidArgument(format!(
            "axes rectangle {rect:?} does not fit inside the figure"
        )));
    }
    Ok(())
}
