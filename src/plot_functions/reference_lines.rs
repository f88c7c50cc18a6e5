// src/plot_functions/reference_lines.rs

// Straight lines spanning the current view, e.g. to mark a threshold.

use plotters::style::RGBColor;

use crate::axes::{ArtistId, Axes, LineArtist};
use crate::error::{PlotError, Result};
use crate::line_format::LineFormat;

fn add_reference_line(
    axes: &mut Axes,
    x: Vec<f64>,
    y: Vec<f64>,
    fmt: &str,
    lw: f64,
    color: Option<RGBColor>,
) -> Result<ArtistId> {
    let format = LineFormat::parse(fmt)?;
    let color = match color.or(format.color) {
        Some(color) => color,
        None => axes.next_color(),
    };
    Ok(axes.plot(LineArtist {
        x,
        y,
        color,
        width: lw,
        format,
        label: None,
    }))
}

/// Vertical line at `x` from the bottom to the top of the current y limits.
pub fn add_vertical_line(
    axes: &mut Axes,
    x: f64,
    fmt: &str,
    lw: f64,
    color: Option<RGBColor>,
) -> Result<ArtistId> {
    if !x.is_finite() {
        return Err(PlotError::InvalidArgument(format!(
            "vertical line position {x} is not finite"
        )));
    }
    let ylim = axes.ylim();
    add_reference_line(axes, vec![x, x], vec![ylim.start, ylim.end], fmt, lw, color)
}

/// Horizontal line at `y` across the current x limits.
pub fn add_horizontal_line(
    axes: &mut Axes,
    y: f64,
    fmt: &str,
    lw: f64,
    color: Option<RGBColor>,
) -> Result<ArtistId> {
    if !y.is_finite() {
        return Err(PlotError::InvalidArgument(format!(
            "horizontal line position {y} is not finite"
        )));
    }
    let xlim = axes.xlim();
    add_reference_line(axes, vec![xlim.start, xlim.end], vec![y, y], fmt, lw, color)
}
