// src/plot_functions/plot_scatter.rs

use plotters::style::RGBColor;

use crate::axes::{ArtistId, Axes, ScatterArtist};
use crate::constants::SCATTER_SIZE;
use crate::error::{check_xy, Result};
use crate::line_format::Marker;
use crate::plot_functions::plot_line::{apply, Transform};

pub struct ScatterOptions<'a> {
    pub fx: Option<Transform<'a>>,
    pub fy: Option<Transform<'a>>,
    /// Marker area in points squared.
    pub size: f64,
    pub marker: Marker,
    pub label: Option<&'a str>,
    pub color: Option<RGBColor>,
}

impl Default for ScatterOptions<'_> {
    fn default() -> Self {
        Self {
            fx: None,
            fy: None,
            size: SCATTER_SIZE,
            marker: Marker::Circle,
            label: None,
            color: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScatterOutput {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub id: ArtistId,
}

/// Scatters `fy(y)` against `fx(x)`.
pub fn plot_scatter(
    axes: &mut Axes,
    x: &[f64],
    y: &[f64],
    options: &ScatterOptions<'_>,
) -> Result<ScatterOutput> {
    check_xy(x, y)?;
    let tx = apply(x, options.fx);
    let ty = apply(y, options.fy);
    let color = match options.color {
        Some(color) => color,
        None => axes.next_color(),
    };
    let id = axes.scatter(ScatterArtist {
        x: tx.clone(),
        y: ty.clone(),
        color,
        size: options.size,
        marker: options.marker,
        label: options.label.map(str::to_string),
    });
    Ok(ScatterOutput { x: tx, y: ty, id })
}
