// src/plot_functions/plot_inset.rs

// Zoomed copy of an axes drawn inside the same figure.

use std::ops::Range;

use log::{info, warn};

use crate::axes::{Axes, AxisKind, TickParams};
use crate::constants::{
    INSET_CONTINUITY_THRESHOLD, INSET_MAJOR_STEP, INSET_MINOR_DIVISIONS, INSET_TICK_SCALE,
    LINE_WIDTH_PLOT, SCATTER_SIZE,
};
use crate::error::{PlotError, Result};
use crate::figure::{AxesId, Figure};
use crate::plot_functions::plot_line::{plot_line, LineOptions};
use crate::plot_functions::plot_scatter::{plot_scatter, ScatterOptions};
use crate::scale::{fix_scale, ScaleOptions};
use crate::style::TickStyle;
use crate::ticks::fix_ticks;

#[derive(Debug, Clone)]
pub struct InsetOptions<'a> {
    /// Only parent samples strictly inside this interval set the inset limits.
    pub lim_x: Range<f64>,
    pub lim_y: Option<Range<f64>>,
    pub mult_x: f64,
    pub mult_y: f64,
    pub minor_x: usize,
    pub minor_y: usize,
    pub lw: f64,
    pub size: f64,
    pub fmt: &'a str,
    pub cont_x: f64,
    pub cont_y: f64,
}

impl InsetOptions<'_> {
    pub fn new(lim_x: Range<f64>) -> Self {
        Self {
            lim_x,
            lim_y: None,
            mult_x: INSET_MAJOR_STEP,
            mult_y: INSET_MAJOR_STEP,
            minor_x: INSET_MINOR_DIVISIONS,
            minor_y: INSET_MINOR_DIVISIONS,
            lw: LINE_WIDTH_PLOT,
            size: SCATTER_SIZE,
            fmt: "-",
            cont_x: INSET_CONTINUITY_THRESHOLD,
            cont_y: INSET_CONTINUITY_THRESHOLD,
        }
    }
}

fn shrunk_ticks(tick: &TickStyle) -> TickParams {
    TickParams {
        label_size: Some(tick.label_size / INSET_TICK_SCALE),
        major_length: Some(tick.major_size / INSET_TICK_SCALE),
        minor_length: Some(tick.minor_size / INSET_TICK_SCALE),
    }
}

/// Adds an inset at `rect` holding a copy of every line and scatter of `parent`,
/// with smaller ticks and limits fitted to the parent data inside `lim_x`.
pub fn add_inset(
    figure: &mut Figure,
    parent: AxesId,
    rect: [f64; 4],
    options: &InsetOptions<'_>,
) -> Result<AxesId> {
    let source = figure.axes(parent)?;
    let lines: Vec<_> = source.lines().filter(|l| !l.x.is_empty()).cloned().collect();
    let scatters: Vec<_> = source
        .scatters()
        .filter(|s| !s.x.is_empty())
        .cloned()
        .collect();
    match (lines.is_empty(), scatters.is_empty()) {
        (true, true) => return Err(PlotError::EmptyData),
        (true, false) => warn!("Inset: parent axes {} has no lines to copy", parent.0),
        (false, true) => warn!("Inset: parent axes {} has no scatter to copy", parent.0),
        (false, false) => {}
    }

    // Built off-figure so a failure leaves the figure untouched.
    let mut inset = Axes::new(rect, figure.style());
    let mut all_x = Vec::new();
    let mut all_y = Vec::new();

    for line in &lines {
        let out = plot_line(
            &mut inset,
            &line.x,
            &line.y,
            &LineOptions {
                fmt: options.fmt,
                lw: options.lw,
                cont_x: options.cont_x,
                cont_y: options.cont_y,
                color: Some(line.color),
                ..Default::default()
            },
        )?;
        all_x.extend(out.xb);
        all_y.extend(out.yb);
    }
    for scatter in &scatters {
        let out = plot_scatter(
            &mut inset,
            &scatter.x,
            &scatter.y,
            &ScatterOptions {
                size: options.size,
                marker: scatter.marker,
                color: Some(scatter.color),
                ..Default::default()
            },
        )?;
        all_x.extend(out.x);
        all_y.extend(out.y);
    }

    let style = figure.style();
    inset.tick_params(AxisKind::X, shrunk_ticks(&style.xtick));
    inset.tick_params(AxisKind::Y, shrunk_ticks(&style.ytick));
    fix_ticks(
        &mut inset,
        options.minor_x,
        options.minor_y,
        options.mult_x,
        options.mult_y,
    )?;
    let (xlim, ylim) = fix_scale(
        &mut inset,
        &all_x,
        &all_y,
        &ScaleOptions {
            lim_x: Some(options.lim_x.clone()),
            lim_y: options.lim_y.clone(),
            ..Default::default()
        },
    )?;

    let id = figure.insert_axes(inset)?;
    info!(
        "Inset {} added with {} line(s) and {} scatter(s), x {:?}, y {:?}",
        id.0,
        lines.len(),
        scatters.len(),
        xlim,
        ylim
    );
    Ok(id)
}
