// src/plot_functions/plot_line.rs

use std::ops::Range;

use log::debug;
use nalgebra::DMatrix;
use ndarray::Array1;
use plotters::style::RGBColor;

use crate::axes::{ArtistId, Axes, LineArtist};
use crate::constants::{CONTINUITY_THRESHOLD, FIT_SAMPLES, LINE_WIDTH_PLOT};
use crate::error::{check_xy, PlotError, Result};
use crate::fit::{curve_fit, FitModel, FitOptions, FitResult};
use crate::line_format::LineFormat;
use crate::scale::finite_bounds;
use crate::segment::{flatten, split_at_jumps};

/// Per-sample transform applied to the raw data before plotting.
pub type Transform<'a> = &'a dyn Fn(f64) -> f64;

/// Model fitted to the plotted data and drawn over it.
pub struct FitSpec<'a> {
    pub model: &'a dyn FitModel,
    pub label: Option<&'a str>,
    /// Defaults to the colour of the data.
    pub color: Option<RGBColor>,
    /// Interval the fitted curve is drawn over; the x extent of the data when absent.
    pub range_x: Option<Range<f64>>,
    pub options: FitOptions,
}

impl<'a> FitSpec<'a> {
    pub fn new(model: &'a dyn FitModel) -> Self {
        Self {
            model,
            label: None,
            color: None,
            range_x: None,
            options: FitOptions::default(),
        }
    }
}

pub struct LineOptions<'a> {
    pub fmt: &'a str,
    /// Line width in points.
    pub lw: f64,
    pub fx: Option<Transform<'a>>,
    pub fy: Option<Transform<'a>>,
    pub label: Option<&'a str>,
    pub cont_x: f64,
    pub cont_y: f64,
    pub color: Option<RGBColor>,
    pub fit: Option<FitSpec<'a>>,
}

impl Default for LineOptions<'_> {
    fn default() -> Self {
        Self {
            fmt: "-",
            lw: LINE_WIDTH_PLOT,
            fx: None,
            fy: None,
            label: None,
            cont_x: CONTINUITY_THRESHOLD,
            cont_y: CONTINUITY_THRESHOLD,
            color: None,
            fit: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FitOutput {
    pub popt: Vec<f64>,
    pub pcov: DMatrix<f64>,
    pub xf: Vec<f64>,
    pub yf: Vec<f64>,
    pub lines: Vec<ArtistId>,
}

#[derive(Debug, Clone)]
pub struct LineOutput {
    /// Transformed samples, in plotting order.
    pub xb: Vec<f64>,
    pub yb: Vec<f64>,
    /// One line per continuous run.
    pub lines: Vec<ArtistId>,
    pub fit: Option<FitOutput>,
}

pub(crate) fn apply(values: &[f64], transform: Option<Transform<'_>>) -> Vec<f64> {
    match transform {
        Some(f) => values.iter().map(|v| f(*v)).collect(),
        None => values.to_vec(),
    }
}

/// Plots `fy(y)` against `fx(x)`, breaking the line wherever consecutive samples
/// jump by more than `cont_x` or `cont_y`. Every run shares one colour and only
/// the first carries the label.
pub fn plot_line(
    axes: &mut Axes,
    x: &[f64],
    y: &[f64],
    options: &LineOptions<'_>,
) -> Result<LineOutput> {
    check_xy(x, y)?;
    let format = LineFormat::parse(options.fmt)?;
    let tx = apply(x, options.fx);
    let ty = apply(y, options.fy);

    let runs = split_at_jumps(&tx, &ty, options.cont_x, options.cont_y)?;
    let (xb, yb) = flatten(&runs);

    // Fitting can fail; do it before anything is added to the axes.
    let fitted = match &options.fit {
        Some(spec) => Some(fit_curve(spec, &xb, &yb)?),
        None => None,
    };

    let color = match options.color.or(format.color) {
        Some(color) => color,
        None => axes.next_color(),
    };
    let lines: Vec<ArtistId> = runs
        .into_iter()
        .enumerate()
        .map(|(i, run)| {
            axes.plot(LineArtist {
                x: run.x,
                y: run.y,
                color,
                width: options.lw,
                format,
                label: if i == 0 {
                    options.label.map(str::to_string)
                } else {
                    None
                },
            })
        })
        .collect();
    debug!("Plotted {} samples as {} line(s)", xb.len(), lines.len());

    let fit = match (&options.fit, fitted) {
        (Some(spec), Some(curve)) => Some(plot_fit(axes, spec, curve, color, options)?),
        _ => None,
    };

    Ok(LineOutput { xb, yb, lines, fit })
}

struct FittedCurve {
    result: FitResult,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

fn fit_curve(spec: &FitSpec<'_>, x: &[f64], y: &[f64]) -> Result<FittedCurve> {
    let result = curve_fit(spec.model, x, y, &spec.options)?;
    let range = match &spec.range_x {
        Some(range) => range.clone(),
        None => {
            let (lo, hi) = finite_bounds(x)?;
            lo..hi
        }
    };
    if !(range.start.is_finite() && range.end.is_finite()) {
        return Err(PlotError::InvalidArgument(format!(
            "fit range {range:?} is not finite"
        )));
    }
    let xs = Array1::<f64>::linspace(range.start, range.end, FIT_SAMPLES).to_vec();
    let ys: Vec<f64> = xs.iter().map(|v| result.eval(spec.model, *v)).collect();
    Ok(FittedCurve { result, xs, ys })
}

fn plot_fit(
    axes: &mut Axes,
    spec: &FitSpec<'_>,
    curve: FittedCurve,
    data_color: RGBColor,
    options: &LineOptions<'_>,
) -> Result<FitOutput> {
    // The samples are already transformed; only the thresholds carry over.
    let drawn = plot_line(
        axes,
        &curve.xs,
        &curve.ys,
        &LineOptions {
            fmt: "--",
            lw: options.lw,
            label: spec.label,
            cont_x: options.cont_x,
            cont_y: options.cont_y,
            color: Some(spec.color.unwrap_or(data_color)),
            ..Default::default()
        },
    )?;

    Ok(FitOutput {
        popt: curve.result.popt,
        pcov: curve.result.pcov,
        xf: drawn.xb,
        yf: drawn.yb,
        lines: drawn.lines,
    })
}
