// src/plot_framework.rs

// Turns a recorded `Axes` into pixels with plotters.
// Data coordinates are mapped through a cartesian chart built on the axes'
// pixel rectangle; frame, ticks, labels, markers and legend are drawn directly
// on the root area in backend pixel coordinates so their sizes follow the
// style (points at the figure dpi) instead of plotters' defaults.

use std::ops::Range;

use log::debug;
use plotters::backend::DrawingBackend;
use plotters::chart::{ChartBuilder, ChartContext};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingArea;
use plotters::element::{Circle, PathElement, Polygon, Rectangle, Text};
use plotters::series::LineSeries;
use plotters::style::colors::{BLACK, WHITE};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{Color, FontTransform, RGBColor, TextStyle};

use crate::axes::{Artist, Axes, AxisKind, AxisState};
use crate::constants::{LEGEND_BORDER_PAD, LEGEND_HANDLE_LENGTH};
use crate::error::{PlotError, Result};
use crate::font_config::FontStyle;
use crate::line_format::{LineStyle, Marker};
use crate::style::{points_to_px, TickDirection, TickStyle};

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;
type Pixel = (i32, i32);

pub fn render_err<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Render(err.to_string())
}

/// Pixel rectangle of an axes given as `[left, bottom, width, height]` figure fractions.
pub fn axes_pixel_rect(rect: [f64; 4], figure_px: (u32, u32)) -> (Pixel, (u32, u32)) {
    let (w, h) = (figure_px.0 as f64, figure_px.1 as f64);
    let left = (rect[0] * w).round() as i32;
    let top = ((1.0 - rect[1] - rect[3]) * h).round() as i32;
    let width = (rect[2] * w).round().max(1.0) as u32;
    let height = (rect[3] * h).round().max(1.0) as u32;
    ((left, top), (width, height))
}

fn non_degenerate(range: Range<f64>) -> Range<f64> {
    if range.end == range.start {
        let expand = if range.start == 0.0 { 0.5 } else { range.start.abs() * 0.05 };
        (range.start - expand)..(range.end + expand)
    } else {
        range
    }
}

/// Clips a polyline to the view box. NaN samples split the line.
pub fn clip_polyline(
    points: &[(f64, f64)],
    x_range: &Range<f64>,
    y_range: &Range<f64>,
) -> Vec<Vec<(f64, f64)>> {
    let (x_lo, x_hi) = (x_range.start.min(x_range.end), x_range.start.max(x_range.end));
    let (y_lo, y_hi) = (y_range.start.min(y_range.end), y_range.start.max(y_range.end));
    let mut pieces = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for pair in points.windows(2) {
        let (p, q) = (pair[0], pair[1]);
        if [p.0, p.1, q.0, q.1].iter().any(|v| v.is_nan()) {
            flush(&mut current, &mut pieces);
            continue;
        }
        match clip_segment(p, q, x_lo, x_hi, y_lo, y_hi) {
            Some((a, b)) => {
                if current.last() != Some(&a) {
                    flush(&mut current, &mut pieces);
                    current.push(a);
                }
                current.push(b);
                if b != q {
                    flush(&mut current, &mut pieces);
                }
            }
            None => flush(&mut current, &mut pieces),
        }
    }
    flush(&mut current, &mut pieces);
    pieces
}

fn flush(current: &mut Vec<(f64, f64)>, pieces: &mut Vec<Vec<(f64, f64)>>) {
    if current.len() >= 2 {
        pieces.push(std::mem::take(current));
    } else {
        current.clear();
    }
}

/// Liang-Barsky clipping of one segment.
fn clip_segment(
    p: (f64, f64),
    q: (f64, f64),
    x_lo: f64,
    x_hi: f64,
    y_lo: f64,
    y_hi: f64,
) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (q.0 - p.0, q.1 - p.1);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;
    for (denom, num) in [
        (-dx, p.0 - x_lo),
        (dx, x_hi - p.0),
        (-dy, p.1 - y_lo),
        (dy, y_hi - p.1),
    ] {
        if denom == 0.0 {
            if num < 0.0 {
                return None;
            }
        } else {
            let t = num / denom;
            if denom < 0.0 {
                if t > t1 {
                    return None;
                }
                t0 = t0.max(t);
            } else {
                if t < t0 {
                    return None;
                }
                t1 = t1.min(t);
            }
        }
    }
    let at = |t: f64| {
        if t == 0.0 {
            p
        } else if t == 1.0 {
            q
        } else {
            (p.0 + t * dx, p.1 + t * dy)
        }
    };
    Some((at(t0), at(t1)))
}

/// Cuts a pixel-space polyline into the "on" pieces of a dash pattern.
pub fn dash_polyline(points: &[(f64, f64)], pattern: &[f64]) -> Vec<Vec<(f64, f64)>> {
    if pattern.is_empty() || pattern.iter().any(|len| !(*len > 0.0)) {
        return vec![points.to_vec()];
    }
    let mut dashes = Vec::new();
    let mut index = 0;
    let mut remaining = pattern[0];
    let mut current: Vec<(f64, f64)> = points.first().copied().into_iter().collect();

    for pair in points.windows(2) {
        let (mut p, q) = (pair[0], pair[1]);
        let mut seg_len = ((q.0 - p.0).powi(2) + (q.1 - p.1).powi(2)).sqrt();
        while seg_len > remaining {
            let t = remaining / seg_len;
            let cut = (p.0 + t * (q.0 - p.0), p.1 + t * (q.1 - p.1));
            if index % 2 == 0 {
                current.push(cut);
                dashes.push(std::mem::take(&mut current));
            } else {
                current = vec![cut];
            }
            seg_len -= remaining;
            p = cut;
            index = (index + 1) % pattern.len();
            remaining = pattern[index];
        }
        remaining -= seg_len;
        if index % 2 == 0 {
            current.push(q);
        }
    }
    if index % 2 == 0 && current.len() >= 2 {
        dashes.push(current);
    }
    dashes
}

/// Resolved fonts and dpi shared by everything drawn for one figure.
pub struct RenderContext {
    pub dpi: u32,
    pub family: String,
    /// False when no font could be loaded; text is then left out.
    pub text: bool,
}

impl RenderContext {
    fn px(&self, points: f64) -> f64 {
        points_to_px(points, self.dpi)
    }

    fn stroke(&self, points: f64) -> u32 {
        self.px(points).round().max(1.0) as u32
    }

    fn font(&self, size_pt: f64) -> FontStyle {
        FontStyle::new(&self.family, size_pt)
    }
}

fn text_size<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    ctx: &RenderContext,
    text: &str,
    style: &TextStyle,
) -> Result<(u32, u32)> {
    if !ctx.text {
        return Ok((0, 0));
    }
    root.estimate_text_size(text, style).map_err(render_err)
}

fn draw_text<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    ctx: &RenderContext,
    text: &str,
    pos: Pixel,
    style: &TextStyle,
) -> Result<()> {
    if !ctx.text {
        return Ok(());
    }
    root.draw(&Text::new(text, pos, style.clone()))
        .map_err(render_err)
}

fn draw_marker<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    marker: Marker,
    center: Pixel,
    radius: i32,
    color: &RGBColor,
    stroke: u32,
) -> Result<()> {
    let (x, y) = center;
    let r = radius.max(1);
    let stroke_path = |points: Vec<Pixel>| {
        root.draw(&PathElement::new(points, color.stroke_width(stroke)))
            .map_err(render_err)
    };
    match marker {
        Marker::Point => root
            .draw(&Circle::new(center, (r / 2).max(1), color.filled()))
            .map_err(render_err),
        Marker::Circle => root
            .draw(&Circle::new(center, r, color.filled()))
            .map_err(render_err),
        Marker::Square => root
            .draw(&Rectangle::new(
                [(x - r, y - r), (x + r, y + r)],
                color.filled(),
            ))
            .map_err(render_err),
        Marker::TriangleUp => root
            .draw(&Polygon::new(
                vec![(x, y - r), (x - r, y + r), (x + r, y + r)],
                color.filled(),
            ))
            .map_err(render_err),
        Marker::TriangleDown => root
            .draw(&Polygon::new(
                vec![(x, y + r), (x - r, y - r), (x + r, y - r)],
                color.filled(),
            ))
            .map_err(render_err),
        Marker::Plus => {
            stroke_path(vec![(x - r, y), (x + r, y)])?;
            stroke_path(vec![(x, y - r), (x, y + r)])
        }
        Marker::Cross => {
            stroke_path(vec![(x - r, y - r), (x + r, y + r)])?;
            stroke_path(vec![(x - r, y + r), (x + r, y - r)])
        }
        Marker::Star => {
            stroke_path(vec![(x - r, y), (x + r, y)])?;
            stroke_path(vec![(x, y - r), (x, y + r)])?;
            stroke_path(vec![(x - r, y - r), (x + r, y + r)])?;
            stroke_path(vec![(x - r, y + r), (x + r, y - r)])
        }
    }
}

fn to_pixel(point: (f64, f64)) -> Pixel {
    (point.0.round() as i32, point.1.round() as i32)
}

fn backend_f64<DB: DrawingBackend>(chart: &Chart<'_, DB>, point: (f64, f64)) -> (f64, f64) {
    let (x, y) = chart.backend_coord(&point);
    (x as f64, y as f64)
}

fn within(range: &Range<f64>, v: f64) -> bool {
    let (lo, hi) = (range.start.min(range.end), range.start.max(range.end));
    v >= lo && v <= hi
}

fn draw_artists<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &mut Chart<'_, DB>,
    axes: &Axes,
    ctx: &RenderContext,
    x_range: &Range<f64>,
    y_range: &Range<f64>,
) -> Result<()> {
    let style = axes.style();
    for artist in axes.artists() {
        match artist {
            Artist::Line(line) => {
                let points: Vec<(f64, f64)> =
                    line.x.iter().copied().zip(line.y.iter().copied()).collect();
                let stroke = ctx.stroke(line.width);
                let pieces = clip_polyline(&points, x_range, y_range);
                match line.format.line_style {
                    LineStyle::None => {}
                    LineStyle::Solid => {
                        for piece in pieces {
                            chart
                                .draw_series(LineSeries::new(piece, line.color.stroke_width(stroke)))
                                .map_err(render_err)?;
                        }
                    }
                    dashed => {
                        let pattern: Vec<f64> = dashed
                            .dash_pattern()
                            .unwrap_or(&[])
                            .iter()
                            .map(|len| len * ctx.px(line.width))
                            .collect();
                        for piece in pieces {
                            let pixels: Vec<(f64, f64)> =
                                piece.iter().map(|p| backend_f64(chart, *p)).collect();
                            for dash in dash_polyline(&pixels, &pattern) {
                                root.draw(&PathElement::new(
                                    dash.into_iter().map(to_pixel).collect::<Vec<_>>(),
                                    line.color.stroke_width(stroke),
                                ))
                                .map_err(render_err)?;
                            }
                        }
                    }
                }
                if let Some(marker) = line.format.marker {
                    let radius = (ctx.px(style.marker_size) / 2.0).round() as i32;
                    let edge = ctx.stroke(style.marker_edge_width);
                    for &(x, y) in points
                        .iter()
                        .filter(|(x, y)| within(x_range, *x) && within(y_range, *y))
                    {
                        let center = chart.backend_coord(&(x, y));
                        draw_marker(root, marker, center, radius, &line.color, edge)?;
                    }
                }
            }
            Artist::Scatter(scatter) => {
                let radius = (ctx.px(scatter.size.max(0.0).sqrt()) / 2.0).round() as i32;
                let edge = ctx.stroke(style.marker_edge_width);
                for (&x, &y) in scatter.x.iter().zip(&scatter.y) {
                    if within(x_range, x) && within(y_range, y) {
                        draw_marker(
                            root,
                            scatter.marker,
                            chart.backend_coord(&(x, y)),
                            radius,
                            &scatter.color,
                            edge,
                        )?;
                    }
                }
            }
        }
    }
    Ok(())
}

/// Tick mark endpoints for one side of the frame, `inward` pointing into the axes.
fn tick_span(base: i32, length: i32, inward: i32, direction: TickDirection) -> (i32, i32) {
    match direction {
        TickDirection::In => (base, base + inward * length),
        TickDirection::Out => (base - inward * length, base),
        TickDirection::InOut => (base - inward * length / 2, base + inward * length / 2),
    }
}

fn outward_extent(length: i32, direction: TickDirection) -> i32 {
    match direction {
        TickDirection::In => 0,
        TickDirection::Out => length,
        TickDirection::InOut => length / 2,
    }
}

struct AxisTicks {
    major: Vec<f64>,
    minor: Vec<f64>,
}

fn axis_ticks(axis: &AxisState, tick_style: &TickStyle, range: &Range<f64>) -> AxisTicks {
    let (lo, hi) = (range.start.min(range.end), range.start.max(range.end));
    let major = axis.major.ticks(lo, hi);
    let minor = if tick_style.minor_visible {
        axis.minor.ticks(axis.major.step(lo, hi), lo, hi)
    } else {
        Vec::new()
    };
    AxisTicks { major, minor }
}

#[allow(clippy::too_many_arguments)]
fn draw_frame_and_ticks<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Chart<'_, DB>,
    axes: &Axes,
    ctx: &RenderContext,
    origin: Pixel,
    size: (u32, u32),
    x_range: &Range<f64>,
    y_range: &Range<f64>,
) -> Result<()> {
    let style = axes.style();
    let (left, top) = origin;
    let (right, bottom) = (left + size.0 as i32, top + size.1 as i32);
    let frame_width = ctx.stroke(style.axes_line_width);

    root.draw(&Rectangle::new(
        [(left, top), (right, bottom)],
        BLACK.stroke_width(frame_width),
    ))
    .map_err(render_err)?;

    // X axis: ticks along the bottom (and top when mirrored), labels below.
    let x_axis = axes.axis(AxisKind::X);
    let x_ticks = axis_ticks(x_axis, &style.xtick, x_range);
    for (values, length_pt, width_pt) in [
        (&x_ticks.major, x_axis.major_length, style.xtick.major_width),
        (&x_ticks.minor, x_axis.minor_length, style.xtick.minor_width),
    ] {
        let length = ctx.px(length_pt).round() as i32;
        let stroke = BLACK.stroke_width(ctx.stroke(width_pt));
        for &v in values.iter() {
            let (px, _) = chart.backend_coord(&(v, y_range.start));
            let (a, b) = tick_span(bottom, length, -1, style.xtick.direction);
            root.draw(&PathElement::new(vec![(px, a), (px, b)], stroke))
                .map_err(render_err)?;
            if style.xtick.mirror {
                let (a, b) = tick_span(top, length, 1, style.xtick.direction);
                root.draw(&PathElement::new(vec![(px, a), (px, b)], stroke))
                    .map_err(render_err)?;
            }
        }
    }

    let x_font = ctx.font(x_axis.label_size);
    let x_label_style = x_font
        .to_text_style(ctx.dpi, &BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let x_label_top = bottom
        + outward_extent(ctx.px(x_axis.major_length).round() as i32, style.xtick.direction)
        + ctx.px(style.xtick.major_pad).round() as i32;
    let mut x_label_height = 0;
    for &v in &x_ticks.major {
        let text = x_axis.formatter.format(v);
        let (px, _) = chart.backend_coord(&(v, y_range.start));
        x_label_height = x_label_height.max(text_size(root, ctx, &text, &x_label_style)?.1 as i32);
        draw_text(root, ctx, &text, (px, x_label_top), &x_label_style)?;
    }

    // Y axis: ticks along the left (and right when mirrored), labels to the left.
    let y_axis = axes.axis(AxisKind::Y);
    let y_ticks = axis_ticks(y_axis, &style.ytick, y_range);
    for (values, length_pt, width_pt) in [
        (&y_ticks.major, y_axis.major_length, style.ytick.major_width),
        (&y_ticks.minor, y_axis.minor_length, style.ytick.minor_width),
    ] {
        let length = ctx.px(length_pt).round() as i32;
        let stroke = BLACK.stroke_width(ctx.stroke(width_pt));
        for &v in values.iter() {
            let (_, py) = chart.backend_coord(&(x_range.start, v));
            let (a, b) = tick_span(left, length, 1, style.ytick.direction);
            root.draw(&PathElement::new(vec![(a, py), (b, py)], stroke))
                .map_err(render_err)?;
            if style.ytick.mirror {
                let (a, b) = tick_span(right, length, -1, style.ytick.direction);
                root.draw(&PathElement::new(vec![(a, py), (b, py)], stroke))
                    .map_err(render_err)?;
            }
        }
    }

    let y_font = ctx.font(y_axis.label_size);
    let y_label_style = y_font
        .to_text_style(ctx.dpi, &BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    let y_label_right = left
        - outward_extent(ctx.px(y_axis.major_length).round() as i32, style.ytick.direction)
        - ctx.px(style.ytick.major_pad).round() as i32;
    let mut y_label_width = 0;
    for &v in &y_ticks.major {
        let text = y_axis.formatter.format(v);
        let (_, py) = chart.backend_coord(&(x_range.start, v));
        y_label_width = y_label_width.max(text_size(root, ctx, &text, &y_label_style)?.0 as i32);
        draw_text(root, ctx, &text, (y_label_right, py), &y_label_style)?;
    }

    // Axis titles.
    let base_title_font = ctx.font(style.font_size);
    let label_pad = ctx.px(style.axes_label_pad).round() as i32;
    if let Some(label) = &x_axis.label {
        let title_style = x_axis
            .label_font
            .as_ref()
            .unwrap_or(&base_title_font)
            .to_text_style(ctx.dpi, &BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        draw_text(
            root,
            ctx,
            label,
            ((left + right) / 2, x_label_top + x_label_height + label_pad),
            &title_style,
        )?;
    }
    if let Some(label) = &y_axis.label {
        let title_style = y_axis
            .label_font
            .as_ref()
            .unwrap_or(&base_title_font)
            .to_text_style(ctx.dpi, &BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom))
            .transform(FontTransform::Rotate270);
        draw_text(
            root,
            ctx,
            label,
            (y_label_right - y_label_width - label_pad, (top + bottom) / 2),
            &title_style,
        )?;
    }
    Ok(())
}

fn draw_legend<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    axes: &Axes,
    ctx: &RenderContext,
    origin: Pixel,
    size: (u32, u32),
) -> Result<()> {
    let entries: Vec<(&Artist, &str)> = axes
        .artists()
        .iter()
        .filter_map(|a| a.label().map(|label| (a, label)))
        .collect();
    if entries.is_empty() {
        debug!("Legend requested but no artist carries a label");
        return Ok(());
    }

    let style = axes.style();
    let font = ctx.font(style.legend.font_size);
    let text_style = font
        .to_text_style(ctx.dpi, &BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));
    let font_px = font.size_px(ctx.dpi);
    let pad = (LEGEND_BORDER_PAD * font_px).round() as i32;
    let handle = (LEGEND_HANDLE_LENGTH * font_px).round() as i32;
    let row_height = (font_px * 1.2).round() as i32;

    let mut text_width = 0;
    for (_, label) in &entries {
        text_width = text_width.max(text_size(root, ctx, label, &text_style)?.0 as i32);
    }
    let box_width = pad * 3 + handle + text_width;
    let box_height = pad * 2 + row_height * entries.len() as i32;

    let right = origin.0 + size.0 as i32 - pad;
    let top = origin.1 + pad;
    let left = right - box_width;
    let background = WHITE.mix(style.legend.frame_alpha);
    root.draw(&Rectangle::new(
        [(left, top), (right, top + box_height)],
        background.filled(),
    ))
    .map_err(render_err)?;
    root.draw(&Rectangle::new(
        [(left, top), (right, top + box_height)],
        style
            .legend_edge_color()
            .stroke_width(ctx.stroke(style.axes_line_width)),
    ))
    .map_err(render_err)?;

    for (row, (artist, label)) in entries.iter().enumerate() {
        let y = top + pad + row_height * row as i32 + row_height / 2;
        let x0 = left + pad;
        match artist {
            Artist::Line(line) => {
                let stroke = line.color.stroke_width(ctx.stroke(line.width));
                if line.format.line_style != LineStyle::None {
                    root.draw(&PathElement::new(vec![(x0, y), (x0 + handle, y)], stroke))
                        .map_err(render_err)?;
                }
                if let Some(marker) = line.format.marker {
                    let radius = (ctx.px(style.marker_size) / 2.0).round() as i32;
                    let edge = ctx.stroke(style.marker_edge_width);
                    draw_marker(root, marker, (x0 + handle / 2, y), radius, &line.color, edge)?;
                }
            }
            Artist::Scatter(scatter) => {
                let radius = (ctx.px(scatter.size.max(0.0).sqrt()) / 2.0).round() as i32;
                let edge = ctx.stroke(style.marker_edge_width);
                let center = (x0 + handle / 2, y);
                draw_marker(root, scatter.marker, center, radius, &scatter.color, edge)?;
            }
        }
        draw_text(root, ctx, label, (x0 + handle + pad, y), &text_style)?;
    }
    Ok(())
}

/// Draws one axes (background, artists, frame, ticks, labels, legend) onto `root`.
pub fn draw_axes<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    axes: &Axes,
    ctx: &RenderContext,
) -> Result<()> {
    let (origin, size) = axes_pixel_rect(axes.rect(), root.dim_in_pixel());
    let x_range = non_degenerate(axes.xlim());
    let y_range = non_degenerate(axes.ylim());
    debug!(
        "Drawing axes at {origin:?} size {size:?}, x {x_range:?}, y {y_range:?}, {} artist(s)",
        axes.artists().len()
    );

    let area = root.clone().shrink(origin, size);
    area.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&area)
        .margin(0)
        .x_label_area_size(0)
        .y_label_area_size(0)
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .map_err(render_err)?;

    draw_artists(root, &mut chart, axes, ctx, &x_range, &y_range)?;
    draw_frame_and_ticks(root, &chart, axes, ctx, origin, size, &x_range, &y_range)?;
    if axes.has_legend() {
        draw_legend(root, axes, ctx, origin, size)?;
    }
    Ok(())
}
