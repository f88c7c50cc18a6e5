// src/plot_functions/labels.rs

use crate::axes::{AxisKind, Axes};
use crate::font_config::FontStyle;
use crate::ticks::TickFormatter;

pub fn x_label(axes: &mut Axes, label: &str) {
    axes.set_xlabel(label);
}

pub fn y_label(axes: &mut Axes, label: &str) {
    axes.set_ylabel(label);
}

/// Like [`x_label`], drawn with `font` instead of the style's base font.
pub fn x_label_styled(axes: &mut Axes, label: &str, font: FontStyle) {
    axes.set_xlabel(label);
    axes.set_label_font(AxisKind::X, Some(font));
}

pub fn y_label_styled(axes: &mut Axes, label: &str, font: FontStyle) {
    axes.set_ylabel(label);
    axes.set_label_font(AxisKind::Y, Some(font));
}

pub fn labels(axes: &mut Axes, x: &str, y: &str) {
    x_label(axes, x);
    y_label(axes, y);
}

/// Tick labels on x with exactly `decimals` digits after the point.
pub fn decimal_places_x(axes: &mut Axes, decimals: usize) {
    axes.set_formatter(AxisKind::X, TickFormatter::Decimals(decimals));
}

pub fn decimal_places_y(axes: &mut Axes, decimals: usize) {
    axes.set_formatter(AxisKind::Y, TickFormatter::Decimals(decimals));
}

pub fn decimal_places(axes: &mut Axes, decimals_x: usize, decimals_y: usize) {
    decimal_places_x(axes, decimals_x);
    decimal_places_y(axes, decimals_y);
}
