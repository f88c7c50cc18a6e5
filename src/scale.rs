// src/scale.rs

use std::ops::Range;

use ndarray::ArrayView1;
use ndarray_stats::QuantileExt;

use crate::axes::Axes;
use crate::error::{check_xy, PlotError, Result};

/// Options for [`fix_scale`]. Pads are fractions of the extreme values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScaleOptions {
    pub pad_x: f64,
    pub pad_y: f64,
    /// Pad both ends of x by the larger of the two pads.
    pub mirror_x: bool,
    pub mirror_y: bool,
    /// Only samples with `lim_x.start < x < lim_x.end` take part.
    pub lim_x: Option<Range<f64>>,
    /// Fixed y limits, overriding the computed ones. Applied after the `lim_x`
    /// filter, so it wins over the y range of the filtered samples.
    pub lim_y: Option<Range<f64>>,
}

/// Min and max ignoring NaN samples.
pub fn finite_bounds(values: &[f64]) -> Result<(f64, f64)> {
    if values.is_empty() {
        return Err(PlotError::EmptyData);
    }
    let view = ArrayView1::from(values);
    let min = *view.min_skipnan();
    let max = *view.max_skipnan();
    if min.is_nan() || max.is_nan() {
        return Err(PlotError::EmptyData);
    }
    if !(min.is_finite() && max.is_finite()) {
        return Err(PlotError::InvalidArgument(format!(
            "data range [{min}, {max}] is not finite"
        )));
    }
    Ok((min, max))
}

fn padded(min: f64, max: f64, pad: f64, mirror: bool) -> Range<f64> {
    let pad_max = (max * pad).abs();
    let pad_min = (min * pad).abs();
    if mirror {
        let pad = pad_max.max(pad_min);
        (min - pad)..(max + pad)
    } else {
        (min - pad_min)..(max + pad_max)
    }
}

/// Axis limits for the data under `options`, without touching any axes.
pub fn compute_limits(
    x: &[f64],
    y: &[f64],
    options: &ScaleOptions,
) -> Result<(Range<f64>, Range<f64>)> {
    check_xy(x, y)?;

    if let Some(lim_x) = &options.lim_x {
        let (kept_x, kept_y): (Vec<f64>, Vec<f64>) = x
            .iter()
            .zip(y)
            .filter(|(xi, _)| **xi > lim_x.start && **xi < lim_x.end)
            .map(|(xi, yi)| (*xi, *yi))
            .unzip();
        let inner = ScaleOptions {
            lim_x: None,
            ..options.clone()
        };
        return compute_limits(&kept_x, &kept_y, &inner);
    }

    let (min_x, max_x) = finite_bounds(x)?;
    let (min_y, max_y) = finite_bounds(y)?;

    let x_range = padded(min_x, max_x, options.pad_x, options.mirror_x);
    let y_range = match &options.lim_y {
        Some(lim_y) => lim_y.clone(),
        None => padded(min_y, max_y, options.pad_y, options.mirror_y),
    };
    Ok((x_range, y_range))
}

/// Computes padded limits from the data, installs them on `axes` and returns them.
pub fn fix_scale(
    axes: &mut Axes,
    x: &[f64],
    y: &[f64],
    options: &ScaleOptions,
) -> Result<(Range<f64>, Range<f64>)> {
    let (x_range, y_range) = compute_limits(x, y, options)?;
    axes.set_xlim(x_range.clone());
    axes.set_ylim(y_range.clone());
    Ok((x_range, y_range))
}

pub fn zoom(axes: &mut Axes, xlim: Range<f64>, ylim: Range<f64>) {
    axes.set_xlim(xlim);
    axes.set_ylim(ylim);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::AxisKind;
    use crate::style::fix_plot;

    fn assert_range(actual: &Range<f64>, start: f64, end: f64) {
        assert!(
            (actual.start - start).abs() < 1e-12 && (actual.end - end).abs() < 1e-12,
            "got {actual:?}, expected {start}..{end}"
        );
    }

    #[test]
    fn test_no_padding_hugs_data() {
        let (xr, yr) =
            compute_limits(&[-2.0, 0.0, 4.0], &[1.0, 3.0, 2.0], &ScaleOptions::default()).unwrap();
        assert_range(&xr, -2.0, 4.0);
        assert_range(&yr, 1.0, 3.0);
    }

    #[test]
    fn test_independent_padding() {
        let options = ScaleOptions {
            pad_x: 0.5,
            pad_y: 0.1,
            ..Default::default()
        };
        let (xr, yr) = compute_limits(&[-2.0, 4.0], &[-10.0, 20.0], &options).unwrap();
        assert_range(&xr, -3.0, 6.0);
        assert_range(&yr, -11.0, 22.0);
    }

    #[test]
    fn test_mirrored_padding_uses_larger_pad() {
        let options = ScaleOptions {
            pad_x: 0.5,
            pad_y: 0.1,
            mirror_x: true,
            mirror_y: true,
            ..Default::default()
        };
        let (xr, yr) = compute_limits(&[-2.0, 4.0], &[-10.0, 20.0], &options).unwrap();
        assert_range(&xr, -4.0, 6.0);
        assert_range(&yr, -12.0, 22.0);
    }

    #[test]
    fn test_lim_x_filters_strictly_then_rescales() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [10.0, 11.0, 12.0, 13.0, 14.0];
        let options = ScaleOptions {
            lim_x: Some(1.0..4.0),
            ..Default::default()
        };
        let (xr, yr) = compute_limits(&x, &y, &options).unwrap();
        assert_range(&xr, 2.0, 3.0);
        assert_range(&yr, 12.0, 13.0);
    }

    #[test]
    fn test_lim_y_overrides_computed_range() {
        let options = ScaleOptions {
            pad_y: 0.5,
            lim_x: Some(-1.0..10.0),
            lim_y: Some(-5.0..5.0),
            ..Default::default()
        };
        let (xr, yr) = compute_limits(&[0.0, 1.0, 20.0], &[100.0, 200.0, 300.0], &options).unwrap();
        assert_range(&xr, 0.0, 1.0);
        assert_range(&yr, -5.0, 5.0);
    }

    #[test]
    fn test_nan_samples_are_ignored() {
        let (xr, _) = compute_limits(
            &[f64::NAN, 1.0, 2.0],
            &[0.0, 0.0, 0.0],
            &ScaleOptions::default(),
        )
        .unwrap();
        assert_range(&xr, 1.0, 2.0);
    }

    #[test]
    fn test_empty_inputs_are_errors() {
        assert!(matches!(
            compute_limits(&[], &[], &ScaleOptions::default()),
            Err(PlotError::EmptyData)
        ));
        let options = ScaleOptions {
            lim_x: Some(10.0..20.0),
            ..Default::default()
        };
        assert!(matches!(
            compute_limits(&[0.0, 1.0], &[0.0, 1.0], &options),
            Err(PlotError::EmptyData)
        ));
    }

    #[test]
    fn test_fix_scale_and_zoom_set_axes_limits() {
        let style = fix_plot(8.0, 8.0);
        let mut axes = Axes::new([0.1, 0.1, 0.8, 0.8], &style);
        fix_scale(&mut axes, &[0.0, 2.0], &[1.0, 3.0], &ScaleOptions::default()).unwrap();
        assert_range(&axes.limits(AxisKind::X), 0.0, 2.0);
        assert_range(&axes.limits(AxisKind::Y), 1.0, 3.0);

        zoom(&mut axes, -1.0..1.0, 5.0..6.0);
        assert_range(&axes.limits(AxisKind::X), -1.0, 1.0);
        assert_range(&axes.limits(AxisKind::Y), 5.0, 6.0);
    }
}
