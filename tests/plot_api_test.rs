// tests/plot_api_test.rs

use figstyle::axes::Artist;
use figstyle::{
    add_horizontal_line, add_inset, add_vertical_line, compute_limits, decimal_places, fix_plot,
    fix_scale, fix_ticks, plot_line, plot_scatter, split_at_jumps, zoom, AxesId, AxisKind, Figure,
    FitSpec, InsetOptions, LineOptions, ModelFn, PlotError, ScaleOptions, ScatterOptions,
};

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (end - start) * i as f64 / (n - 1) as f64)
        .collect()
}

#[test]
fn test_tangent_is_split_at_asymptotes() {
    let x = linspace(-3.0, 3.0, 601);
    let y: Vec<f64> = x.iter().map(|v| v.tan()).collect();
    let runs = split_at_jumps(&x, &y, 0.5, 5.0).unwrap();

    // Two asymptotes at ±π/2 inside the interval.
    assert!(runs.len() >= 3, "{} runs", runs.len());
    let total: usize = runs.iter().map(|r| r.len()).sum();
    assert_eq!(total, x.len());
    for run in &runs {
        for w in run.y.windows(2) {
            assert!((w[1] - w[0]).abs() <= 5.0);
        }
    }
}

#[test]
fn test_plot_line_then_scale_and_ticks() {
    let mut fig = Figure::new(&fix_plot(8.0, 8.0));
    let x = linspace(-10.0, 10.0, 1000);
    let y1: Vec<f64> = x.iter().map(|v| v.sin()).collect();
    let y2: Vec<f64> = x.iter().map(|v| (2.0 * v).sin()).collect();

    let ax = fig.ax();
    let a = plot_line(ax, &x, &y1, &LineOptions { label: Some("sin(x)"), ..Default::default() })
        .unwrap();
    let b = plot_line(ax, &x, &y2, &LineOptions { label: Some("sin(2x)"), ..Default::default() })
        .unwrap();
    assert_eq!(a.lines.len(), 1);
    assert_eq!(b.lines.len(), 1);

    let all_x: Vec<f64> = x.iter().chain(&x).copied().collect();
    let all_y: Vec<f64> = y1.iter().chain(&y2).copied().collect();
    let (xlim, ylim) = fix_scale(
        ax,
        &all_x,
        &all_y,
        &ScaleOptions {
            pad_x: 1.0 / 8.0,
            pad_y: 1.0 / 15.0,
            mirror_x: true,
            mirror_y: true,
            ..Default::default()
        },
    )
    .unwrap();
    assert!((xlim.start + 11.25).abs() < 1e-9 && (xlim.end - 11.25).abs() < 1e-9);
    let y_max = all_y.iter().cloned().fold(f64::MIN, f64::max);
    let y_min = all_y.iter().cloned().fold(f64::MAX, f64::min);
    let pad = y_max.abs().max(y_min.abs()) / 15.0;
    assert!((ylim.start - (y_min - pad)).abs() < 1e-9);
    assert!((ylim.end - (y_max + pad)).abs() < 1e-9);

    fix_ticks(ax, 5, 5, 3.0, 0.2).unwrap();
    let xmajor = ax.axis(AxisKind::X).major.ticks(xlim.start, xlim.end);
    assert_eq!(xmajor.first().copied(), Some(-9.0));
    assert_eq!(xmajor.last().copied(), Some(9.0));
    assert_eq!(ax.xlim(), xlim);
}

#[test]
fn test_lim_x_filters_strictly() {
    let (xlim, ylim) = compute_limits(
        &[0.0, 1.0, 2.0, 3.0],
        &[10.0, 20.0, 30.0, 40.0],
        &ScaleOptions {
            lim_x: Some(0.0..3.0),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(xlim, 1.0..2.0);
    assert_eq!(ylim, 20.0..30.0);
}

#[test]
fn test_fit_overlay_recovers_sine() {
    let mut fig = Figure::new(&fix_plot(8.0, 8.0));
    let x = linspace(-10.0, 10.0, 400);
    let y: Vec<f64> = x.iter().map(|v| 5.3 * (v + 2.0).sin() + 1.5).collect();
    let model = ModelFn::new(4, |x, p: &[f64]| p[0] * (p[1] * x + p[2]).sin() + p[3]);
    let mut spec = FitSpec::new(&model);
    spec.options.p0 = Some(vec![4.0, 1.0, 1.5, 1.0]);
    spec.range_x = Some(-5.0..5.0);

    let out = plot_line(fig.ax(), &x, &y, &LineOptions { fit: Some(spec), ..Default::default() })
        .unwrap();
    let fit = out.fit.unwrap();
    let expected = [5.3, 1.0, 2.0, 1.5];
    for (p, e) in fit.popt.iter().zip(expected) {
        assert!((p - e).abs() < 1e-4, "{:?}", fit.popt);
    }
    assert_eq!(fit.pcov.shape(), (4, 4));
    assert!((fit.xf[0] + 5.0).abs() < 1e-12);
    assert!((fit.xf[fit.xf.len() - 1] - 5.0).abs() < 1e-9);
    assert!(!fit.lines.is_empty());
}

#[test]
fn test_fit_failure_is_reported() {
    let mut fig = Figure::new(&fix_plot(8.0, 8.0));
    let model = ModelFn::new(3, |x, p: &[f64]| p[0] * x * x + p[1] * x + p[2]);
    let spec = FitSpec::new(&model);
    let result = plot_line(
        fig.ax(),
        &[0.0, 0.1],
        &[1.0, 1.1],
        &LineOptions { fit: Some(spec), ..Default::default() },
    );
    assert!(matches!(result, Err(PlotError::InvalidArgument(_))));
}

#[test]
fn test_reference_lines_follow_zoom() {
    let mut fig = Figure::new(&fix_plot(8.0, 8.0));
    let ax = fig.ax();
    zoom(ax, 0.0..4.0, -1.0..1.0);
    let v = add_vertical_line(ax, 2.0, "k:", 1.0, None).unwrap();
    let h = add_horizontal_line(ax, 0.0, "r-", 1.0, None).unwrap();

    match ax.artist(v) {
        Some(Artist::Line(line)) => assert_eq!(line.y, vec![-1.0, 1.0]),
        other => panic!("unexpected {other:?}"),
    }
    match ax.artist(h) {
        Some(Artist::Line(line)) => assert_eq!(line.x, vec![0.0, 4.0]),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_inset_from_mixed_parent() {
    let mut fig = Figure::new(&fix_plot(8.0, 8.0));
    let x = linspace(0.0, 10.0, 101);
    let y: Vec<f64> = x.iter().map(|v| v * v).collect();
    let one_run = LineOptions {
        cont_y: 100.0,
        ..Default::default()
    };
    plot_line(fig.ax(), &x, &y, &one_run).unwrap();
    plot_scatter(fig.ax(), &[4.0, 5.0], &[16.0, 25.0], &ScatterOptions::default()).unwrap();

    let id = add_inset(&mut fig, AxesId(0), [0.55, 0.55, 0.35, 0.35], &InsetOptions::new(3.0..6.0))
        .unwrap();
    let inset = fig.axes(id).unwrap();
    assert_eq!(inset.lines().count(), 1);
    assert_eq!(inset.scatters().count(), 1);

    // Parent line: black; parent scatter: second cycle colour.
    let parent = fig.axes(AxesId(0)).unwrap();
    let parent_scatter = parent.scatters().next().unwrap().color;
    assert_eq!(inset.scatters().next().unwrap().color, parent_scatter);
    assert_eq!(
        inset.lines().next().unwrap().color,
        parent.lines().next().unwrap().color
    );

    let xlim = inset.xlim();
    assert!((xlim.start - 3.1).abs() < 1e-9, "{xlim:?}");
    assert!((xlim.end - 5.9).abs() < 1e-9, "{xlim:?}");
    assert!(inset.axis(AxisKind::Y).label_size < parent.axis(AxisKind::Y).label_size);
}

#[test]
fn test_decimal_places_format_ticks() {
    let mut fig = Figure::new(&fix_plot(8.0, 8.0));
    decimal_places(fig.ax(), 0, 3);
    let ax = fig.ax();
    assert_eq!(ax.axis(AxisKind::X).formatter.format(2.0), "2");
    assert_eq!(ax.axis(AxisKind::Y).formatter.format(0.2), "0.200");
}
