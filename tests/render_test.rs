// tests/render_test.rs

use std::fs;

use figstyle::font_config::FontStyle;
use figstyle::style::AutolimitMode;
use figstyle::{
    add_inset, add_vertical_line, fix_plot, fix_scale, fix_ticks, plot_line, plot_scatter,
    x_label_styled, y_label, AxesId, Figure, InsetOptions, LineOptions, PlotStyle, ScaleOptions,
    ScatterOptions,
};
use tempfile::tempdir;

fn demo_figure(style: &PlotStyle) -> Figure {
    let mut fig = Figure::new(style);
    let x: Vec<f64> = (0..200).map(|i| -3.0 + 6.0 * i as f64 / 199.0).collect();
    let y: Vec<f64> = x.iter().map(|v| v.tan()).collect();

    let ax = fig.ax();
    plot_line(ax, &x, &y, &LineOptions { label: Some("tan(x)"), ..Default::default() }).unwrap();
    plot_line(
        ax,
        &x,
        &x,
        &LineOptions { fmt: "r--", label: Some("x"), ..Default::default() },
    )
    .unwrap();
    plot_scatter(ax, &[0.0, 1.0], &[0.0, 1.0], &ScatterOptions::default()).unwrap();
    fix_scale(ax, &x, &y, &ScaleOptions { lim_y: Some(-5.0..5.0), ..Default::default() })
        .unwrap();
    fix_ticks(ax, 5, 5, 1.0, 2.5).unwrap();
    add_vertical_line(ax, 0.0, "k:", 1.0, None).unwrap();
    x_label_styled(ax, "x", FontStyle::new("sans-serif", 14.0));
    y_label(ax, "y");
    ax.legend();

    add_inset(&mut fig, AxesId(0), [0.6, 0.2, 0.3, 0.3], &InsetOptions::new(-0.5..0.5)).unwrap();
    fig
}

#[test]
fn test_png_has_expected_size() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("figure.png");
    let fig = demo_figure(&fix_plot(4.0, 3.0));
    fig.save(&path, 50).unwrap();

    let bytes = fs::read(&path).unwrap();
    assert!(bytes.len() > 24);
    assert_eq!(&bytes[1..4], b"PNG");
    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    assert_eq!((width, height), (200, 150));
}

#[test]
fn test_svg_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("figure.svg");
    demo_figure(&fix_plot(4.0, 4.0)).save(&path, 72).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("<svg"));
    assert!(text.contains("polyline") || text.contains("path"));
}

#[test]
fn test_style_file_round_trip_and_render() {
    let dir = tempdir().unwrap();
    let style_path = dir.path().join("style.toml");
    fs::write(
        &style_path,
        "font_size = 20.0\nautolimit_mode = \"data\"\ncolor_cycle = [\"#123456\"]\n",
    )
    .unwrap();

    let style = PlotStyle::load(&style_path).unwrap();
    assert_eq!(style.font_size, 20.0);
    assert_eq!(style.autolimit_mode, AutolimitMode::Data);
    assert_eq!(style.figure_size, fix_plot(8.0, 8.0).figure_size);

    let reparsed = PlotStyle::from_toml_str(&style.to_toml_string().unwrap()).unwrap();
    assert_eq!(reparsed.color_cycle, vec!["#123456".to_string()]);

    let out = dir.path().join("styled.png");
    demo_figure(&style).save(&out, 20).unwrap();
    assert!(fs::metadata(&out).unwrap().len() > 0);
}

#[test]
fn test_bad_style_file_is_rejected() {
    let dir = tempdir().unwrap();
    let style_path = dir.path().join("style.toml");
    fs::write(&style_path, "font_size = \"big\"\n").unwrap();
    assert!(PlotStyle::load(&style_path).is_err());
    assert!(PlotStyle::load(dir.path().join("missing.toml")).is_err());
}

#[test]
fn test_huge_data_range_renders() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("huge.png");
    let mut fig = Figure::new(&fix_plot(4.0, 4.0));
    let x = [-2e19, 0.0, 2e19];
    let y = [-2e19, 0.0, 2e19];
    let ax = fig.ax();
    plot_line(ax, &x, &y, &LineOptions { cont_x: f64::INFINITY, cont_y: f64::INFINITY, ..Default::default() })
        .unwrap();
    fix_scale(ax, &x, &y, &ScaleOptions::default()).unwrap();
    fix_ticks(ax, 5, 5, 0.5, 1.0).unwrap();
    fig.save(&path, 30).unwrap();
    assert!(fs::metadata(&path).unwrap().len() > 0);
}
