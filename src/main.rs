// src/main.rs

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use ndarray::Array1;
use plotters::style::RGBColor;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use figstyle::{
    add_inset, fix_plot, fix_scale, fix_ticks, labels, plot_line, plot_scatter, Figure, FitSpec,
    InsetOptions, LineOptions, ModelFn, PlotStyle, ScaleOptions, ScatterOptions,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Renders the figstyle demo figures", long_about = None)]
struct Settings {
    /// Directory the figures are written to.
    #[arg(long, default_value = "target/figures")]
    out_dir: PathBuf,
    #[arg(long, default_value_t = 100)]
    dpi: u32,
    /// TOML file with style overrides.
    #[arg(long)]
    style: Option<PathBuf>,
    /// Seed for the scatter data; random when absent.
    #[arg(long)]
    seed: Option<u64>,
}

fn mirrored_padding() -> ScaleOptions {
    ScaleOptions {
        pad_x: 1.0 / 8.0,
        pad_y: 1.0 / 15.0,
        mirror_x: true,
        mirror_y: true,
        ..Default::default()
    }
}

fn concat(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().chain(b).copied().collect()
}

fn line_without_fit(style: &PlotStyle) -> Result<Figure, Box<dyn Error>> {
    let mut fig = Figure::new(style);
    let ax = fig.ax();
    let x = Array1::<f64>::linspace(-10.0, 10.0, 1000).to_vec();
    let y1: Vec<f64> = x.iter().map(|v| v.sin()).collect();
    let y2: Vec<f64> = x.iter().map(|v| (2.0 * v).sin()).collect();

    plot_line(ax, &x, &y1, &LineOptions { label: Some("sin(x)"), ..Default::default() })?;
    plot_line(ax, &x, &y2, &LineOptions { label: Some("sin(2x)"), ..Default::default() })?;

    fix_scale(ax, &concat(&x, &x), &concat(&y1, &y2), &mirrored_padding())?;
    fix_ticks(ax, 5, 5, 3.0, 0.2)?;
    labels(ax, "x", "y");
    ax.legend();
    Ok(fig)
}

fn line_with_fit(style: &PlotStyle) -> Result<Figure, Box<dyn Error>> {
    let mut fig = Figure::new(style);
    let ax = fig.ax();
    let x = Array1::<f64>::linspace(-10.0, 10.0, 1000).to_vec();
    let y: Vec<f64> = x.iter().map(|v| 5.3 * (v + 2.0).sin() + 1.5).collect();

    let model = ModelFn::new(5, |x, p: &[f64]| {
        p[0] * (p[1] * x + p[2]).sin() * (-x * p[4]).exp() + p[3]
    });
    let mut spec = FitSpec::new(&model);
    spec.options.p0 = Some(vec![4.0, 1.0, 1.5, 1.0, 0.0]);

    let out = plot_line(ax, &x, &y, &LineOptions { fit: Some(spec), ..Default::default() })?;
    let Some(fit) = out.fit else {
        return Err("fit overlay missing".into());
    };
    info!("Fitted parameters: {:?}", fit.popt);
    info!("Parameter covariance: {}", fit.pcov);

    fix_scale(
        ax,
        &concat(&out.xb, &fit.xf),
        &concat(&out.yb, &fit.yf),
        &mirrored_padding(),
    )?;
    fix_ticks(ax, 5, 5, 3.0, 2.5)?;
    labels(ax, "x", "y");
    Ok(fig)
}

fn scatter(style: &PlotStyle, rng: &mut StdRng) -> Result<Figure, Box<dyn Error>> {
    let mut fig = Figure::new(style);
    let mut uniform = |n: usize| -> Vec<f64> { (0..n).map(|_| rng.random_range(-1.0..1.0)).collect() };

    let (x, y) = (uniform(100), uniform(100));
    plot_scatter(fig.ax(), &x, &y, &ScatterOptions { label: Some("δ"), ..Default::default() })?;

    let (x, y) = (uniform(100), uniform(100));
    plot_scatter(
        fig.ax(),
        &x,
        &y,
        &ScatterOptions {
            label: Some("ω"),
            color: Some(RGBColor(0, 128, 0)),
            ..Default::default()
        },
    )?;
    fig.ax().legend();
    Ok(fig)
}

fn tangent_with_inset(style: &PlotStyle) -> Result<Figure, Box<dyn Error>> {
    let mut fig = Figure::new(style);
    let ax = fig.ax();
    let x = Array1::<f64>::linspace(-4.0, 4.0, 2000).to_vec();
    let y: Vec<f64> = x.iter().map(|v| v.tan()).collect();

    let out = plot_line(ax, &x, &y, &LineOptions { label: Some("tan(x)"), ..Default::default() })?;
    info!("tan(x) drawn as {} separate runs", out.lines.len());
    fix_scale(
        ax,
        &out.xb,
        &out.yb,
        &ScaleOptions { lim_y: Some(-10.0..10.0), ..Default::default() },
    )?;
    fix_ticks(ax, 5, 5, 2.0, 5.0)?;
    labels(ax, "x", "y");

    let parent = fig.main_axes();
    let mut options = InsetOptions::new(-0.5..0.5);
    options.lim_y = Some(-0.6..0.6);
    add_inset(&mut fig, parent, [0.6, 0.22, 0.3, 0.3], &options)?;
    Ok(fig)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let settings = Settings::parse();

    let style = match &settings.style {
        Some(path) => PlotStyle::load(path)?,
        None => fix_plot(8.0, 8.0),
    };
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let figures = [
        ("2dNoFit.png", line_without_fit(&style)?),
        ("2dWithFit.png", line_with_fit(&style)?),
        ("2dScatter.png", scatter(&style, &mut rng)?),
        ("2dInset.png", tangent_with_inset(&style)?),
    ];
    for (name, fig) in &figures {
        fig.save(settings.out_dir.join(name), settings.dpi)?;
    }
    info!(
        "Wrote {} figures to '{}'",
        figures.len(),
        settings.out_dir.display()
    );
    Ok(())
}
