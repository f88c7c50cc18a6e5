// src/lib.rs - Library interface

pub mod axes;
pub mod constants;
pub mod error;
pub mod figure;
pub mod fit;
pub mod font_config;
pub mod line_format;
pub mod plot_framework;
pub mod plot_functions;
pub mod scale;
pub mod segment;
pub mod style;
pub mod ticks;

pub use axes::{ArtistId, Axes, AxisKind};
pub use error::{PlotError, Result};
pub use figure::{AxesId, Figure};
pub use fit::{curve_fit, FitModel, FitOptions, FitResult, ModelFn};
pub use plot_functions::*;
pub use scale::{compute_limits, fix_scale, ScaleOptions};
pub use segment::{split_at_jumps, Segment};
pub use style::{fix_plot, PlotStyle};
pub use ticks::fix_ticks;
