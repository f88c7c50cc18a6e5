// src/plot_functions/mod.rs

pub mod labels;
pub mod plot_inset;
pub mod plot_line;
pub mod plot_scatter;
pub mod reference_lines;

pub use labels::{
    decimal_places, decimal_places_x, decimal_places_y, labels, x_label, x_label_styled, y_label,
    y_label_styled,
};
pub use plot_inset::{add_inset, InsetOptions};
pub use plot_line::{plot_line, FitOutput, FitSpec, LineOptions, LineOutput, Transform};
pub use plot_scatter::{plot_scatter, ScatterOptions, ScatterOutput};
pub use reference_lines::{add_horizontal_line, add_vertical_line};
pub use crate::scale::zoom;

// src/plot_functions/mod.rs
