// src/error.rs

use thiserror::Error;

/// Errors raised by the styling, fitting and rendering helpers.
#[derive(Error, Debug)]
pub enum PlotError {
    #[error("no data points to work with")]
    EmptyData,

    #[error("x and y have different lengths ({x} vs {y})")]
    LengthMismatch { x: usize, y: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid format string: {0}")]
    InvalidFormat(String),

    #[error("curve fit failed: {reason}")]
    FitFailed { reason: String },

    #[error("no axes with index {0} in this figure")]
    UnknownAxes(usize),

    #[error("drawing error: {0}")]
    Render(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("style deserialization error: {0}")]
    StyleParse(#[from] toml::de::Error),

    #[error("style serialization error: {0}")]
    StyleWrite(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, PlotError>;

/// Checks that a pair of sample slices can be plotted together.
pub fn check_xy(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(PlotError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.is_empty() {
        return Err(PlotError::EmptyData);
    }
    Ok(())
}
