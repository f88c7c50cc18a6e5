// src/segment.rs

// Splits a sampled curve wherever consecutive samples jump by more than a
// threshold, so that e.g. tan(x) is not drawn with vertical strokes across
// its asymptotes.

use log::debug;

use crate::error::{PlotError, Result};

/// A maximal run of samples without a jump.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segment {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Segment {
    fn starting_at(x: f64, y: f64) -> Self {
        Self {
            x: vec![x],
            y: vec![y],
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Partitions the samples into runs; a step with `|dx| > cont_x` or `|dy| > cont_y`
/// ends the current run and the jumping sample starts the next one.
pub fn split_at_jumps(x: &[f64], y: &[f64], cont_x: f64, cont_y: f64) -> Result<Vec<Segment>> {
    if x.len() != y.len() {
        return Err(PlotError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if cont_x.is_nan() || cont_y.is_nan() {
        return Err(PlotError::InvalidArgument(
            "continuity thresholds must not be NaN".into(),
        ));
    }
    if x.is_empty() {
        return Ok(Vec::new());
    }

    let mut runs = Vec::new();
    let mut current = Segment::starting_at(x[0], y[0]);
    for i in 1..x.len() {
        let jump_x = (x[i] - x[i - 1]).abs() > cont_x;
        let jump_y = (y[i] - y[i - 1]).abs() > cont_y;
        if jump_x || jump_y {
            runs.push(std::mem::replace(
                &mut current,
                Segment::starting_at(x[i], y[i]),
            ));
        } else {
            current.x.push(x[i]);
            current.y.push(y[i]);
        }
    }
    runs.push(current);

    debug!(
        "Split {} samples into {} run(s) (cont_x={cont_x}, cont_y={cont_y})",
        x.len(),
        runs.len()
    );
    Ok(runs)
}

/// Concatenates runs back into flat x and y vectors.
pub fn flatten(runs: &[Segment]) -> (Vec<f64>, Vec<f64>) {
    let total = runs.iter().map(Segment::len).sum();
    let mut x = Vec::with_capacity(total);
    let mut y = Vec::with_capacity(total);
    for run in runs {
        x.extend_from_slice(&run.x);
        y.extend_from_slice(&run.y);
    }
    (x, y)
}
