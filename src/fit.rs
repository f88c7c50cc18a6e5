// src/fit.rs

// Nonlinear least-squares curve fitting.
// The minimization itself is delegated to the `levenberg-marquardt` crate;
// this module only adapts a scalar model to its problem trait and derives the
// parameter covariance from the Jacobian at the solution.

use levenberg_marquardt::{LeastSquaresProblem, LevenbergMarquardt, TerminationReason};
use log::{debug, warn};
use nalgebra::storage::Owned;
use nalgebra::{DMatrix, DVector, Dyn};

use crate::constants::FIT_MAX_FEV;
use crate::error::{check_xy, PlotError, Result};

/// A model `y = f(x; p)` with a fixed number of parameters.
pub trait FitModel {
    fn n_params(&self) -> usize;
    fn eval(&self, x: f64, params: &[f64]) -> f64;
}

/// Wraps a closure as a [`FitModel`].
pub struct ModelFn<F> {
    n_params: usize,
    f: F,
}

impl<F> ModelFn<F>
where
    F: Fn(f64, &[f64]) -> f64,
{
    pub fn new(n_params: usize, f: F) -> Self {
        Self { n_params, f }
    }
}

impl<F> FitModel for ModelFn<F>
where
    F: Fn(f64, &[f64]) -> f64,
{
    fn n_params(&self) -> usize {
        self.n_params
    }

    fn eval(&self, x: f64, params: &[f64]) -> f64 {
        (self.f)(x, params)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FitOptions {
    /// Starting point; all ones when absent.
    pub p0: Option<Vec<f64>>,
    /// Approximate budget of model evaluations passes.
    pub max_fev: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            p0: None,
            max_fev: FIT_MAX_FEV,
        }
    }
}

#[derive(Debug)]
pub struct FitResult {
    pub popt: Vec<f64>,
    /// Estimated covariance of `popt`; every entry is infinite when it cannot be estimated.
    pub pcov: DMatrix<f64>,
    pub evaluations: usize,
    pub termination: TerminationReason,
}

impl FitResult {
    /// One standard deviation errors on the parameters.
    pub fn perr(&self) -> Vec<f64> {
        self.pcov.diagonal().iter().map(|v| v.sqrt()).collect()
    }

    pub fn eval(&self, model: &dyn FitModel, x: f64) -> f64 {
        model.eval(x, &self.popt)
    }
}

struct CurveProblem<'a> {
    model: &'a dyn FitModel,
    x: &'a [f64],
    y: &'a [f64],
    params: DVector<f64>,
}

impl CurveProblem<'_> {
    fn residuals_at(&self, params: &[f64]) -> Option<DVector<f64>> {
        let r = DVector::from_iterator(
            self.x.len(),
            self.x
                .iter()
                .zip(self.y)
                .map(|(&xi, &yi)| self.model.eval(xi, params) - yi),
        );
        r.iter().all(|v| v.is_finite()).then_some(r)
    }

    /// Forward-difference Jacobian of the residuals.
    fn jacobian_at(&self, params: &[f64]) -> Option<DMatrix<f64>> {
        let base = self.residuals_at(params)?;
        let mut jac = DMatrix::zeros(self.x.len(), params.len());
        let mut shifted = params.to_vec();
        for j in 0..params.len() {
            let h = f64::EPSILON.sqrt() * params[j].abs().max(1.0);
            shifted[j] = params[j] + h;
            let r = self.residuals_at(&shifted)?;
            shifted[j] = params[j];
            jac.set_column(j, &((r - &base) / h));
        }
        Some(jac)
    }
}

impl LeastSquaresProblem<f64, Dyn, Dyn> for CurveProblem<'_> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, Dyn>;
    type ParameterStorage = Owned<f64, Dyn>;

    fn set_params(&mut self, p: &DVector<f64>) {
        self.params.copy_from(p);
    }

    fn params(&self) -> DVector<f64> {
        self.params.clone()
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        self.residuals_at(self.params.as_slice())
    }

    fn jacobian(&self) -> Option<DMatrix<f64>> {
        self.jacobian_at(self.params.as_slice())
    }
}

/// `(JᵀJ)⁻¹ · SSR / (m − n)`, or all-infinite when that is undefined.
fn covariance(problem: &CurveProblem<'_>) -> DMatrix<f64> {
    let n = problem.params.len();
    let m = problem.x.len();
    let undefined = DMatrix::from_element(n, n, f64::INFINITY);
    if m <= n {
        warn!("Covariance of the fit parameters could not be estimated: {m} samples for {n} parameters");
        return undefined;
    }
    let (Some(jac), Some(res)) = (problem.jacobian(), problem.residuals()) else {
        return undefined;
    };
    let s_sq = res.norm_squared() / (m - n) as f64;
    match (jac.transpose() * &jac).try_inverse() {
        Some(inv) => inv * s_sq,
        None => {
            warn!("Covariance of the fit parameters could not be estimated: singular Jacobian");
            undefined
        }
    }
}

/// Fits `model` to the samples and returns the optimal parameters and their covariance.
pub fn curve_fit(
    model: &dyn FitModel,
    x: &[f64],
    y: &[f64],
    options: &FitOptions,
) -> Result<FitResult> {
    check_xy(x, y)?;
    let n = model.n_params();
    if n == 0 {
        return Err(PlotError::InvalidArgument(
            "model must have at least one parameter".into(),
        ));
    }
    if x.len() < n {
        return Err(PlotError::InvalidArgument(format!(
            "{} samples are not enough to fit {n} parameters",
            x.len()
        )));
    }
    if !x.iter().chain(y).all(|v| v.is_finite()) {
        return Err(PlotError::InvalidArgument(
            "fit data contains NaN or infinite values".into(),
        ));
    }
    let p0 = match &options.p0 {
        Some(p0) if p0.len() != n => {
            return Err(PlotError::InvalidArgument(format!(
                "p0 has {} entries but the model takes {n} parameters",
                p0.len()
            )))
        }
        Some(p0) => DVector::from_column_slice(p0),
        None => DVector::from_element(n, 1.0),
    };

    let problem = CurveProblem {
        model,
        x,
        y,
        params: p0,
    };
    let patience = (options.max_fev / (n + 1)).max(1);
    let (problem, report) = LevenbergMarquardt::new()
        .with_patience(patience)
        .minimize(problem);
    debug!(
        "Curve fit finished after {} evaluations: {:?}",
        report.number_of_evaluations, report.termination
    );

    if !report.termination.was_successful() {
        return Err(PlotError::FitFailed {
            reason: format!(
                "{:?} after {} evaluations",
                report.termination, report.number_of_evaluations
            ),
        });
    }

    Ok(FitResult {
        popt: problem.params.iter().copied().collect(),
        pcov: covariance(&problem),
        evaluations: report.number_of_evaluations,
        termination: report.termination,
    })
}
