//! Interface to the least-squares solver.

use std::fmt;

use levenberg_marquardt::{
    LeastSquaresProblem, LevenbergMarquardt, MinimizationReport,
    TerminationReason,
};
use nalgebra::storage::Owned;
use nalgebra::{DMatrix, DVector, Dyn};

use crate::approx::Pipeline;
use crate::config::Coefficients;

/// The vector least-squares objective: one signed relative error per
/// sample point. Squaring makes the objective identical to one built
/// from absolute errors, while keeping the residuals differentiable.
struct RelativeError<'a> {
    pipeline: &'a Pipeline,
    xs: &'a [f64],
    reference: &'a [f64],
    params: DVector<f64>,
}

impl LeastSquaresProblem<f64, Dyn, Dyn> for RelativeError<'_> {
    type ResidualStorage = Owned<f64, Dyn>;
    type JacobianStorage = Owned<f64, Dyn, Dyn>;
    type ParameterStorage = Owned<f64, Dyn>;

    fn set_params(&mut self, params: &DVector<f64>) {
        self.params.copy_from(params);
    }

    fn params(&self) -> DVector<f64> {
        self.params.clone()
    }

    fn residuals(&self) -> Option<DVector<f64>> {
        let p = self.params.as_slice();

        let residuals = DVector::from_iterator(
            self.xs.len(),
            self.xs.iter().zip(self.reference).map(|(&x, &exact)| {
                (self.pipeline.eval(p, x) - exact) / exact.abs()
            }),
        );

        residuals.iter().all(|r| r.is_finite()).then_some(residuals)
    }

    fn jacobian(&self) -> Option<DMatrix<f64>> {
        let p = self.params.as_slice();

        let mut jacobian = DMatrix::zeros(self.xs.len(), p.len());
        let mut grad = vec![0.0; p.len()];

        for (k, (&x, &exact)) in
            self.xs.iter().zip(self.reference).enumerate()
        {
            self.pipeline.gradient(p, x, &mut grad);

            for (j, &slope) in grad.iter().enumerate() {
                jacobian[(k, j)] = slope / exact.abs();
            }
        }

        jacobian.iter().all(|v| v.is_finite()).then_some(jacobian)
    }
}

/// Minimizes the summed squared relative error starting from `guess`,
/// returning the fitted coefficients and the solver's report.
///
/// The fitted vector always has the same length as `guess`; the solver
/// adjusts values, never dimension.
pub fn solve(
    pipeline: &Pipeline,
    xs: &[f64],
    reference: &[f64],
    guess: &[f64],
) -> Result<(Coefficients, MinimizationReport<f64>), SolverError> {
    let problem = RelativeError {
        pipeline,
        xs,
        reference,
        params: DVector::from_column_slice(guess),
    };

    let (problem, report) = LevenbergMarquardt::new().minimize(problem);

    if !report.termination.was_successful() {
        return Err(SolverError::Diverged(report.termination));
    }

    let fitted = Coefficients::from_slice(problem.params.as_slice());

    if fitted.iter().any(|c| !c.is_finite()) {
        return Err(SolverError::NonFinite);
    }

    Ok((fitted, report))
}

/// An error resulting from a solver invocation.
#[derive(Debug)]
#[non_exhaustive]
pub enum SolverError {
    Diverged(TerminationReason),
    NonFinite,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::Diverged(reason) => {
                write!(f, "solver failed to converge: {reason:?}")
            }
            SolverError::NonFinite => {
                write!(f, "solver returned non-finite coefficients")
            }
        }
    }
}
