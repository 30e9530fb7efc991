//! Coefficient fitting.

pub mod lsq;

use std::fmt;

use itertools::Itertools;

use crate::config::{Coefficients, ConfigError, FitConfig};
use lsq::SolverError;

/// Relative approximation error over the fitted domain, as observed
/// after convergence. Advisory output only.
#[derive(Clone, Copy, Debug)]
pub struct ErrorStats {
    pub max: f64,
    pub min: f64,
    pub mean: f64,
}

impl ErrorStats {
    fn from_errors(errors: &[f64]) -> Option<ErrorStats> {
        let (min, max) = errors.iter().copied().minmax().into_option()?;
        let mean = errors.iter().sum::<f64>() / errors.len() as f64;

        Some(ErrorStats { max, min, mean })
    }
}

/// A converged fit.
#[derive(Clone, Debug)]
pub struct FitResult {
    /// Fitted coefficients, highest-degree term first; always the same
    /// length as the initial guess.
    pub coefficients: Coefficients,
    pub stats: ErrorStats,
    /// Objective evaluations spent by the solver.
    pub evaluations: usize,
}

/// Generates `count` evenly spaced points over `[lo, hi]`, endpoints
/// included. `count` must be at least 2.
pub fn sample(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let step = (hi - lo) / (count - 1) as f64;

    (0..count)
        .map(|k| {
            if k == count - 1 {
                hi
            } else {
                lo + k as f64 * step
            }
        })
        .collect()
}

/// Runs the full fitting pipeline for one target: sample the domain,
/// minimize the relative-error functional from the configured seed, and
/// reduce the converged residuals to summary statistics.
///
/// The sample must avoid zeros of the reference function; relative
/// error is undefined there and the solve is rejected rather than
/// patched around.
pub fn fit(config: &FitConfig) -> Result<FitResult, FitError> {
    config.validate()?;

    let (lo, hi) = config.domain;
    let xs = sample(lo, hi, config.samples);

    log::info!(
        "fitting {} over [{}, {}] with {} samples",
        config.name,
        lo,
        hi,
        config.samples
    );

    let reference: Vec<f64> =
        xs.iter().map(|&x| (config.reference)(x)).collect();

    let (coefficients, report) =
        lsq::solve(&config.pipeline, &xs, &reference, config.guess)?;

    log::debug!(
        "{}: {} evaluations, objective {:e}",
        config.name,
        report.number_of_evaluations,
        report.objective_function
    );

    let errors: Vec<f64> = xs
        .iter()
        .zip(&reference)
        .map(|(&x, &exact)| {
            (exact - config.pipeline.eval(&coefficients, x)).abs()
                / exact.abs()
        })
        .collect();

    // Validation guarantees a nonempty sample.
    let stats = ErrorStats::from_errors(&errors).unwrap();

    if !stats.max.is_finite() || !stats.mean.is_finite() {
        return Err(FitError::Solver(SolverError::NonFinite));
    }

    Ok(FitResult {
        coefficients,
        stats,
        evaluations: report.number_of_evaluations,
    })
}

/// A failed fit. Fatal for the affected target; there is no retry.
#[derive(Debug)]
pub enum FitError {
    Config(ConfigError),
    Solver(SolverError),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FitError::Config(err) => write!(f, "bad configuration: {err}"),
            FitError::Solver(err) => err.fmt(f),
        }
    }
}

impl From<ConfigError> for FitError {
    fn from(err: ConfigError) -> Self {
        FitError::Config(err)
    }
}

impl From<SolverError> for FitError {
    fn from(err: SolverError) -> Self {
        FitError::Solver(err)
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::config::Target;

    #[test]
    fn sample_is_strictly_increasing_with_exact_endpoints() {
        let xs = sample(-88.0, 88.0, 100_000);

        assert_eq!(xs.len(), 100_000);
        assert_eq!(xs[0], -88.0);
        assert_eq!(xs[99_999], 88.0);
        assert!(xs.iter().tuple_windows().all(|(a, b)| a < b));
    }

    #[test]
    fn preset_samples_avoid_zero() {
        // tanh vanishes at the origin; the even sample count puts the
        // midpoint between two points.
        for (lo, hi) in [(-88.0, 88.0), (-44.0, 44.0)] {
            assert!(sample(lo, hi, 100_000).iter().all(|&x| x != 0.0));
        }
    }

    #[test]
    fn exp_fraction_fit_meets_tolerance() {
        let config = Target::ExpV2.config();
        let result = fit(&config).unwrap();

        assert_eq!(result.coefficients.len(), config.guess.len());
        assert!(result.stats.max < 1e-6);
        assert!(result.stats.min >= 0.0);
        assert!(result.stats.mean <= result.stats.max);
    }

    #[test]
    fn exp_remainder_fit_meets_tolerance() {
        let result = fit(&Target::ExpV1.config()).unwrap();

        assert_eq!(result.coefficients.len(), 6);
        assert!(result.stats.max < 1e-6);
    }

    #[test]
    fn tanh_fit_meets_tolerance() {
        let result = fit(&Target::Tanh.config()).unwrap();

        assert_eq!(result.coefficients.len(), 5);
        assert!(result.stats.max < 1e-5);
    }

    #[test]
    fn config_errors_abort_before_fitting() {
        let config = FitConfig {
            samples: 0,
            ..Target::ExpV2.config()
        };

        assert!(matches!(fit(&config), Err(FitError::Config(_))));
    }

    #[test]
    fn zero_in_sample_fails_the_solve() {
        // An odd count over a symmetric domain samples x = 0, where the
        // reference tanh vanishes and relative error is undefined.
        let config = FitConfig {
            domain: (-1.0, 1.0),
            samples: 3,
            ..Target::Tanh.config()
        };

        assert!(matches!(fit(&config), Err(FitError::Solver(_))));
    }
}
