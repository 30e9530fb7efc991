//! Polynomial approximation pipelines.

pub mod horner;
pub mod reduce;

pub use horner::horner;
pub use reduce::{Reduced, Reduction, exp2i};

/// Final transform applied after the `2^i` rescale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transform {
    /// The rescaled polynomial value is the result.
    Identity,
    /// `(y - 1) / (y + 1)`, turning an `exp(2x)` intermediate into
    /// `tanh(x)`.
    Rational,
}

impl Transform {
    fn apply(self, y: f64) -> f64 {
        match self {
            Transform::Identity => y,
            Transform::Rational => (y - 1.0) / (y + 1.0),
        }
    }
}

/// A complete approximation scheme: input scaling, range reduction,
/// polynomial evaluation, and the final transform.
#[derive(Clone, Copy, Debug)]
pub struct Pipeline {
    pub reduction: Reduction,
    pub transform: Transform,
    /// Premultiplier on the input, for targets fit through a scaled
    /// exponential (`tanh(x)` goes through `exp(2x)`).
    pub input_scale: f64,
}

impl Pipeline {
    /// Evaluates the approximation of the target function at `x` with
    /// coefficients `p`, ordered highest degree first.
    ///
    /// In remainder mode the fitted polynomial enters as a quadratic
    /// correction, `horner(p, r)*r^2 + r + 1`, keeping the leading terms
    /// exact near `r = 0`.
    pub fn eval(&self, p: &[f64], x: f64) -> f64 {
        let reduced = self.reduction.reduce(self.input_scale * x);
        let scale = exp2i(reduced.exponent);

        let y = match self.reduction {
            Reduction::Remainder => {
                let r = reduced.value;

                (horner(p, r) * (r * r) + r + 1.0) * scale
            }
            Reduction::Fraction => horner(p, reduced.value) * scale,
        };

        self.transform.apply(y)
    }

    /// Writes the partial derivatives of [`Pipeline::eval`] with respect
    /// to each coefficient into `grad`.
    ///
    /// The output is linear in `p` up to the final transform, so the
    /// partials are the scaled monomial basis in the reduced variable,
    /// chained through `d/dy (y-1)/(y+1) = 2/(y+1)^2` when the rational
    /// transform is active.
    pub fn gradient(&self, p: &[f64], x: f64, grad: &mut [f64]) {
        let reduced = self.reduction.reduce(self.input_scale * x);
        let scale = exp2i(reduced.exponent);
        let r = reduced.value;

        let weight = match self.reduction {
            Reduction::Remainder => r * r * scale,
            Reduction::Fraction => scale,
        };

        let outer = match self.transform {
            Transform::Identity => 1.0,
            Transform::Rational => {
                let y = horner(p, r) * scale;
                let denom = y + 1.0;

                2.0 / (denom * denom)
            }
        };

        horner::basis(r, weight * outer, grad);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Target;

    fn relative_error(exact: f64, approx: f64) -> f64 {
        (exact - approx).abs() / exact.abs()
    }

    #[test]
    fn exp_pipelines_track_reference_at_seed() {
        for target in [Target::ExpV1, Target::ExpV2] {
            let config = target.config();

            for k in 0..=176 {
                let x = -88.0 + f64::from(k);
                let approx = config.pipeline.eval(config.guess, x);

                assert!(relative_error(x.exp(), approx) < 1e-4);
            }
        }
    }

    #[test]
    fn tanh_pipeline_tracks_reference_at_seed() {
        let config = Target::Tanh.config();

        for k in 0..=880 {
            let x = -44.0 + 0.1 * f64::from(k);

            if x == 0.0 {
                continue;
            }

            let approx = config.pipeline.eval(config.guess, x);

            assert!(relative_error(x.tanh(), approx) < 1e-3);
            assert!(approx.abs() <= 1.0);
        }
    }

    #[test]
    fn gradient_matches_finite_differences() {
        for target in [Target::ExpV1, Target::ExpV2, Target::Tanh] {
            let config = target.config();
            let pipeline = config.pipeline;
            let mut grad = vec![0.0; config.guess.len()];

            for x in [-5.3, -0.7, 0.4, 2.9] {
                pipeline.gradient(config.guess, x, &mut grad);

                for j in 0..config.guess.len() {
                    // The output is linear in each coefficient up to the
                    // rational transform; a large step loses nothing and
                    // keeps the difference well above rounding noise.
                    let h = 1e-3;
                    let mut lo = config.guess.to_vec();
                    let mut hi = config.guess.to_vec();

                    lo[j] -= h;
                    hi[j] += h;

                    let numeric = (pipeline.eval(&hi, x)
                        - pipeline.eval(&lo, x))
                        / (2.0 * h);
                    let scale = numeric.abs().max(grad[j].abs()).max(1e-12);

                    assert!((numeric - grad[j]).abs() / scale < 1e-4);
                }
            }
        }
    }
}
