//! Fit targets and their configurations.

use std::fmt;

use smallvec::SmallVec;
use strum_macros::{Display, EnumString, VariantArray};

use crate::approx::{Pipeline, Reduction, Transform};

/// A fitted coefficient vector, highest-degree term first.
pub type Coefficients = SmallVec<[f64; 8]>;

/// The approximations whose coefficients this tool generates.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Display, EnumString, VariantArray,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Target {
    /// exp via remainder reduction with a split-ln2 subtraction.
    ExpV1,
    /// exp via fractional reduction.
    ExpV2,
    /// tanh via the exp(2x) identity.
    Tanh,
}

impl Target {
    /// Returns the preset configuration for this target.
    pub fn config(self) -> FitConfig {
        match self {
            Target::ExpV1 => FitConfig {
                name: "exp",
                symbol: "EXP_P",
                variant: "V1",
                domain: (-88.0, 88.0),
                samples: 100_000,
                degree: 5,
                guess: &[
                    2.7565422393e-04,
                    1.3038713518e-03,
                    8.3795212816e-03,
                    4.1653515712e-02,
                    1.6666851064e-01,
                    4.9999990238e-01,
                ],
                reference: f64::exp,
                pipeline: Pipeline {
                    reduction: Reduction::Remainder,
                    transform: Transform::Identity,
                    input_scale: 1.0,
                },
            },
            Target::ExpV2 => FitConfig {
                name: "exp",
                symbol: "EXP_P",
                variant: "V2",
                domain: (-88.0, 88.0),
                samples: 100_000,
                degree: 4,
                guess: &[
                    8.2886153525e-14,
                    7.7822959126e-02,
                    2.2586729288e-01,
                    6.9617327373e-01,
                    9.9986347636e-01,
                ],
                reference: f64::exp,
                pipeline: Pipeline {
                    reduction: Reduction::Fraction,
                    transform: Transform::Identity,
                    input_scale: 1.0,
                },
            },
            Target::Tanh => FitConfig {
                name: "tanh",
                symbol: "EXP_P",
                variant: "V2",
                domain: (-44.0, 44.0),
                samples: 100_000,
                degree: 4,
                guess: &[
                    1.3537703155e-02,
                    5.2170695889e-02,
                    2.4121210200e-01,
                    6.9307905933e-01,
                    1.0000001462e+00,
                ],
                reference: f64::tanh,
                pipeline: Pipeline {
                    reduction: Reduction::Fraction,
                    transform: Transform::Rational,
                    input_scale: 2.0,
                },
            },
        }
    }
}

/// Everything a single fit needs: the sampled domain, the seed
/// coefficients, the approximation pipeline, and the names used when
/// emitting the result.
#[derive(Clone, Copy, Debug)]
pub struct FitConfig {
    /// Name reported on the statistics line.
    pub name: &'static str,
    /// Symbol prefix for the constant declarations and data labels.
    pub symbol: &'static str,
    /// Label suffix distinguishing kernel variants.
    pub variant: &'static str,
    pub domain: (f64, f64),
    pub samples: usize,
    /// Degree of the fitted polynomial.
    pub degree: usize,
    /// Initial coefficients, highest-degree term first.
    pub guess: &'static [f64],
    /// Exact evaluation of the target function.
    pub reference: fn(f64) -> f64,
    pub pipeline: Pipeline,
}

impl FitConfig {
    /// Checks the configuration before any fitting work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (lo, hi) = self.domain;

        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(ConfigError::Domain(lo, hi));
        }

        if self.samples < 2 {
            return Err(ConfigError::Samples(self.samples));
        }

        if self.guess.len() != self.degree + 1 {
            return Err(ConfigError::Degree {
                expected: self.degree + 1,
                found: self.guess.len(),
            });
        }

        Ok(())
    }
}

/// A malformed fit configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigError {
    Domain(f64, f64),
    Samples(usize),
    Degree { expected: usize, found: usize },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Domain(lo, hi) => {
                write!(f, "invalid domain [{lo}, {hi}]")
            }
            ConfigError::Samples(count) => {
                write!(f, "sample count {count} is too small")
            }
            ConfigError::Degree { expected, found } => {
                write!(
                    f,
                    "degree requires {expected} coefficients, guess has \
                     {found}"
                )
            }
        }
    }
}
