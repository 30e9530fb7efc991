//! Generator for the polynomial coefficients embedded in vectorized
//! `exp` and `tanh` kernels.
//!
//! Each target function is fit by range reduction plus a nonlinear
//! least-squares solve minimizing relative error over a dense sample of
//! the domain; the converged coefficients are emitted as decimal
//! literals, C constant declarations, and assembly data directives.

pub mod approx;
pub mod config;
pub mod emit;
pub mod fit;
pub mod opts;
