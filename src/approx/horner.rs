//! Polynomial evaluation.

/// Evaluates a polynomial by Horner's scheme, with coefficients ordered
/// from the highest-degree term down to the constant term.
///
/// An empty coefficient slice evaluates to zero.
///
/// # Examples
///
/// ```
/// # use vmf_fit::approx::horner;
/// #
/// assert_eq!(horner(&[2.0, -3.0, 4.0, 5.0], 2.0), 17.0);
/// assert_eq!(horner(&[7.0], 123.0), 7.0);
/// ```
pub fn horner(p: &[f64], x: f64) -> f64 {
    p.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Writes the monomial basis `x^(n-1), ..., x, 1` scaled by `weight`
/// into `out`, matching the coefficient order consumed by [`horner`].
pub fn basis(x: f64, weight: f64, out: &mut [f64]) {
    let mut power = weight;

    for slot in out.iter_mut().rev() {
        *slot = power;
        power *= x;
    }
}
