//! Range reduction.

/// log2(e), to double precision.
pub const LOG2_E: f64 = 1.44269504088896341;

/// High part of ln 2. Short enough that `i * LN2_HI` is exact for every
/// exponent reachable from the fitted domains.
pub const LN2_HI: f64 = 0.693359375;

/// Low part of ln 2, chosen so that `LN2_HI + LN2_LO` rounds to ln 2.
pub const LN2_LO: f64 = -2.12194440e-4;

/// How an input is decomposed ahead of polynomial evaluation, per the
/// identity `exp(x) = 2^i * exp(r)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reduction {
    /// Remainder reduction: `r = x - i*LN2_HI - i*LN2_LO`, with the split
    /// constants keeping the subtraction exact near multiples of ln 2.
    Remainder,
    /// Fractional reduction: `f = x*log2(e) - i`, in `[0, 1)`.
    Fraction,
}

/// A reduced input: `x ≈ exponent*ln 2 + value` (remainder mode) or
/// `x*log2(e) = exponent + value` (fraction mode).
#[derive(Clone, Copy, Debug)]
pub struct Reduced {
    pub exponent: i32,
    pub value: f64,
}

impl Reduction {
    /// Decomposes `x` into an integer scaling exponent and a reduced
    /// value. The floor rounds toward negative infinity, so the
    /// decomposition holds for either sign of `x`.
    pub fn reduce(self, x: f64) -> Reduced {
        let t = x * LOG2_E;
        let i = t.floor();

        let value = match self {
            Reduction::Remainder => x - i * LN2_HI - i * LN2_LO,
            Reduction::Fraction => t - i,
        };

        Reduced {
            exponent: i as i32,
            value,
        }
    }
}

/// Computes `2^i` by direct construction of the exponent field.
///
/// Exact for any `i` in the normal range of `f64`; the fitted domains
/// only reach about ±127.
pub fn exp2i(i: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&i));

    f64::from_bits(((i + 1023) as u64) << 52)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_rounds_toward_negative_infinity() {
        let reduced = Reduction::Fraction.reduce(-0.5);

        assert_eq!(reduced.exponent, -1);
        assert!((0.0..1.0).contains(&reduced.value));

        let reduced = Reduction::Fraction.reduce(-88.0);

        assert_eq!(reduced.exponent, -127);
        assert!((0.0..1.0).contains(&reduced.value));
    }

    #[test]
    fn fraction_reduction_reconstructs_scaled_input() {
        for x in [-88.0, -44.0, -1.5, -0.1, 0.0, 0.3, 1.0, 44.0, 88.0] {
            let t = x * LOG2_E;
            let reduced = Reduction::Fraction.reduce(x);
            let recovered = f64::from(reduced.exponent) + reduced.value;

            assert!((recovered - t).abs() <= 1e-15 * t.abs().max(1.0));
            assert!((0.0..1.0).contains(&reduced.value));
        }
    }

    #[test]
    fn remainder_reduction_reconstructs_input() {
        for x in [-88.0, -12.25, -1.0, 0.5, 3.75, 50.0, 88.0] {
            let reduced = Reduction::Remainder.reduce(x);
            let i = f64::from(reduced.exponent);
            let recovered = i * LN2_HI + i * LN2_LO + reduced.value;

            assert!((recovered - x).abs() <= 1e-9 * x.abs().max(1.0));
        }
    }

    #[test]
    fn exp2i_matches_powi() {
        for i in [-127, -10, -3, -1, 0, 1, 10, 126, 127] {
            assert_eq!(exp2i(i), 2f64.powi(i));
        }
    }
}
