//! Coefficient emission.

use std::io::{self, Write};

use crate::config::FitConfig;
use crate::fit::FitResult;

/// Formats a finite value in `printf`-style scientific notation: a
/// mantissa with `precision` fractional digits and a signed two-digit
/// exponent.
///
/// # Examples
///
/// ```
/// # use vmf_fit::emit::sci;
/// #
/// assert_eq!(sci(2.7565422393e-4, 10), "2.7565422393e-04");
/// assert_eq!(sci(-1.0, 6), "-1.000000e+00");
/// assert_eq!(sci(0.0, 2), "0.00e+00");
/// ```
pub fn sci(value: f64, precision: usize) -> String {
    let formatted = format!("{value:.precision$e}");
    let (mantissa, exponent) = formatted.split_once('e').unwrap();

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };

    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Writes the three renderings of a fitted coefficient vector followed
/// by the error-statistics line.
///
/// Pure formatting: values pass through losslessly to the stated
/// precision, in stored order (index 0 is the highest-degree term).
pub fn write_report<W: Write>(
    out: &mut W,
    config: &FitConfig,
    result: &FitResult,
) -> io::Result<()> {
    let p = &result.coefficients;

    for &c in p {
        writeln!(out, "{},", sci(c, 10))?;
    }

    for (i, &c) in p.iter().enumerate() {
        writeln!(
            out,
            "static const float {}{} = {}f;",
            config.symbol,
            i,
            sci(c, 10)
        )?;
    }

    for (i, &c) in p.iter().enumerate() {
        writeln!(out, "{}{}_{}:", config.symbol, i, config.variant)?;
        writeln!(out, ".float {}", sci(c, 10))?;
    }

    let stats = result.stats;

    writeln!(
        out,
        "{}_rel_error={}/{}/{}",
        config.name,
        sci(stats.max, 6),
        sci(stats.min, 6),
        sci(stats.mean, 6)
    )
}
