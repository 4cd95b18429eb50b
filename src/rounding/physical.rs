//! "Physical" rounding of a value and its uncertainty.
//!
//! Convention:
//! - the uncertainty keeps 2 significant figures when its leading digit is 1
//!   or 2, otherwise 1
//! - the value is rounded to the decimal place of the uncertainty's last
//!   significant digit
//! - both are printed with the same number of digits after the point
//!
//! Decimal rounding is done by `format!`, which rounds the exact binary value
//! and breaks exact ties to even.

use crate::domain::FormattedPair;
use crate::error::FitError;

/// Decimal places used when the uncertainty is exactly zero.
pub const ZERO_ERROR_DECIMALS: usize = 3;

/// Uncertainty rounded to its significant figures, in normalized form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedUncertainty {
    /// Rounded mantissa, `1 <= mantissa < 10`.
    pub mantissa: f64,
    /// Power of ten of the leading digit.
    pub exponent: i32,
    /// Significant figures kept (1 or 2).
    pub digits: usize,
}

impl RoundedUncertainty {
    pub fn value(&self) -> f64 {
        scale(self.mantissa, self.exponent)
    }

    /// Digits after the decimal point needed to show the last significant figure.
    pub fn decimals(&self) -> usize {
        (self.digits as i32 - 1 - self.exponent).max(0) as usize
    }

    /// Fixed-point string with `decimals()` places. Whole numbers are spelled
    /// from the mantissa digits, so uncertainties that round up past
    /// `f64::MAX` still print as digits.
    pub fn to_fixed(&self) -> String {
        let decimals = self.decimals();
        if decimals > 0 {
            return format_fixed(self.value(), decimals);
        }

        let figures: String = format!("{:.*}", self.digits - 1, self.mantissa)
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        let zeros = (self.exponent - (self.digits as i32 - 1)).max(0) as usize;
        format!("{figures}{}", "0".repeat(zeros))
    }
}

/// Format `value ± error` with matched precision.
pub fn round_pair(value: f64, error: f64) -> Result<FormattedPair, FitError> {
    if !value.is_finite() {
        return Err(FitError::invalid(format!("value must be finite, got {value}")));
    }
    if !error.is_finite() {
        return Err(FitError::invalid(format!("error must be finite, got {error}")));
    }

    if error == 0.0 {
        return Ok(FormattedPair {
            value_string: format_fixed(value, ZERO_ERROR_DECIMALS),
            error_string: format_fixed(0.0, ZERO_ERROR_DECIMALS),
            decimals: ZERO_ERROR_DECIMALS,
        });
    }

    let rounded = round_uncertainty(error)?;
    let decimals = rounded.decimals();

    Ok(FormattedPair {
        value_string: format_fixed(value, decimals),
        error_string: rounded.to_fixed(),
        decimals,
    })
}

/// Round a non-zero uncertainty to 1 or 2 significant figures.
///
/// The sign is ignored. A mantissa that rounds up to 10 carries into the next
/// decade, and the figure count is then taken from the carried mantissa:
/// 0.0997 becomes 1.0 × 10⁻¹ and prints as "0.10".
pub fn round_uncertainty(error: f64) -> Result<RoundedUncertainty, FitError> {
    let magnitude = error.abs();
    if !(magnitude.is_finite() && magnitude > 0.0) {
        return Err(FitError::invalid(format!(
            "uncertainty must be finite and non-zero, got {error}"
        )));
    }

    let (raw, mut exponent) = normalize(magnitude);
    let mut digits = significant_digits(raw);
    let mut mantissa = round_decimals(raw, digits - 1)?;

    if mantissa >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }

    // The figure count follows the leading digit as displayed: 2.96 shows
    // as 3 (one figure), a carried 10 shows as 1.0 (two figures).
    let shown = significant_digits(mantissa);
    if shown != digits {
        digits = shown;
        mantissa = round_decimals(mantissa, digits - 1)?;
    }

    Ok(RoundedUncertainty {
        mantissa,
        exponent,
        digits,
    })
}

/// Leading digit 1 or 2 keeps two figures.
fn significant_digits(mantissa: f64) -> usize {
    match mantissa as u32 {
        1 | 2 => 2,
        _ => 1,
    }
}

/// Split a positive finite `m` into `(mantissa, exponent)` with
/// `1 <= mantissa < 10`.
fn normalize(m: f64) -> (f64, i32) {
    let mut exponent = m.log10().floor() as i32;
    let mut mantissa = scale(m, -exponent);

    // log10 can be off by one ulp next to exact powers of ten.
    while mantissa >= 10.0 {
        exponent += 1;
        mantissa = scale(m, -exponent);
    }
    while mantissa < 1.0 {
        exponent -= 1;
        mantissa = scale(m, -exponent);
    }

    (mantissa, exponent)
}

/// `v × 10^power`, dividing for negative powers so that `10^|power|` stays
/// exact where possible.
fn scale(v: f64, power: i32) -> f64 {
    if power.abs() > 300 {
        let half = power / 2;
        return scale(scale(v, half), power - half);
    }
    if power >= 0 {
        v * 10f64.powi(power)
    } else {
        v / 10f64.powi(-power)
    }
}

fn round_decimals(v: f64, decimals: usize) -> Result<f64, FitError> {
    format!("{v:.decimals$}")
        .parse()
        .map_err(|e| FitError::invalid(format!("failed to round {v}: {e}")))
}

/// Fixed-point string; a value that rounds to zero never keeps its sign.
fn format_fixed(v: f64, decimals: usize) -> String {
    let s = format!("{v:.decimals$}");
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}
