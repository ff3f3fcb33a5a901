//! Number rendering for the readout labels.

const SIGNIFICANT_DIGITS: usize = 6;

/// Formats `value` the way `%g` does with six significant digits: fixed
/// notation for moderate magnitudes, scientific otherwise, trailing zeros
/// stripped. Non-finite values render as `inf`, `-inf` or `nan`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_owned();
    }

    // Rounding to the target precision first decides the exponent, so
    // 999999.5 correctly rolls over to 1e+06.
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa),
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_owned()
    }
}

/// Formats a value followed by its unit, e.g. `0.5s` or `2Hz`.
pub fn format_with_unit(value: f64, unit: &str) -> String {
    format!("{}{unit}", format_number(value))
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_notation_drops_trailing_zeros() {
        assert_eq!(format_number(0.5), "0.5");
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(123456.0), "123456");
        assert_eq!(format_number(-0.25), "-0.25");
    }

    #[test]
    fn keeps_six_significant_digits() {
        assert_eq!(format_number(1.0 / 3.0), "0.333333");
        assert_eq!(format_number(2.0 / 3.0), "0.666667");
        assert_eq!(format_number(0.0001), "0.0001");
    }

    #[test]
    fn switches_to_scientific_outside_fixed_range() {
        assert_eq!(format_number(1e-7), "1e-07");
        assert_eq!(format_number(8_000_000.0), "8e+06");
        assert_eq!(format_number(1_234_567.0), "1.23457e+06");
        assert_eq!(format_number(999_999.5), "1e+06");
        assert_eq!(format_number(0.00001234), "1.234e-05");
    }

    #[test]
    fn non_finite_values_are_displayable() {
        assert_eq!(format_number(f64::INFINITY), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
        assert_eq!(format_number(f64::NAN), "nan");
        assert_eq!(format_with_unit(f64::INFINITY, "Hz"), "infHz");
    }

    #[test]
    fn negative_zero_keeps_its_sign() {
        assert_eq!(format_number(-0.0), "-0");
        assert_eq!(format_with_unit(-0.0, "s"), "-0s");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn appends_unit_suffix() {
        assert_eq!(format_with_unit(0.5, "s"), "0.5s");
        assert_eq!(format_with_unit(0.0, "s"), "0s");
    }
}
