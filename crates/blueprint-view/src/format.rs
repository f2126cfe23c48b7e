//! Display formatting for quantities and ids.
//!
//! Formatting never feeds back into computation: callers keep the raw
//! `f64` for sorting and further arithmetic.

/// Rendered in place of values that cannot be shown as a number.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format a quantity with `,` thousands separators.
///
/// Whole numbers have no decimal part; anything else is rounded to exactly
/// two fractional digits.
///
/// ```rust,ignore
/// assert_eq!(format_number(1234567.0), "1,234,567");
/// assert_eq!(format_number(1234.5), "1,234.50");
/// ```
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return NOT_AVAILABLE.to_string();
    }

    let text = if n.fract() == 0.0 {
        format!("{n:.0}")
    } else {
        format!("{n:.2}")
    };

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(text.len() + int_part.len() / 3);
    out.push_str(sign);
    out.push_str(&group_thousands(int_part));
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Format an integer with `,` thousands separators.
pub fn format_integer(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    if n < 0 {
        format!("-{}", group_thousands(&digits))
    } else {
        group_thousands(&digits)
    }
}

/// Insert `,` every three digits from the right of a run of ASCII digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_have_no_decimals() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(6.0), "6");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
    }

    #[test]
    fn fractions_show_two_digits() {
        assert_eq!(format_number(1.5), "1.50");
        assert_eq!(format_number(0.333333), "0.33");
        assert_eq!(format_number(1234.5678), "1,234.57");
        assert_eq!(format_number(2.999), "3.00");
    }

    #[test]
    fn rounding_happens_before_grouping() {
        assert_eq!(format_number(999999.996), "1,000,000.00");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(format_number(-1234.0), "-1,234");
        assert_eq!(format_number(-1234.25), "-1,234.25");
        assert_eq!(format_integer(-1_000_000), "-1,000,000");
    }

    #[test]
    fn large_whole_numbers_group_fully() {
        assert_eq!(format_number(1e15), "1,000,000,000,000,000");
        assert_eq!(format_integer(i64::MIN), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn non_finite_is_not_available() {
        assert_eq!(format_number(f64::NAN), "N/A");
        assert_eq!(format_number(f64::INFINITY), "N/A");
    }

    #[test]
    fn integers_group() {
        assert_eq!(format_integer(0), "0");
        assert_eq!(format_integer(12), "12");
        assert_eq!(format_integer(123456), "123,456");
    }
}
