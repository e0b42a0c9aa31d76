//! Result formatting for display.

/// What is shown instead of a result that is not a finite number.
pub const ERROR_DISPLAY: &str = "Error";

/// Format a result for display.
///
/// Whole numbers are shown without a decimal part, anything else with at most
/// eight decimals and no trailing zeros. Returns `None` for NaN and
/// infinities, which the caller shows as [`ERROR_DISPLAY`].
pub fn format_result(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }

    // `as` saturates, so huge values fail the comparison and take the
    // fixed-point path.
    let truncated = value as i64;
    if value == truncated as f64 {
        return Some(truncated.to_string());
    }

    let formatted = format!("{:.8}", value);
    Some(
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers() {
        assert_eq!(format_result(3.0).as_deref(), Some("3"));
        assert_eq!(format_result(-42.0).as_deref(), Some("-42"));
        assert_eq!(format_result(0.0).as_deref(), Some("0"));
        assert_eq!(format_result(-0.0).as_deref(), Some("0"));
        assert_eq!(format_result(1e15).as_deref(), Some("1000000000000000"));
    }

    #[test]
    fn test_decimals() {
        assert_eq!(format_result(0.1).as_deref(), Some("0.1"));
        assert_eq!(format_result(1.0 / 3.0).as_deref(), Some("0.33333333"));
        assert_eq!(format_result(2.0 / 3.0).as_deref(), Some("0.66666667"));
        assert_eq!(format_result(-1.25).as_deref(), Some("-1.25"));
    }

    #[test]
    fn test_rounds_to_whole_number() {
        assert_eq!(format_result(2.999999999987).as_deref(), Some("3"));
        assert_eq!(format_result(1e-10).as_deref(), Some("0"));
    }

    #[test]
    fn test_beyond_integer_range() {
        assert_eq!(
            format_result(1e19).as_deref(),
            Some("10000000000000000000")
        );
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_result(f64::NAN), None);
        assert_eq!(format_result(f64::INFINITY), None);
        assert_eq!(format_result(f64::NEG_INFINITY), None);
    }
}
