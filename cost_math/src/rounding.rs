//! Decimal rounding and fixed-point display

/// Round `value` to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Format `value` with exactly `places` decimals.
///
/// Negative zero is printed without its sign.
pub fn format_fixed(value: f64, places: usize) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.*}", places, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(104.996, 2), 105.0);
        assert_eq!(round_to(104.994, 2), 104.99);
        assert_eq!(round_to(-0.004, 2), 0.0);
        assert_eq!(round_to(12.5, 0), 13.0);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(50.0, 2), "50.00");
        assert_eq!(format_fixed(1500.456, 2), "1500.46");
        assert_eq!(format_fixed(-0.0, 2), "0.00");
        assert_eq!(format_fixed(-3.5, 1), "-3.5");
    }
}
