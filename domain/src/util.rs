//! Shared utility functions.

/// Round `value` to `decimals` decimal places (half away from zero).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_one_decimal() {
        assert_eq!(round_to(66.666_666, 1), 66.7);
        assert_eq!(round_to(20.0, 1), 20.0);
    }

    #[test]
    fn round_three_decimals() {
        assert_eq!(round_to(0.782_003, 3), 0.782);
    }

    #[test]
    fn round_zero_decimals() {
        assert_eq!(round_to(2.5, 0), 3.0);
    }
}
