use crate::Price;

/// Rounds to two decimal places, the way a dashboard prints cents.
///
/// Rounding works on the exact decimal value of the `f64`, not on
/// `value * 100` (whose own rounding can turn `1.1149999…` into a tie).
/// Values exactly halfway between two cents go away from zero. NaN
/// and infinities pass through.
pub(crate) fn round2(value: Price) -> Price {
    if !value.is_finite() {
        return value;
    }

    // Exact cent ties are odd multiples of 1/8; scaling by 8 and 100 is exact.
    let eighths = value * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        return (value * 100.0).round() / 100.0;
    }

    format!("{value:.2}").parse().unwrap_or(value)
}
