pub mod black_scholes;
pub mod linear;
pub mod volatility;

/// Round to `places` decimal places from the exact binary value, ties to
/// even. Every figure the estimators hand back goes through this.
///
/// Scaling by 10^places first would round twice: 1.14 * 0.75 is stored as
/// 0.85499999..., and `* 100.0` lands it on 85.5.
#[inline]
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
