use crate::errors::{EstimatorError, EstimatorResult};
use crate::models::round_to;
use statrs::distribution::{ContinuousCDF, Normal};

/// Calendar days per year used to turn days-to-expiry into T.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Black-Scholes European call.
///
/// d1 = (ln(S/K) + (r + sigma^2/2)*T) / (sigma * sqrt(T))
/// d2 = d1 - sigma * sqrt(T)
/// C  = S*Phi(d1) - K*exp(-rT)*Phi(d2)
/// delta = Phi(d1)
///
/// Price is rounded to 2 dp, delta to 3 dp.
pub struct BlackScholesCall {
    /// Standard normal; two f64s, reused for the life of this pricer
    normal: Normal,
}

/// Call price and delta, already rounded.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CallQuote {
    pub call_price: f64,
    pub delta: f64,
}

/// Contract as entered by a user: expiry in whole days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholesInput {
    pub spot: f64,
    pub strike: f64,
    pub days_to_expiry: u32,
    pub risk_free_rate: f64,
    pub volatility: f64,
}

impl BlackScholesInput {
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.days_to_expiry as f64 / DAYS_PER_YEAR
    }

    pub fn price(&self) -> EstimatorResult<CallQuote> {
        self.price_with(&BlackScholesCall::new())
    }

    pub fn price_with(&self, pricer: &BlackScholesCall) -> EstimatorResult<CallQuote> {
        pricer.price(
            self.spot,
            self.strike,
            self.time_to_expiry(),
            self.risk_free_rate,
            self.volatility,
        )
    }
}

/// Validated inputs with the shared terms precomputed.
#[derive(Debug, Clone, Copy)]
struct CallParams {
    spot: f64,
    strike: f64,
    ttl_years: f64,
    rate: f64,
    ln_s_k: f64,
    sigma_sqrt_t: f64,
    half_sigma_sq: f64,
}

impl CallParams {
    fn new(spot: f64, strike: f64, ttl_years: f64, rate: f64, sigma: f64) -> EstimatorResult<Self> {
        if !positive_finite(sigma) {
            return Err(EstimatorError::Domain(format!("volatility must be > 0, got {sigma}")));
        }
        if !positive_finite(ttl_years) {
            return Err(EstimatorError::Domain(format!(
                "time to expiry must be > 0 years, got {ttl_years}"
            )));
        }
        if !positive_finite(spot) {
            return Err(EstimatorError::Domain(format!("spot must be > 0, got {spot}")));
        }
        if !positive_finite(strike) {
            return Err(EstimatorError::Domain(format!("strike must be > 0, got {strike}")));
        }

        Ok(Self {
            spot,
            strike,
            ttl_years,
            rate,
            ln_s_k: (spot / strike).ln(),
            sigma_sqrt_t: sigma * ttl_years.sqrt(),
            half_sigma_sq: 0.5 * sigma * sigma,
        })
    }
}

#[inline]
fn positive_finite(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

impl BlackScholesCall {
    pub fn new() -> Self {
        Self {
            normal: Normal::standard(),
        }
    }

    pub fn price(
        &self,
        spot: f64,
        strike: f64,
        ttl_years: f64,
        rate: f64,
        sigma: f64,
    ) -> EstimatorResult<CallQuote> {
        let p = CallParams::new(spot, strike, ttl_years, rate, sigma)?;

        let d1 = (p.ln_s_k + (p.rate + p.half_sigma_sq) * p.ttl_years) / p.sigma_sqrt_t;
        let d2 = d1 - p.sigma_sqrt_t;

        let nd1 = self.normal.cdf(d1);
        let nd2 = self.normal.cdf(d2);
        let discount = (-p.rate * p.ttl_years).exp();
        let call = p.spot * nd1 - p.strike * discount * nd2;

        tracing::trace!(d1, d2, call, delta = nd1, "black-scholes call");

        Ok(CallQuote {
            call_price: round_to(call, 2),
            delta: round_to(nd1, 3),
        })
    }
}

impl Default for BlackScholesCall {
    fn default() -> Self {
        Self::new()
    }
}

/// Free-function form of [`BlackScholesCall::price`]. Builds a throwaway
/// pricer per call; hold a `BlackScholesCall` to reuse one.
#[inline]
pub fn black_scholes_call(
    spot: f64,
    strike: f64,
    ttl_years: f64,
    rate: f64,
    sigma: f64,
) -> EstimatorResult<CallQuote> {
    BlackScholesCall::new().price(spot, strike, ttl_years, rate, sigma)
}

#[cfg(test)]
mod tests {
    use super::*;

    const T_WEEK: f64 = 7.0 / 365.0;

    #[test]
    fn test_regression_fixture() {
        let q = black_scholes_call(22_500.0, 22_700.0, T_WEEK, 0.06, 0.25).unwrap();
        assert_eq!(q.call_price, 232.69, "price={}", q.call_price);
        assert_eq!(q.delta, 0.419, "delta={}", q.delta);
    }

    #[test]
    fn test_textbook_atm() {
        // Hull: S=K=100, T=1, r=5%, sigma=20% -> 10.45
        let q = black_scholes_call(100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
        assert_eq!(q.call_price, 10.45);
        assert_eq!(q.delta, 0.637);
    }

    #[test]
    fn test_input_struct_matches_free_fn() {
        let input = BlackScholesInput {
            spot: 22_500.0,
            strike: 22_700.0,
            days_to_expiry: 7,
            risk_free_rate: 0.06,
            volatility: 0.25,
        };
        assert_eq!(input.time_to_expiry(), T_WEEK);
        let free = black_scholes_call(22_500.0, 22_700.0, T_WEEK, 0.06, 0.25).unwrap();
        assert_eq!(input.price().unwrap(), free);
        assert_eq!(input.price_with(&BlackScholesCall::new()).unwrap(), free);
    }

    #[test]
    fn test_reused_pricer_matches_fresh_ones() {
        let pricer = BlackScholesCall::default();
        for sigma in [0.12, 0.25, 0.45] {
            assert_eq!(
                pricer.price(22_500.0, 22_700.0, T_WEEK, 0.06, sigma).unwrap(),
                black_scholes_call(22_500.0, 22_700.0, T_WEEK, 0.06, sigma).unwrap(),
                "sigma={sigma}"
            );
        }
    }

    #[test]
    fn test_zero_vol_and_zero_time_are_domain_errors() {
        let err = black_scholes_call(22_500.0, 22_700.0, T_WEEK, 0.06, 0.0).unwrap_err();
        assert!(matches!(err, EstimatorError::Domain(_)), "got {err:?}");

        let err = black_scholes_call(22_500.0, 22_700.0, 0.0, 0.06, 0.25).unwrap_err();
        assert!(matches!(err, EstimatorError::Domain(_)), "got {err:?}");
    }

    #[test]
    fn test_non_positive_prices_are_domain_errors() {
        for (s, k) in [(0.0, 100.0), (-5.0, 100.0), (100.0, 0.0), (100.0, -1.0)] {
            let res = black_scholes_call(s, k, 1.0, 0.05, 0.2);
            assert!(matches!(res, Err(EstimatorError::Domain(_))), "S={s} K={k}: {res:?}");
        }
    }

    #[test]
    fn test_nan_inputs_never_leak() {
        for res in [
            black_scholes_call(100.0, 100.0, 1.0, 0.05, f64::NAN),
            black_scholes_call(100.0, 100.0, f64::NAN, 0.05, 0.2),
            black_scholes_call(f64::NAN, 100.0, 1.0, 0.05, 0.2),
            black_scholes_call(100.0, f64::INFINITY, 1.0, 0.05, 0.2),
        ] {
            assert!(matches!(res, Err(EstimatorError::Domain(_))), "{res:?}");
        }
    }

    #[test]
    fn test_delta_monotone_in_spot() {
        let model = BlackScholesCall::new();
        let mut prev = 0.0;
        for i in 0..60 {
            let spot = 21_000.0 + 50.0 * i as f64;
            let q = model.price(spot, 22_700.0, T_WEEK, 0.06, 0.25).unwrap();
            assert!(q.delta >= prev, "delta fell at spot={spot}: {} < {prev}", q.delta);
            assert!((0.0..=1.0).contains(&q.delta));
            prev = q.delta;
        }
    }

    #[test]
    fn test_small_vol_converges_to_discounted_intrinsic() {
        let (s, r) = (22_500.0, 0.06);

        let k_itm = 22_000.0;
        let bound = (s - k_itm * (-r * T_WEEK).exp()).max(0.0);
        let q = black_scholes_call(s, k_itm, T_WEEK, r, 1e-4).unwrap();
        assert!((q.call_price - bound).abs() <= 0.01, "itm {} vs {bound}", q.call_price);
        assert_eq!(q.delta, 1.0);

        let q = black_scholes_call(s, 22_700.0, T_WEEK, r, 1e-4).unwrap();
        assert_eq!(q.call_price, 0.0);
        assert_eq!(q.delta, 0.0);
    }

    #[test]
    fn test_price_increases_with_vol() {
        let low = black_scholes_call(22_500.0, 22_700.0, T_WEEK, 0.06, 0.12).unwrap();
        let high = black_scholes_call(22_500.0, 22_700.0, T_WEEK, 0.06, 0.45).unwrap();
        assert_eq!(low.call_price, 78.58);
        assert_eq!(high.call_price, 478.78);
        assert!(high.delta > low.delta);
    }
}
