//! Request bodies and the range checks the input form applies before any
//! pricing runs. The estimators themselves never range-check.

use crate::errors::{EstimatorError, EstimatorResult};
use crate::models::black_scholes::BlackScholesInput;
use crate::models::linear::PricingInput;
use crate::models::volatility::{EventContext, MarketEvent, VolatilityMode};

pub const MIN_CURRENT_PRICE: f64 = 1.0;
pub const DELTA_RANGE: (f64, f64) = (0.1, 1.0);
pub const IV_SPIKE_PCT_RANGE: (f64, f64) = (0.0, 50.0);
pub const DAYS_TO_EXPIRY_RANGE: (u32, u32) = (1, 30);
pub const PCT_CHANGE_RANGE: (f64, f64) = (-5.0, 5.0);
pub const MANUAL_IV_RANGE: (f64, f64) = (0.05, 1.0);

/// Black-Scholes form. Every field falls back to the form's initial value.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct BlackScholesForm {
    #[serde(default = "default_spot")]
    pub spot: f64,
    #[serde(default = "default_strike")]
    pub strike: f64,
    #[serde(default = "default_days")]
    pub days_to_expiry: u32,
    #[serde(default = "default_pct_change")]
    pub pct_change: f64,
    #[serde(default = "default_event")]
    pub event: String,
    /// Present = manual override, absent = heuristic estimate.
    #[serde(default)]
    pub manual_iv: Option<f64>,
}

fn default_spot() -> f64 {
    22_500.0
}

fn default_strike() -> f64 {
    22_700.0
}

fn default_days() -> u32 {
    7
}

pub fn default_pct_change() -> f64 {
    1.5
}

fn default_event() -> String {
    MarketEvent::None.label().to_string()
}

impl Default for BlackScholesForm {
    fn default() -> Self {
        Self {
            spot: default_spot(),
            strike: default_strike(),
            days_to_expiry: default_days(),
            pct_change: default_pct_change(),
            event: default_event(),
            manual_iv: None,
        }
    }
}

impl BlackScholesForm {
    /// Range-check, pick the volatility source, and build the pricer input.
    pub fn into_input(self, risk_free_rate: f64) -> EstimatorResult<(BlackScholesInput, VolatilityMode)> {
        let (lo, hi) = DAYS_TO_EXPIRY_RANGE;
        if !(lo..=hi).contains(&self.days_to_expiry) {
            return Err(EstimatorError::InvalidInput(format!(
                "days_to_expiry must be in [{lo}, {hi}], got {}",
                self.days_to_expiry
            )));
        }
        check_range("pct_change", self.pct_change, PCT_CHANGE_RANGE)?;

        let mode = match self.manual_iv {
            Some(sigma) => {
                check_range("manual_iv", sigma, MANUAL_IV_RANGE)?;
                VolatilityMode::Manual(sigma)
            }
            None => VolatilityMode::Estimated(EventContext::new(
                self.pct_change,
                MarketEvent::from_label(&self.event),
            )),
        };

        let input = BlackScholesInput {
            spot: self.spot,
            strike: self.strike,
            days_to_expiry: self.days_to_expiry,
            risk_free_rate,
            volatility: mode.resolve(),
        };
        Ok((input, mode))
    }
}

pub fn validate_linear(input: &PricingInput) -> EstimatorResult<()> {
    if !(input.current_price.is_finite() && input.current_price >= MIN_CURRENT_PRICE) {
        return Err(EstimatorError::InvalidInput(format!(
            "current_price must be >= {MIN_CURRENT_PRICE}, got {}",
            input.current_price
        )));
    }
    check_range("delta", input.delta, DELTA_RANGE)?;
    if !(input.expected_move.is_finite() && input.expected_move >= 0.0) {
        return Err(EstimatorError::InvalidInput(format!(
            "expected_move must be >= 0, got {}",
            input.expected_move
        )));
    }
    check_range("iv_spike_pct", input.iv_spike_pct, IV_SPIKE_PCT_RANGE)
}

pub fn check_range(name: &str, value: f64, (lo, hi): (f64, f64)) -> EstimatorResult<()> {
    if (lo..=hi).contains(&value) {
        Ok(())
    } else {
        Err(EstimatorError::InvalidInput(format!(
            "{name} must be in [{lo}, {hi}], got {value}"
        )))
    }
}
