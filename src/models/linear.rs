//! Linear opening-price estimate.
//!
//! P_new = P + delta * move + P * (iv_spike_pct / 100)
//!
//! Targets and stop-loss are fixed multiples, not estimated quantities.
//! No range checks here; the caller decides what inputs are sensible.

use crate::models::round_to;

/// First profit target: 25% above the estimated price.
pub const TARGET1_MULTIPLIER: f64 = 1.25;
/// Second profit target: 50% above the estimated price.
pub const TARGET2_MULTIPLIER: f64 = 1.50;
/// Stop-loss: 25% below the current (entry) price.
pub const STOP_LOSS_MULTIPLIER: f64 = 0.75;

#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize)]
pub struct PricingInput {
    pub current_price: f64,
    pub delta: f64,
    pub expected_move: f64,
    #[serde(default)]
    pub iv_spike_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct LinearEstimate {
    pub estimated_price: f64,
    pub target1: f64,
    pub target2: f64,
    pub stop_loss: f64,
}

impl PricingInput {
    pub fn new(current_price: f64, delta: f64, expected_move: f64) -> Self {
        Self {
            current_price,
            delta,
            expected_move,
            iv_spike_pct: 0.0,
        }
    }

    pub fn with_iv_spike(mut self, iv_spike_pct: f64) -> Self {
        self.iv_spike_pct = iv_spike_pct;
        self
    }

    #[inline]
    pub fn estimate(&self) -> LinearEstimate {
        estimate_linear_price(
            self.current_price,
            self.delta,
            self.expected_move,
            self.iv_spike_pct,
        )
    }
}

/// Pure function: same inputs, same estimate.
#[inline]
pub fn estimate_linear_price(
    current_price: f64,
    delta: f64,
    expected_move: f64,
    iv_spike_pct: f64,
) -> LinearEstimate {
    let intrinsic_gain = delta * expected_move;
    let iv_boost = current_price * (iv_spike_pct / 100.0);
    let estimated_price = round_to(current_price + intrinsic_gain + iv_boost, 2);

    tracing::debug!(
        current_price,
        intrinsic_gain,
        iv_boost,
        estimated_price,
        "linear estimate"
    );

    LinearEstimate {
        estimated_price,
        target1: round_to(estimated_price * TARGET1_MULTIPLIER, 2),
        target2: round_to(estimated_price * TARGET2_MULTIPLIER, 2),
        stop_loss: round_to(current_price * STOP_LOSS_MULTIPLIER, 2),
    }
}
