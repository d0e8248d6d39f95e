//! Implied-volatility spike heuristic.
//!
//! IV = round(ladder(|pct_change|) + event_adjustment(event), 2)
//!
//! Both tables are hand-tuned policy data and must stay exactly as written.

use crate::models::round_to;

/// Magnitude ladder, checked top-down; first threshold met wins.
const MAGNITUDE_LADDER: [(f64, f64); 3] = [(3.0, 0.25), (2.0, 0.18), (1.0, 0.12)];

/// Contribution when |pct_change| is below every ladder threshold.
const LADDER_FLOOR: f64 = 0.07;

/// Scheduled market events that move index-option IV.
/// Labels outside the known set become `Unknown` and add nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MarketEvent {
    #[default]
    None,
    RbiPolicy,
    UsCpiData,
    FedMeeting,
    BudgetDay,
    QuarterlyResults,
    Unknown,
}

impl MarketEvent {
    /// Selectable events in display order. `Unknown` is never offered.
    pub const ALL: [MarketEvent; 6] = [
        MarketEvent::None,
        MarketEvent::RbiPolicy,
        MarketEvent::UsCpiData,
        MarketEvent::FedMeeting,
        MarketEvent::BudgetDay,
        MarketEvent::QuarterlyResults,
    ];

    /// Lenient lookup by exact display label. Never fails; anything else,
    /// including padded or re-cased labels, is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "None" => Self::None,
            "RBI Policy" => Self::RbiPolicy,
            "US CPI Data" => Self::UsCpiData,
            "Fed Meeting" => Self::FedMeeting,
            "Budget Day" => Self::BudgetDay,
            "Quarterly Results" => Self::QuarterlyResults,
            other => {
                tracing::warn!("unknown market event {other:?}, no IV adjustment applied");
                Self::Unknown
            }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::RbiPolicy => "RBI Policy",
            Self::UsCpiData => "US CPI Data",
            Self::FedMeeting => "Fed Meeting",
            Self::BudgetDay => "Budget Day",
            Self::QuarterlyResults => "Quarterly Results",
            Self::Unknown => "Unknown",
        }
    }

    /// Additive IV contribution of this event.
    #[inline]
    pub fn adjustment(&self) -> f64 {
        match self {
            Self::None => 0.00,
            Self::RbiPolicy => 0.05,
            Self::UsCpiData => 0.08,
            Self::FedMeeting => 0.10,
            Self::BudgetDay => 0.20,
            Self::QuarterlyResults => 0.04,
            Self::Unknown => 0.00,
        }
    }
}

impl From<&str> for MarketEvent {
    fn from(label: &str) -> Self {
        Self::from_label(label)
    }
}

impl std::fmt::Display for MarketEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Overnight move of the underlying (e.g. GIFT Nifty, in percent) plus the
/// scheduled event for the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventContext {
    pub underlying_pct_change: f64,
    pub event: MarketEvent,
}

impl EventContext {
    pub fn new(underlying_pct_change: f64, event: MarketEvent) -> Self {
        Self {
            underlying_pct_change,
            event,
        }
    }

    #[inline]
    pub fn estimate(&self) -> f64 {
        estimate_iv_spike(self.underlying_pct_change, self.event)
    }
}

/// Where the Black-Scholes volatility comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolatilityMode {
    /// User-chosen sigma; the heuristic is bypassed.
    Manual(f64),
    /// Sigma taken from the IV spike heuristic.
    Estimated(EventContext),
}

impl VolatilityMode {
    #[inline]
    pub fn resolve(&self) -> f64 {
        match self {
            Self::Manual(sigma) => *sigma,
            Self::Estimated(ctx) => ctx.estimate(),
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Self::Manual(_) => "manual",
            Self::Estimated(_) => "estimated",
        }
    }
}

/// Ladder contribution for an absolute percentage move.
#[inline]
pub fn magnitude_contribution(pct_change: f64) -> f64 {
    let magnitude = pct_change.abs();
    MAGNITUDE_LADDER
        .iter()
        .find(|(threshold, _)| magnitude >= *threshold)
        .map_or(LADDER_FLOOR, |&(_, spike)| spike)
}

/// Pure function: additive IV spike as a fraction, rounded to 2 dp.
#[inline]
pub fn estimate_iv_spike(pct_change: f64, event: MarketEvent) -> f64 {
    let ladder = magnitude_contribution(pct_change);
    let iv = round_to(ladder + event.adjustment(), 2);
    tracing::debug!(pct_change, %event, ladder, iv, "iv spike estimate");
    iv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_cases() {
        assert_eq!(estimate_iv_spike(3.5, MarketEvent::BudgetDay), 0.45);
        assert_eq!(estimate_iv_spike(0.5, MarketEvent::None), 0.07);
        assert_eq!(estimate_iv_spike(-2.5, MarketEvent::FedMeeting), 0.28);
    }

    #[test]
    fn test_ladder_boundaries() {
        assert_eq!(magnitude_contribution(0.0), 0.07);
        assert_eq!(magnitude_contribution(0.99), 0.07);
        assert_eq!(magnitude_contribution(1.0), 0.12);
        assert_eq!(magnitude_contribution(1.99), 0.12);
        assert_eq!(magnitude_contribution(2.0), 0.18);
        assert_eq!(magnitude_contribution(-2.0), 0.18);
        assert_eq!(magnitude_contribution(3.0), 0.25);
        assert_eq!(magnitude_contribution(-5.0), 0.25);
    }

    #[test]
    fn test_event_table() {
        let expected = [0.00, 0.05, 0.08, 0.10, 0.20, 0.04];
        for (event, want) in MarketEvent::ALL.iter().zip(expected) {
            assert_eq!(event.adjustment(), want, "{event}");
        }
        assert_eq!(MarketEvent::Unknown.adjustment(), 0.0);
    }

    #[test]
    fn test_labels_round_trip() {
        for event in MarketEvent::ALL {
            assert_eq!(MarketEvent::from_label(event.label()), event);
        }
    }

    #[test]
    fn test_unknown_label_falls_back() {
        let event = MarketEvent::from("Election Results");
        assert_eq!(event, MarketEvent::Unknown);
        assert_eq!(estimate_iv_spike(1.5, event), 0.12);
        assert_eq!(MarketEvent::from_label("fed meeting"), MarketEvent::Unknown);
    }

    #[test]
    fn test_padded_label_is_unknown() {
        for label in [" Budget Day ", "Budget Day\n", "\tFed Meeting", "None "] {
            let event = MarketEvent::from_label(label);
            assert_eq!(event, MarketEvent::Unknown, "{label:?}");
            assert_eq!(estimate_iv_spike(3.5, event), 0.25, "{label:?}");
        }
    }

    #[test]
    fn test_output_range() {
        for i in -60..=60 {
            let pct = i as f64 / 10.0;
            for event in MarketEvent::ALL {
                let iv = estimate_iv_spike(pct, event);
                assert!((0.07..=0.45).contains(&iv), "pct={pct} event={event} iv={iv}");
            }
        }
    }

    #[test]
    fn test_volatility_mode() {
        let ctx = EventContext::new(1.5, MarketEvent::RbiPolicy);
        assert_eq!(VolatilityMode::Estimated(ctx).resolve(), 0.17);
        assert_eq!(VolatilityMode::Estimated(ctx).source(), "estimated");

        let manual = VolatilityMode::Manual(0.25);
        assert_eq!(manual.resolve(), 0.25);
        assert_eq!(manual.source(), "manual");
    }
}
