use crate::errors::EstimatorResult;
use crate::models::linear::{LinearEstimate, PricingInput};
use crate::models::round_to;
use crate::models::volatility::{estimate_iv_spike, MarketEvent};
use crate::server::form::{self, BlackScholesForm};
use crate::server::AppState;
use axum::extract::{Query, State};
use axum::response::Json;
use std::sync::Arc;

#[derive(serde::Deserialize)]
pub struct IvSpikeQuery {
    #[serde(default = "form::default_pct_change")]
    pub pct_change: f64,
    pub event: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct BlackScholesResponse {
    pub call_price: f64,
    pub delta: f64,
    pub volatility: f64,
    pub volatility_pct: f64,
    pub volatility_source: &'static str,
    pub time_to_expiry_years: f64,
}

/// GET /api/health
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /api/events -- selectable event labels, display order
pub async fn list_events() -> Json<serde_json::Value> {
    let labels: Vec<&str> = MarketEvent::ALL.iter().map(MarketEvent::label).collect();
    Json(serde_json::json!({ "events": labels }))
}

/// GET /api/iv-spike?pct_change=&event=
pub async fn get_iv_spike(
    Query(params): Query<IvSpikeQuery>,
) -> EstimatorResult<Json<serde_json::Value>> {
    form::check_range("pct_change", params.pct_change, form::PCT_CHANGE_RANGE)
        .inspect_err(|e| tracing::warn!("iv spike query rejected: {e}"))?;

    let event = params
        .event
        .as_deref()
        .map_or(MarketEvent::None, MarketEvent::from_label);
    let iv = estimate_iv_spike(params.pct_change, event);
    Ok(Json(serde_json::json!({
        "iv": iv,
        "iv_pct": round_to(iv * 100.0, 2),
        "event": event.label(),
    })))
}

/// POST /api/linear -- linear opening-price estimate with targets
pub async fn post_linear(Json(input): Json<PricingInput>) -> EstimatorResult<Json<LinearEstimate>> {
    if let Err(e) = form::validate_linear(&input) {
        tracing::warn!("linear estimate rejected: {e}");
        return Err(e);
    }
    let estimate = input.estimate();
    tracing::info!(
        "linear estimate: price={} t1={} t2={} sl={}",
        estimate.estimated_price,
        estimate.target1,
        estimate.target2,
        estimate.stop_loss
    );
    Ok(Json(estimate))
}

/// POST /api/black-scholes -- call price and delta, manual or estimated IV
pub async fn post_black_scholes(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BlackScholesForm>,
) -> EstimatorResult<Json<BlackScholesResponse>> {
    let (input, mode) = body
        .into_input(state.config.risk_free_rate)
        .inspect_err(|e| tracing::warn!("black-scholes form rejected: {e}"))?;

    let ttl_years = input.time_to_expiry();
    let quote = input
        .price_with(&state.pricer)
        .inspect_err(|e| tracing::warn!("black-scholes pricing failed: {e}"))?;

    tracing::info!(
        "black-scholes: S={} K={} days={} sigma={} ({}) -> price={} delta={}",
        input.spot,
        input.strike,
        input.days_to_expiry,
        input.volatility,
        mode.source(),
        quote.call_price,
        quote.delta
    );

    Ok(Json(BlackScholesResponse {
        call_price: quote.call_price,
        delta: quote.delta,
        volatility: input.volatility,
        volatility_pct: round_to(input.volatility * 100.0, 2),
        volatility_source: mode.source(),
        time_to_expiry_years: ttl_years,
    }))
}
