//! Option price estimation for index options: a linear opening-price
//! estimator, a Black-Scholes call pricer, and an event-driven IV spike
//! heuristic, plus the JSON form layer that drives them.

pub mod config;
pub mod errors;
pub mod models;
pub mod server;

pub use errors::{EstimatorError, EstimatorResult};
pub use models::black_scholes::{black_scholes_call, BlackScholesCall, BlackScholesInput, CallQuote};
pub use models::linear::{estimate_linear_price, LinearEstimate, PricingInput};
pub use models::volatility::{estimate_iv_spike, EventContext, MarketEvent, VolatilityMode};
