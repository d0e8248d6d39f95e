pub mod form;
pub mod routes;

use crate::config::AppConfig;
use crate::errors::EstimatorError;
use crate::models::black_scholes::BlackScholesCall;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;

/// Read-only state shared by every handler.
pub struct AppState {
    pub config: AppConfig,
    pub pricer: BlackScholesCall,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            pricer: BlackScholesCall::new(),
        })
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/events", get(routes::list_events))
        .route("/api/iv-spike", get(routes::get_iv_spike))
        .route("/api/linear", post(routes::post_linear))
        .route("/api/black-scholes", post(routes::post_black_scholes))
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .with_state(state)
}

impl IntoResponse for EstimatorError {
    fn into_response(self) -> Response {
        let status = match self {
            EstimatorError::Domain(_) | EstimatorError::InvalidInput(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            EstimatorError::Config(_) | EstimatorError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
