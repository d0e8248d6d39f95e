use crate::errors::{EstimatorError, EstimatorResult};

/// Annualized risk-free rate used when `RISK_FREE_RATE` is not set.
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.06;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub risk_free_rate: f64,
    pub server_host: String,
    pub server_port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            server_host: "0.0.0.0".to_string(),
            server_port: 3001,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> EstimatorResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. `from_env` passes the process
    /// environment; tests pass a fixed table.
    pub fn from_lookup<F>(lookup: F) -> EstimatorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let risk_free_rate = var_or("RISK_FREE_RATE", "0.06")
            .parse::<f64>()
            .map_err(|e| EstimatorError::Config(format!("RISK_FREE_RATE: {e}")))?;

        if !risk_free_rate.is_finite() {
            return Err(EstimatorError::Config(format!(
                "RISK_FREE_RATE: must be finite, got {risk_free_rate}"
            )));
        }

        let server_port = var_or("SERVER_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| EstimatorError::Config(format!("SERVER_PORT: {e}")))?;

        Ok(Self {
            risk_free_rate,
            server_host: var_or("SERVER_HOST", "0.0.0.0"),
            server_port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
