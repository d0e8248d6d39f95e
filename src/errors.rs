/// Error types for the estimator.
/// The pricing core only ever raises `Domain`; the rest belong to the
/// HTTP caller layer and process startup.
#[derive(Debug, thiserror::Error)]
pub enum EstimatorError {
    #[error("domain error: {0}")]
    Domain(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(String),
}

impl From<std::io::Error> for EstimatorError {
    fn from(e: std::io::Error) -> Self {
        EstimatorError::Io(e.to_string())
    }
}

pub type EstimatorResult<T> = Result<T, EstimatorError>;
