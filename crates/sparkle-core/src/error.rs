use thiserror::Error;

/// Rejected engine configuration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SparkleError {
    #[error("{name} range is inverted ({min} > {max})")]
    InvertedRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must lie strictly between 0 and 1, got {value}")]
    RateOutOfRange { name: &'static str, value: f64 },
    #[error("{name} count range {min}..={max} is invalid")]
    InvalidCount {
        name: &'static str,
        min: usize,
        max: usize,
    },
    #[error("orbital particle cap must be at least 1")]
    ZeroOrbitCap,
    #[error("orbit start radius {start} must exceed the stable radius {stable}")]
    OrbitInsideStableRadius { start: f64, stable: f64 },
}

pub type Result<T> = std::result::Result<T, SparkleError>;
