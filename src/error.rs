use thiserror::Error;

/// Malformed geometric input or a subdivision that never degenerates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("a polygon needs at least 3 sides, got {sides}")]
    TooFewSides { sides: usize },

    #[error("anchor ratio must lie strictly between 0 and 1, got {ratio}")]
    AnchorRatioOutOfRange { ratio: f64 },

    #[error("polygon radius must be positive, got {radius}")]
    NonPositiveRadius { radius: f64 },

    #[error("subdivision still above the degeneracy threshold after {iterations} iterations")]
    Stalled { iterations: usize },
}

/// Rejected engine configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("frame rate must be positive and finite, got {0}")]
    InvalidFrameRate(f64),

    #[error("degeneracy threshold must be positive and finite, got {0}")]
    InvalidThreshold(f64),

    #[error("base size must be positive, got {width}x{height}")]
    InvalidBaseSize { width: f64, height: f64 },

    #[error("iteration cap must be at least 1")]
    ZeroIterationCap,

    #[error("{field} must lie in [0, 1], got {value}")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("invalid anchor schedule: {0}")]
    InvalidAnchorSchedule(String),
}
