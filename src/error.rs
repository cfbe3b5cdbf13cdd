use thiserror::Error;

/// Top-level error type for the sampling engine.
#[derive(Debug, Error)]
pub enum SamplingError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Errors related to centerline geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("a centerline needs at least 2 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("centerline has zero length")]
    ZeroLength,

    #[error("vertex {index} has a non-finite coordinate")]
    NonFinite { index: usize },

    #[error("zero-length tangent at distance {distance}")]
    ZeroVector { distance: f64 },
}

/// Errors raised while validating a sampling configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Errors raised by output sinks.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("sample {index} has no geographic coordinates")]
    MissingGeographic { index: usize },

    #[error("coordinate transform failed: {0}")]
    Transform(String),
}

/// Convenience type alias for results using [`SamplingError`].
pub type Result<T> = std::result::Result<T, SamplingError>;
