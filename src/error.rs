use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Projection error: {0}")]
    Projection(#[from] ProjError),

    #[error("Length mismatch: x={x}, y={y}, x_out={x_out}, y_out={y_out}")]
    LengthMismatch {
        x: usize,
        y: usize,
        x_out: usize,
        y_out: usize,
    },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Backend initialization failed: {0}")]
    Initialization(String),

    #[error("Compute failed: {0}")]
    Compute(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

#[derive(Error, Debug)]
pub enum ProjError {
    #[error("Unknown CRS: {0}")]
    UnknownCrs(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),
}
