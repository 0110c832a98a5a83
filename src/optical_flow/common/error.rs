use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Frame dimensions disagree: expected {expected_width}x{expected_height}, got {actual_width}x{actual_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },

    #[error("Frame has zero pixels")]
    EmptyFrame,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Failed to encode image: {0}")]
    EncodeError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FlowError {
    /// Shorthand for a mismatch between an expected and an actual frame size.
    pub fn dimension_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        FlowError::DimensionMismatch {
            expected_width: expected.0,
            expected_height: expected.1,
            actual_width: actual.0,
            actual_height: actual.1,
        }
    }
}

pub type Result<T> = std::result::Result<T, FlowError>;
