use orion_error::ErrorCode;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SampleError {
    #[error("invalid distribution: {0}")]
    InvalidDistribution(String),
    #[error("empty input: {0}")]
    EmptyInput(String),
    #[error("degenerate subset request: {0}")]
    DegenerateSubsetRequest(String),
}

impl ErrorCode for SampleError {
    fn error_code(&self) -> i32 {
        match self {
            Self::InvalidDistribution(_) => 1001,
            Self::EmptyInput(_) => 1002,
            Self::DegenerateSubsetRequest(_) => 1003,
        }
    }
}

pub type SampleResult<T> = Result<T, SampleError>;
