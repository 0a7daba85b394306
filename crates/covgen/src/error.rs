use cov_core::SampleError;
use derive_more::From;
use orion_error::{ErrorCode, StructError, UvsReason};

#[derive(Debug, Clone, PartialEq, thiserror::Error, From)]
pub enum GenReason {
    #[error("{0}")]
    Sample(SampleError),
    #[error("configuration error")]
    Config,
    #[error("sink error")]
    Sink,
    #[error("{0}")]
    Uvs(UvsReason),
}

impl ErrorCode for GenReason {
    fn error_code(&self) -> i32 {
        match self {
            Self::Sample(s) => s.error_code(),
            Self::Config => 3001,
            Self::Sink => 3002,
            Self::Uvs(u) => u.error_code(),
        }
    }
}

pub type GenError = StructError<GenReason>;
pub type GenResult<T> = Result<T, GenError>;

/// Lift sampling failures into [`GenError`].
pub trait OweSample<T> {
    fn owe_sample(self) -> GenResult<T>;
}

impl<T> OweSample<T> for Result<T, SampleError> {
    fn owe_sample(self) -> GenResult<T> {
        self.map_err(|e| StructError::from(GenReason::Sample(e)))
    }
}
