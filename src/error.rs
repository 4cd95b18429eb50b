//! Error types.
//!
//! - `FitError` is the library-level taxonomy returned by fitting and rounding.
//! - `AppError` is what the binary reports: a message plus a process exit code.

use thiserror::Error;

/// Failures of the fitting and rounding core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    /// Fewer samples than the chosen estimator requires.
    #[error("Insufficient data: need at least {needed} samples, got {got}.")]
    InsufficientData { needed: usize, got: usize },

    /// All x values identical (or normal equations singular), slope undefined.
    #[error("Degenerate fit: x values have no horizontal spread.")]
    DegenerateFit,

    /// Non-finite numbers, mismatched coordinate arity or malformed pairs.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FitError {
    pub fn invalid(message: impl Into<String>) -> Self {
        FitError::InvalidInput(message.into())
    }

    /// Exit code used by the binary for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            FitError::InvalidInput(_) => 2,
            FitError::InsufficientData { .. } => 3,
            FitError::DegenerateFit => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<FitError> for AppError {
    fn from(err: FitError) -> Self {
        AppError::new(err.exit_code(), err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
