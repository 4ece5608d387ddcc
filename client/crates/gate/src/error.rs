//! Gate Error Types
//!
//! This module provides gate-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! These are caller errors and invariant violations only. Recoverable
//! conditions (code mismatch, denylisted candidate, dismissed biometric
//! prompt) never become a `GateError`; they stay inside the flows as retry
//! feedback or escalate through the outcome type.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::biometrics::BiometricError;
use thiserror::Error;

/// Gate-specific result type alias
pub type GateResult<T> = Result<T, GateError>;

/// Gate-specific error variants
#[derive(Debug, Error)]
pub enum GateError {
    /// No local code is configured for an intent that needs one
    #[error("No local code is configured")]
    NotConfigured,

    /// Another intent is already being resolved on this gate
    #[error("Another intent is already being resolved")]
    Busy,

    /// Biometric evaluation failed in a way the flows do not absorb
    #[error("Biometric evaluation failed: {0}")]
    Biometric(#[from] BiometricError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GateError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::NotConfigured => ErrorKind::Unavailable,
            GateError::Busy => ErrorKind::Busy,
            GateError::Biometric(BiometricError::AlreadyInProgress) => ErrorKind::Busy,
            GateError::Biometric(BiometricError::UserCancelled)
            | GateError::Biometric(BiometricError::UserFellBack) => ErrorKind::Cancelled,
            GateError::Biometric(BiometricError::PlatformLockout) => ErrorKind::Locked,
            GateError::Biometric(BiometricError::Other(_)) => ErrorKind::Unavailable,
            GateError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            GateError::Internal(msg) => {
                tracing::error!(message = %msg, "Gate internal error");
            }
            GateError::Busy | GateError::Biometric(BiometricError::AlreadyInProgress) => {
                tracing::warn!("Concurrent gate use rejected");
            }
            GateError::NotConfigured => {
                tracing::warn!("Gate intent submitted without a configured credential");
            }
            _ => {
                tracing::debug!(error = %self, "Gate error");
            }
        }
    }
}

impl From<AppError> for GateError {
    fn from(err: AppError) -> Self {
        GateError::Internal(err.to_string())
    }
}
