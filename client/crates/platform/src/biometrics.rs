//! Platform Biometric Port
//!
//! Abstraction over the platform's biometric prompt (fingerprint/face).
//! The gate consumes this through a narrow capability interface; the
//! platform owns enrollment, prompt UI and its dismissal.

use std::fmt;

use thiserror::Error;

// ============================================================================
// Biometry kind
// ============================================================================

/// The kind of biometry the device offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BiometryKind {
    /// Fingerprint sensor (Touch ID equivalent)
    Fingerprint,
    /// Face recognition (Face ID equivalent)
    Face,
    /// No biometric hardware, or nothing enrolled
    #[default]
    None,
}

impl BiometryKind {
    /// Get string code for serialization/API
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Fingerprint => "fingerprint",
            Self::Face => "face",
            Self::None => "none",
        }
    }

    /// Check if this kind can drive an unlock
    #[inline]
    pub const fn supports_unlock(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Create from string code
    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "fingerprint" => Some(Self::Fingerprint),
            "face" => Some(Self::Face),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl fmt::Display for BiometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Typed biometric evaluation failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BiometricError {
    /// User dismissed the prompt
    #[error("User cancelled the biometric prompt")]
    UserCancelled,

    /// User chose the platform's "use passcode" escape hatch
    #[error("User fell back to code entry")]
    UserFellBack,

    /// The platform itself has locked biometrics out (too many OS-level
    /// failures); distinct from this gate's own counters
    #[error("Biometrics are locked out by the platform")]
    PlatformLockout,

    /// Another evaluation is already in flight
    #[error("A biometric evaluation is already in progress")]
    AlreadyInProgress,

    /// Anything else the platform reports
    #[error("Biometric evaluation failed: {0}")]
    Other(String),
}

impl BiometricError {
    /// Check if the user dismissed the prompt themselves
    ///
    /// Dismissals defer to code entry without counting as a lockout
    /// failure.
    #[inline]
    pub const fn is_user_dismissal(&self) -> bool {
        matches!(self, Self::UserCancelled | Self::UserFellBack)
    }
}

// ============================================================================
// Port
// ============================================================================

/// Trait for the platform biometric capability
#[trait_variant::make(BiometricCapability: Send)]
pub trait LocalBiometricCapability {
    /// Whether biometric evaluation can be offered at all
    ///
    /// A platform that is temporarily locked out still reports `true`;
    /// the lockout surfaces as [`BiometricError::PlatformLockout`] on
    /// evaluation instead.
    fn is_available(&self) -> bool;

    /// The kind of biometry the device offers
    fn biometry_kind(&self) -> BiometryKind;

    /// Run one biometric evaluation with the given user-facing reason
    async fn evaluate(&self, reason: &str) -> Result<(), BiometricError>;
}
