//! Credential Entity
//!
//! Snapshot of the persisted local credential state. The snapshot
//! deliberately carries only *whether* a code is set; the digits themselves
//! never leave the credential store except for a single validation call.

use crate::domain::value_object::opt_in::OptIn;

/// Point-in-time view of the stored credential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Credential {
    /// Whether a local code is stored
    pub code_set: bool,
    /// User opt-in to biometric unlock (distinct from OS enrollment)
    pub biometrics_enabled: OptIn,
    /// Session-scoped soft-disable after a biometric dismissal
    pub can_use_biometrics: OptIn,
    /// Consecutive code mismatches
    pub code_failures: u32,
    /// Consecutive biometric failures
    pub biometric_failures: u32,
}

impl Credential {
    /// Check if the gate is configured at all
    ///
    /// No stored code means "not configured"; that is the safe default a
    /// store failure also degrades to.
    #[inline]
    pub const fn is_configured(&self) -> bool {
        self.code_set
    }

    /// Check if the user has a usable biometric opt-in
    ///
    /// Enabled opt-in with the soft-disable flag not set. Platform
    /// availability is applied separately via
    /// [`Credential::with_platform_availability`].
    #[inline]
    pub const fn is_biometric_configured(&self) -> bool {
        self.biometrics_enabled.is_enabled() && !self.can_use_biometrics.is_disabled()
    }

    /// Overlay the platform's biometric availability
    ///
    /// When the platform reports no biometrics, the soft-disable flag reads
    /// as `Disabled` regardless of what is stored, so every policy decision
    /// downstream observes the same view.
    #[must_use]
    pub fn with_platform_availability(mut self, platform_available: bool) -> Self {
        if !platform_available {
            self.can_use_biometrics = OptIn::Disabled;
        }
        self
    }
}
