//! Repository Traits
//!
//! Interfaces for credential persistence and remote session control.
//! Implementation is in the infrastructure layer.
//!
//! Every accessor absorbs storage failures: implementations log the error
//! and return the absent/default value. The gate must never crash or
//! silently unlock because the secure store misbehaved; "no code stored"
//! is the safe degradation.

use crate::domain::entity::credential::Credential;
use crate::domain::value_object::{opt_in::OptIn, pin_code::PinCode};

/// Credential repository trait
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Read the full credential snapshot
    async fn snapshot(&self) -> Credential;

    /// Read the stored code for a single validation call
    async fn code(&self) -> Option<PinCode>;

    /// Store or clear the code
    async fn set_code(&self, code: Option<&PinCode>);

    /// Read the biometric opt-in flag
    async fn biometrics_enabled(&self) -> OptIn;

    /// Store the biometric opt-in flag
    async fn set_biometrics_enabled(&self, value: OptIn);

    /// Read the session-scoped biometric soft-disable flag
    async fn can_use_biometrics(&self) -> OptIn;

    /// Store the session-scoped biometric soft-disable flag
    async fn set_can_use_biometrics(&self, value: OptIn);

    /// Read the consecutive code-mismatch count
    async fn code_failures(&self) -> u32;

    /// Record one code mismatch, returning the new count
    async fn record_code_failure(&self) -> u32;

    /// Clear the code-mismatch count
    async fn reset_code_failures(&self);

    /// Read the consecutive biometric-failure count
    async fn biometric_failures(&self) -> u32;

    /// Record one biometric failure, returning the new count
    async fn record_biometric_failure(&self) -> u32;

    /// Clear the biometric-failure count
    async fn reset_biometric_failures(&self);

    /// Clear both failure counters together
    ///
    /// Counters always reset as a pair when the credential is freshly
    /// established or an unlock succeeds by any method.
    async fn reset_failures(&self);

    /// Wipe every persisted field atomically
    async fn reset(&self);
}

/// Remote session control trait
///
/// Called exactly once whenever the gate produces a
/// `CompletedWithReset` outcome; the local credential is already wiped by
/// then.
#[trait_variant::make(SessionInvalidator: Send)]
pub trait LocalSessionInvalidator {
    /// Invalidate the remote session behind this gate
    async fn invalidate_remote_session(&self);
}
