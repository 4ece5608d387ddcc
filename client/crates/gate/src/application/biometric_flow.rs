//! Setup/Confirm-Biometric Flow
//!
//! Wraps the biometric evaluator with mode-specific framing and success
//! actions, and classifies raw biometric failures. The flow performs no
//! cascade decisions; the resolver consumes its outcome.

use std::sync::Arc;

use derive_more::Display;
use platform::biometrics::{BiometricCapability, BiometricError};

use crate::application::config::GateConfig;
use crate::application::evaluator::BiometricEvaluator;
use crate::domain::policy;
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::opt_in::OptIn;
use crate::error::{GateError, GateResult};

/// What the biometric prompt is being shown for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BiometricMode {
    /// Re-authenticate a foregrounded session
    #[display("unlock")]
    Unlock,
    /// Offer biometric setup during onboarding (skippable)
    #[display("setup_after_login")]
    SetupAfterLogin,
    /// Enable biometric unlock from settings
    #[display("setup_from_settings")]
    SetupFromSettings,
    /// Confirm biometrics before disabling them
    #[display("confirm_deactivate")]
    ConfirmDeactivate,
}

impl BiometricMode {
    /// The user-facing reason shown on the platform prompt
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Unlock => "Unlock your session",
            Self::SetupAfterLogin | Self::SetupFromSettings => {
                "Confirm to enable biometric unlock"
            }
            Self::ConfirmDeactivate => "Confirm to disable biometric unlock",
        }
    }

    /// Check if this is the unlock mode
    #[inline]
    pub const fn is_unlock(&self) -> bool {
        matches!(self, Self::Unlock)
    }

    /// Check if success should enable the biometric opt-in
    #[inline]
    pub const fn is_setup(&self) -> bool {
        matches!(self, Self::SetupAfterLogin | Self::SetupFromSettings)
    }
}

/// Flow-internal outcome consumed by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiometricFlowOutcome {
    /// The mode's success action was applied
    Completed,
    /// The user dismissed the prompt
    Cancelled,
    /// The credential must be wiped and the remote session invalidated
    Reset { due_to_too_many_failures: bool },
    /// Unlock cannot proceed by biometrics and there is nothing to fall
    /// back on inside this flow; only the resolver's unlock handling
    /// consumes this
    DeadEnd,
}

/// Setup/confirm-biometric flow
pub struct BiometricFlow<R, B>
where
    R: CredentialRepository,
    B: BiometricCapability,
{
    repo: Arc<R>,
    evaluator: BiometricEvaluator<B>,
    config: Arc<GateConfig>,
}

impl<R, B> BiometricFlow<R, B>
where
    R: CredentialRepository + Send + Sync,
    B: BiometricCapability + Send + Sync,
{
    pub fn new(repo: Arc<R>, evaluator: BiometricEvaluator<B>, config: Arc<GateConfig>) -> Self {
        Self {
            repo,
            evaluator,
            config,
        }
    }

    /// Run one evaluation for the given mode
    pub async fn run(&self, mode: BiometricMode) -> GateResult<BiometricFlowOutcome> {
        match self.evaluator.evaluate(mode.reason()).await {
            Ok(()) => {
                self.apply_success(mode).await;
                Ok(BiometricFlowOutcome::Completed)
            }
            Err(BiometricError::AlreadyInProgress) => {
                Err(GateError::from(BiometricError::AlreadyInProgress))
            }
            Err(error) if error.is_user_dismissal() => {
                if mode.is_unlock() {
                    let cred = self.repo.snapshot().await;
                    if policy::should_cascade_to_code(true, cred.is_configured()) {
                        // Dismissal is not a lockout failure, but it does
                        // disable biometrics for the rest of the session
                        self.repo.set_can_use_biometrics(OptIn::Disabled).await;
                        tracing::info!(%error, "biometric unlock dismissed, deferring to code");
                    }
                }
                Ok(BiometricFlowOutcome::Cancelled)
            }
            Err(error) => {
                if !mode.is_unlock() {
                    tracing::warn!(%mode, %error, "biometric evaluation failed");
                    return Ok(BiometricFlowOutcome::Cancelled);
                }

                let failures = self.repo.record_biometric_failure().await;
                tracing::warn!(%error, failures, "biometric unlock failed");

                if policy::exceeded_biometric_failures(failures, self.config.max_biometric_failures)
                {
                    Ok(BiometricFlowOutcome::Reset {
                        due_to_too_many_failures: true,
                    })
                } else {
                    Ok(BiometricFlowOutcome::DeadEnd)
                }
            }
        }
    }

    /// Apply the mode-specific success action
    async fn apply_success(&self, mode: BiometricMode) {
        match mode {
            BiometricMode::Unlock => {
                self.repo.reset_failures().await;
                tracing::info!("biometric unlock succeeded");
            }
            BiometricMode::SetupAfterLogin | BiometricMode::SetupFromSettings => {
                self.repo.set_biometrics_enabled(OptIn::Enabled).await;
                // A fresh opt-in clears any previous session's soft-disable
                self.repo.set_can_use_biometrics(OptIn::Unset).await;
                self.repo.reset_biometric_failures().await;
                tracing::info!(%mode, "biometric unlock enabled");
            }
            BiometricMode::ConfirmDeactivate => {
                self.repo.set_biometrics_enabled(OptIn::Unset).await;
                tracing::info!("biometric unlock disabled");
            }
        }
    }
}
